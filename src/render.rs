//! Textual rendering of `Factor`s.
//!
//! `Factor` implements `Display` as its logical name, e.g. `P(+fp,IP|-trav,OC)` for a probability
//! table or `f(Trav,Fraud)` for an intermediate product. `TableDisplay` prints the rows.

use crate::factor::Factor;
use crate::variable::Sign;

use itertools::Itertools;

use std::fmt;

/// Width of a rendered table cell
const CELL_WIDTH: usize = 10;


impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let prefix = if self.is_probability() { "P" } else { "f" };
        write!(f, "{}({}", prefix, side(self.solution_evidence(), self.solution_variables()))?;

        if !self.given_variables().is_empty() || !self.given_evidence().is_empty() {
            write!(f, "|{}", side(self.given_evidence(), self.given_variables()))?;
        }

        write!(f, ")")
    }
}


/// Observed variables first, as `+var`/`-var`, then the free variables
fn side(evidence: &[(String, Sign)], variables: &[String]) -> String {
    evidence.iter()
            .map(|&(ref var, sign)| format!("{}{}", sign, var.to_lowercase()))
            .chain(variables.iter().cloned())
            .join(",")
}


/// Renders every row of a `Factor` as fixed width cells: `+var`/`-var` per variable followed by
/// the value.
pub struct TableDisplay<'a>(pub &'a Factor);

impl<'a> fmt::Display for TableDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let factor = self.0;

        for (signs, value) in factor.table().rows() {
            for (sign, var) in signs.iter().zip(factor.variables()) {
                let cell = format!("{}{}", sign, var.to_lowercase());
                write!(f, "{:^width$}|", cell, width = CELL_WIDTH)?;
            }
            writeln!(f, "{:^width$}|", format!("{:.5}", value), width = CELL_WIDTH)?;
        }

        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn representation() {
        let f = Factor::cpd(&["IP"], &["OC", "Fraud"], vec![0.125; 8]).unwrap();
        assert_eq!("P(IP|OC,Fraud)", format!("{}", f));

        let r = f.restrict("Fraud", Sign::Negative).restrict("IP", Sign::Positive);
        assert_eq!("P(+ip|-fraud,OC)", format!("{}", r));

        let trav = Factor::cpd(&["Trav"], &[], vec![0.05, 0.95]).unwrap();
        assert_eq!("P(Trav)", format!("{}", trav));

        let fraud = Factor::cpd(&["Fraud"], &["Trav"], vec![0.05, 0.95, 0.01, 0.99]).unwrap();
        assert_eq!("f(Trav,Fraud)", format!("{}", trav.product(&fraud)));
    }

    #[test]
    fn rows() {
        let f = Factor::cpd(&["Trav"], &[], vec![0.05, 0.95]).unwrap();
        let out = format!("{}", TableDisplay(&f));

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(2, lines.len());
        assert_eq!("  +trav   | 0.05000  |", lines[0]);
        assert_eq!("  -trav   | 0.95000  |", lines[1]);
    }
}
