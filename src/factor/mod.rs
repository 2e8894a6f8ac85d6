//! Definition of the factor module
//!
//! A `Factor` represents a relationship between some set of boolean variables. Source factors are
//! conditional probability tables `P(solution | given)`; every algebra operation produces a new
//! `Factor` and never modifies its inputs.

use crate::util::{Result, VarElimError};
use crate::variable::{Assignment, Sign};

use itertools::Itertools;

mod ops;
mod table;

pub use self::table::{canonical_index, Table};

/// Variables that have been observed away from a `Factor`, kept only for display
pub type Evidence = Vec<(String, Sign)>;


#[derive(Clone, Debug, PartialEq)]
pub struct Factor {
    /// The scope of the `Factor`: `given_variables` followed by `solution_variables`. The order
    /// maps one to one onto the columns of `table`.
    variables: Vec<String>,

    /// Non-evidence variables on the solution side
    solution_variables: Vec<String>,

    /// Non-evidence variables on the given side
    given_variables: Vec<String>,

    /// The values of the `Factor` table
    table: Table,

    /// Observed variables on the solution side
    solution_evidence: Evidence,

    /// Observed variables on the given side
    given_evidence: Evidence,

    /// `true`, if the `Factor` still denotes a conditional probability table rather than an
    /// intermediate product
    is_probability: bool
}


impl Factor {

    /// Create a conditional probability table `P(solution | given)`.
    ///
    /// `values` holds one entry per row of the canonical table over `given ++ solution`, e.g.
    /// for `P(B | A)` the order is `+a+b, +a-b, -a+b, -a-b`.
    ///
    /// # Errors
    /// * `VarElimError::DuplicateVariable` if a variable is listed twice
    /// * `VarElimError::MalformedInput` if `values` does not hold `2^k` entries
    /// * `VarElimError::NonPositiveProbability` if a value is negative or not finite
    pub fn cpd<S: AsRef<str>>(solution: &[S], given: &[S], values: Vec<f64>) -> Result<Self> {
        Factor::new(solution, given, values, true)
    }


    /// Create a new `Factor`
    pub fn new<S: AsRef<str>>(solution: &[S], given: &[S], values: Vec<f64>, is_probability: bool)
        -> Result<Self>
    {
        let solution: Vec<String> = solution.iter().map(|v| String::from(v.as_ref())).collect();
        let given: Vec<String> = given.iter().map(|v| String::from(v.as_ref())).collect();

        if let Some(dup) = given.iter().chain(solution.iter()).duplicates().next() {
            return Err(VarElimError::DuplicateVariable(dup.clone()));
        }

        let table = Table::new(solution.len() + given.len(), values)?;

        Ok(Factor::from_parts(solution, given, table, vec![], vec![], is_probability))
    }


    /// Assemble a `Factor` whose table is already laid out over `given ++ solution`
    fn from_parts(solution_variables: Vec<String>,
                  given_variables: Vec<String>,
                  table: Table,
                  solution_evidence: Evidence,
                  given_evidence: Evidence,
                  is_probability: bool) -> Self
    {
        let variables: Vec<String> = given_variables.iter()
                                                    .chain(solution_variables.iter())
                                                    .cloned()
                                                    .collect();
        debug_assert_eq!(variables.len(), table.num_vars());

        Factor {
            variables,
            solution_variables,
            given_variables,
            table,
            solution_evidence,
            given_evidence,
            is_probability
        }
    }


    /// The scope of the `Factor`, in column order
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn solution_variables(&self) -> &[String] {
        &self.solution_variables
    }

    pub fn given_variables(&self) -> &[String] {
        &self.given_variables
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn solution_evidence(&self) -> &[(String, Sign)] {
        &self.solution_evidence
    }

    pub fn given_evidence(&self) -> &[(String, Sign)] {
        &self.given_evidence
    }

    pub fn is_probability(&self) -> bool {
        self.is_probability
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Check if `var` is in the scope of this `Factor`
    pub fn contains(&self, var: &str) -> bool {
        self.position(var).is_some()
    }

    /// The column of `var`, if it is in scope
    pub fn position(&self, var: &str) -> Option<usize> {
        self.variables.iter().position(|v| v == var)
    }


    /// Retrieve the value for a complete assignment over the scope of this `Factor`
    ///
    /// # Args
    /// assignment: a full assignment to the scope of the `Factor`. The assignment's scope may be
    ///             a superset of the `Factor`'s scope.
    ///
    /// # Errors
    /// * `VarElimError::IncompleteAssignment`, if a variable in scope is not assigned
    pub fn value(&self, assignment: &Assignment) -> Result<f64> {
        let signs: Option<Vec<Sign>> = self.variables.iter().map(|v| assignment.get(v)).collect();

        match signs {
            Some(signs) => Ok(self.table.value(canonical_index(signs))),
            None => Err(VarElimError::IncompleteAssignment)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::all_assignments;

    #[test]
    fn cpd() {
        let f = Factor::cpd(&["Fraud"], &["Trav"], vec![0.05, 0.95, 0.01, 0.99]).unwrap();

        assert_eq!(vec!["Trav", "Fraud"], f.variables());
        assert_eq!(vec!["Fraud"], f.solution_variables());
        assert_eq!(vec!["Trav"], f.given_variables());
        assert!(f.is_probability());
        assert!(f.solution_evidence().is_empty());
        assert!(f.given_evidence().is_empty());

        let t = f.table();
        assert_eq!(4, t.num_rows());
        assert_eq!(2, t.num_vars());
        assert_eq!((4, 3), t.to_array().dim());
    }

    #[test]
    fn table_invariants() {
        let f = Factor::cpd(&["FP"], &["Trav", "Fraud"], vec![0.125; 8]).unwrap();
        let t = f.table();

        assert_eq!(1 << f.num_variables(), t.num_rows());
        assert_eq!(f.num_variables(), t.num_vars());
        for (signs, value) in t.rows() {
            assert_eq!(f.num_variables(), signs.len());
            assert_eq!(0.125, value);
        }
    }

    #[test]
    fn value() {
        let f = Factor::cpd(&["Fraud"], &["Trav"], vec![0.05, 0.95, 0.01, 0.99]).unwrap();

        let expected = [0.05, 0.95, 0.01, 0.99];
        for (assn, &v) in all_assignments(f.variables()).zip(expected.iter()) {
            assert_eq!(v, f.value(&assn).unwrap());
        }

        // out of scope assignments are ignored
        let mut assn = Assignment::new();
        assn.set("Trav", Sign::Negative);
        assn.set("Fraud", Sign::Positive);
        assn.set("OC", Sign::Positive);
        assert_eq!(0.01, f.value(&assn).unwrap());

        let mut partial = Assignment::new();
        partial.set("Trav", Sign::Negative);
        assert_eq!(Err(VarElimError::IncompleteAssignment), f.value(&partial));
    }

    #[test]
    fn construction_errs() {
        match Factor::cpd(&["A"], &["B"], vec![0.5, 0.5]) {
            Err(VarElimError::MalformedInput { expected: 4, found: 2 }) => (),
            other => panic!("unexpected result {:?}", other)
        };

        match Factor::cpd(&["A"], &["A"], vec![0.25; 4]) {
            Err(VarElimError::DuplicateVariable(v)) => assert_eq!("A", v),
            other => panic!("unexpected result {:?}", other)
        };

        assert_eq!(
            Err(VarElimError::NonPositiveProbability),
            Factor::cpd(&["A"], &[], vec![1.5, -0.5])
        );
    }
}
