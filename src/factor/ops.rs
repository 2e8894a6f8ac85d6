//! The operations of the factor algebra: restriction, marginalization, product and normalization.
//!
//! Restriction and marginalization of a variable that is not in scope leave the `Factor` as it
//! is. The elimination loop relies on this to apply them to every `Factor` unconditionally.

use super::{Evidence, Factor, Table, canonical_index};
use crate::util::{Result, VarElimError};
use crate::variable::Sign;

use itertools::Itertools;
use ndarray::prelude as nd;


/// Where a column of a product table takes its sign from
#[derive(Clone, Copy, Debug)]
enum Column {
    First(usize),
    Second(usize)
}


impl Factor {

    /// Reduce the `Factor` to the rows where `var` takes the value `sign`.
    ///
    /// Defined in Koller & Friedman 4.2.3
    ///
    /// # Args
    /// var: the observed variable
    /// sign: the observed value
    ///
    /// # Returns
    /// A new `Factor` without `var` in its scope. The observation is recorded, lower-cased, in the
    /// evidence list of the side `var` was on. Values are not renormalized.
    pub fn restrict(&self, var: &str, sign: Sign) -> Self {
        let idx = match self.position(var) {
            Some(idx) => idx,
            None => return self.clone()
        };

        let values: nd::Array1<f64> = self.table
                                          .dense()
                                          .index_axis(nd::Axis(idx), sign.index())
                                          .iter()
                                          .cloned()
                                          .collect();

        let mut solution_evidence = self.solution_evidence.clone();
        let mut given_evidence = self.given_evidence.clone();
        let observed = (var.to_lowercase(), sign);
        if self.solution_variables.iter().any(|v| v == var) {
            solution_evidence.push(observed);
        } else {
            given_evidence.push(observed);
        }

        trace!("restricted {} to {}{}", self, sign, var);

        Factor::from_parts(
            without(&self.solution_variables, var),
            without(&self.given_variables, var),
            Table::from_values(self.num_variables() - 1, values),
            solution_evidence,
            given_evidence,
            self.is_probability
        )
    }


    /// Restrict the `Factor` by every observation in `evidence`.
    pub fn restrict_all<'a, I>(&self, evidence: I) -> Self
        where I: IntoIterator<Item = (&'a String, &'a Sign)>
    {
        evidence.into_iter().fold(self.clone(), |f, (var, &sign)| f.restrict(var, sign))
    }


    /// Marginalize the `Factor` over the given variable
    ///
    /// Defined in Koller & Friedman 9.3.1
    ///
    /// # Args
    /// var: the variable to sum out
    ///
    /// # Returns
    /// another `Factor` without `var` in its scope. Every pair of rows that differ only in `var`
    /// collapses into a single row holding their sum.
    pub fn sum_out(&self, var: &str) -> Self {
        let idx = match self.position(var) {
            Some(idx) => idx,
            None => return self.clone()
        };

        let values: nd::Array1<f64> = self.table
                                          .dense()
                                          .sum_axis(nd::Axis(idx))
                                          .iter()
                                          .cloned()
                                          .collect();

        Factor::from_parts(
            without(&self.solution_variables, var),
            without(&self.given_variables, var),
            Table::from_values(self.num_variables() - 1, values),
            self.solution_evidence.clone(),
            self.given_evidence.clone(),
            self.is_probability
        )
    }


    /// Product of this `Factor` and another `Factor`.
    ///
    /// Defined in Koller & Friedman Section 4.2.1
    ///
    /// The operand with a solution variable on the other's given side is taken to come first in
    /// the causal chain and seeds the partition of the result: its solution variables come first,
    /// and any variable that is on the solution side of either operand is on the solution side of
    /// the result. The values do not depend on the operand order.
    ///
    /// # Returns
    /// A new `Factor` over the union of both scopes whose table is in canonical order for its
    /// own variables. The result is never a probability table.
    pub fn product(&self, other: &Self) -> Self {
        let (f1, f2) = if self.solution_variables.iter().any(|v| other.given_variables.contains(v)) {
            (self, other)
        } else {
            (other, self)
        };

        let solution: Vec<String> = f1.solution_variables
                                      .iter()
                                      .chain(f2.solution_variables.iter())
                                      .unique()
                                      .cloned()
                                      .collect();

        let given: Vec<String> = f1.given_variables
                                   .iter()
                                   .chain(f2.given_variables.iter())
                                   .filter(|v| !solution.contains(v))
                                   .unique()
                                   .cloned()
                                   .collect();

        // the sign of each column of the product, read from one of the operand rows
        let columns: Vec<Column> = given.iter()
                                        .chain(solution.iter())
                                        .map(|v| match f1.position(v) {
                                            Some(i) => Column::First(i),
                                            // every variable is in the scope of one operand
                                            None => Column::Second(f2.position(v).unwrap_or(0))
                                        })
                                        .collect();

        let shared: Vec<(usize, usize)> = f1.variables
                                            .iter()
                                            .enumerate()
                                            .filter_map(|(i, v)| f2.position(v).map(|j| (i, j)))
                                            .collect();

        let mut values = nd::Array1::zeros(1usize << columns.len());
        for (row1, v1) in f1.table.rows() {
            for (row2, v2) in f2.table.rows() {
                if !compatible(&shared, &row1, &row2) {
                    continue;
                }

                let idx = canonical_index(columns.iter().map(|&c| match c {
                    Column::First(i) => row1[i],
                    Column::Second(j) => row2[j]
                }));
                values[idx] = v1 * v2;
            }
        }

        let solution_evidence = merge(&f1.solution_evidence, &f2.solution_evidence);
        let given_evidence = merge(&f1.given_evidence, &f2.given_evidence);
        let table = Table::from_values(columns.len(), values);

        let product = Factor::from_parts(solution, given, table, solution_evidence, given_evidence, false);
        trace!("{} x {} = {}", f1, f2, product);
        product
    }


    /// Scale the values of the `Factor` so that they sum to one.
    ///
    /// # Errors
    /// * `VarElimError::DegenerateNormalization` if the values sum to zero
    pub fn normalize(&self) -> Result<Self> {
        let total = self.table.total();
        if total == 0.0 || !total.is_finite() {
            return Err(VarElimError::DegenerateNormalization);
        }

        let values = self.table.values().mapv(|v| v / total);

        Ok(Factor::from_parts(
            self.solution_variables.clone(),
            self.given_variables.clone(),
            Table::from_values(self.num_variables(), values),
            self.solution_evidence.clone(),
            self.given_evidence.clone(),
            self.is_probability
        ))
    }


    /// Permute the columns of the `Factor` into `order`. Every variable of `order` becomes a
    /// solution variable; evidence is kept as is.
    ///
    /// # Errors
    /// * `VarElimError::InvalidScope` if `order` is not a permutation of the scope
    pub(crate) fn reorder(&self, order: &[&str]) -> Result<Self> {
        let axes: Option<Vec<usize>> = order.iter().map(|v| self.position(v)).collect();
        let axes = match axes {
            Some(axes) if axes.len() == self.num_variables() && axes.iter().duplicates().next().is_none() => axes,
            _ => return Err(VarElimError::InvalidScope(
                format!("{:?} does not reorder {:?}", order, self.variables)))
        };

        // axis i of the permuted view is the column of order[i]; iterating it in logical order
        // yields the canonical value column of the new layout
        let values: nd::Array1<f64> = self.table.dense().permuted_axes(axes).iter().cloned().collect();

        Ok(Factor::from_parts(
            order.iter().map(|v| String::from(*v)).collect(),
            vec![],
            Table::from_values(order.len(), values),
            self.solution_evidence.clone(),
            self.given_evidence.clone(),
            self.is_probability
        ))
    }
}


/// Two rows may be multiplied if they agree on every shared variable
fn compatible(shared: &[(usize, usize)], row1: &nd::ArrayView1<Sign>, row2: &nd::ArrayView1<Sign>) -> bool {
    shared.iter().all(|&(i, j)| row1[i] == row2[j])
}


fn without(vars: &[String], var: &str) -> Vec<String> {
    vars.iter().filter(|v| *v != var).cloned().collect()
}


/// Set union of two evidence lists, in first seen order
fn merge(a: &Evidence, b: &Evidence) -> Evidence {
    a.iter().chain(b.iter()).unique().cloned().collect()
}
