//! The tabular representation of a `Factor`.
//!
//! A table over `k` variables has one row per full assignment, `2^k` in total, generated in
//! canonical order: column `i` alternates `+`/`-` in runs of `2^(k-i-1)` rows, so the leftmost
//! variable is the most significant bit of the row index. With `Positive` as the 0 bit, the value
//! column read in row-major order over the shape `[2; k]` is exactly an n-dimensional array
//! whose axis `i` belongs to variable `i`. The factor operations rely on that view.

use crate::util::{Result, VarElimError};
use crate::variable::Sign;

use ndarray::prelude as nd;


#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    /// One column per variable, one row per assignment
    signs: nd::Array2<Sign>,

    /// The trailing value column
    values: nd::Array1<f64>
}


impl Table {

    /// Generate the sign grid for `num_vars` variables in canonical row order.
    pub fn skeleton(num_vars: usize) -> nd::Array2<Sign> {
        let num_rows = 1usize << num_vars;
        let mut grid = nd::Array2::from_elem((num_rows, num_vars), Sign::Positive);

        for (i, mut column) in grid.axis_iter_mut(nd::Axis(1)).enumerate() {
            // ++++---- for the first of three columns, +-+-+-+- for the last
            let run = 1usize << (num_vars - i - 1);
            for (row, cell) in column.iter_mut().enumerate() {
                *cell = Sign::from_index((row / run) % 2);
            }
        }

        grid
    }


    /// Create a table over `num_vars` variables holding `values` in canonical row order.
    ///
    /// # Errors
    /// * `VarElimError::MalformedInput` if there is not exactly one value per row
    /// * `VarElimError::NonPositiveProbability` if a value is negative or not finite
    pub fn new(num_vars: usize, values: Vec<f64>) -> Result<Self> {
        let expected = 1usize << num_vars;
        if values.len() != expected {
            return Err(VarElimError::MalformedInput { expected, found: values.len() });
        }

        if values.iter().any(|&v| !v.is_finite() || v < 0.0) {
            return Err(VarElimError::NonPositiveProbability);
        }

        Ok(Table::from_values(num_vars, nd::Array1::from(values)))
    }


    /// Wrap an already computed value column. The caller guarantees it has `2^num_vars` entries.
    pub(crate) fn from_values(num_vars: usize, values: nd::Array1<f64>) -> Self {
        debug_assert_eq!(values.len(), 1usize << num_vars);
        Table { signs: Table::skeleton(num_vars), values }
    }


    /// Number of rows, `2^k`
    pub fn num_rows(&self) -> usize {
        self.values.len()
    }


    /// Number of variable columns, `k`. The full grid has one more column for the values.
    pub fn num_vars(&self) -> usize {
        self.signs.ncols()
    }


    pub fn signs(&self) -> nd::ArrayView2<Sign> {
        self.signs.view()
    }


    pub fn values(&self) -> nd::ArrayView1<f64> {
        self.values.view()
    }


    pub fn value(&self, row: usize) -> f64 {
        self.values[row]
    }


    /// Iterate over `(signs, value)` for every row, in canonical order
    pub fn rows(&self) -> impl Iterator<Item = (nd::ArrayView1<Sign>, f64)> {
        self.signs.outer_iter().zip(self.values.iter().cloned())
    }


    /// Sum of the value column
    pub fn total(&self) -> f64 {
        self.values.sum()
    }


    /// Export the full `2^k x (k + 1)` grid. Sign cells are encoded with `Sign::tag`.
    pub fn to_array(&self) -> nd::Array2<f64> {
        let k = self.num_vars();
        let mut grid = nd::Array2::zeros((self.num_rows(), k + 1));

        for (mut out, (signs, value)) in grid.outer_iter_mut().zip(self.rows()) {
            for (cell, s) in out.iter_mut().zip(signs.iter()) {
                *cell = s.tag();
            }
            out[k] = value;
        }

        grid
    }


    /// View the value column as an n-dimensional array with one length-2 axis per variable.
    pub(crate) fn dense(&self) -> nd::ArrayViewD<f64> {
        let shape = vec![2usize; self.num_vars()];
        // the value column is contiguous and holds exactly 2^k entries
        self.values.view().into_shape(shape).expect("table does not hold 2^k values")
    }
}


/// The row of a canonical table holding the given signs, listed in column order.
pub fn canonical_index<I>(signs: I) -> usize
    where I: IntoIterator<Item = Sign>
{
    signs.into_iter().fold(0, |idx, s| (idx << 1) | s.index())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skeleton_shape() {
        for k in 0..6 {
            let grid = Table::skeleton(k);
            assert_eq!((1 << k, k), grid.dim());
        }
    }

    #[test]
    fn skeleton_runs() {
        let grid = Table::skeleton(3);
        let col = |c: usize| -> String {
            grid.column(c).iter().map(|s| s.prefix()).collect()
        };

        assert_eq!("++++----", col(0));
        assert_eq!("++--++--", col(1));
        assert_eq!("+-+-+-+-", col(2));
    }

    #[test]
    fn index_matches_rows() {
        let grid = Table::skeleton(4);
        for (r, row) in grid.outer_iter().enumerate() {
            assert_eq!(r, canonical_index(row.iter().cloned()));
        }
    }

    #[test]
    fn new_errs() {
        match Table::new(2, vec![0.1, 0.2, 0.3]) {
            Err(VarElimError::MalformedInput { expected, found }) => {
                assert_eq!(4, expected);
                assert_eq!(3, found);
            },
            _ => panic!("accepted the wrong number of values")
        };

        assert_eq!(Err(VarElimError::NonPositiveProbability), Table::new(1, vec![0.5, -0.5]));
        assert_eq!(Err(VarElimError::NonPositiveProbability), Table::new(1, vec![0.5, std::f64::NAN]));
    }

    #[test]
    fn to_array() {
        let t = Table::new(1, vec![0.25, 0.75]).unwrap();
        let grid = t.to_array();

        assert_eq!((2, 2), grid.dim());
        assert_eq!(nd::arr2(&[[1.0, 0.25], [-1.0, 0.75]]), grid);
        assert!((t.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn dense_axes() {
        let t = Table::new(2, vec![1., 2., 3., 4.]).unwrap();
        let d = t.dense();

        // axis 0 is the first variable
        assert_eq!(2., d[nd::IxDyn(&[0, 1])]);
        assert_eq!(3., d[nd::IxDyn(&[1, 0])]);
    }
}
