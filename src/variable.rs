//! Definition of the variable module
//!
//! Every random variable handled by this crate is boolean and is identified by its name. A
//! `Sign` is one of the two outcomes of such a variable and an `Assignment` maps variable names
//! to outcomes.

use crate::util::{Result, VarElimError};

use indexmap::IndexMap;
use indexmap::map::Iter;

use std::fmt;


/// The outcome of a boolean random variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sign {
    /// The variable holds (`+x`)
    Positive,

    /// The variable does not hold (`-x`)
    Negative
}

impl Sign {

    /// Both outcomes, in canonical order.
    pub const ALL: [Sign; 2] = [Sign::Positive, Sign::Negative];

    /// The position of this outcome along a table axis. `Positive` always comes first.
    pub fn index(self) -> usize {
        match self {
            Sign::Positive => 0,
            Sign::Negative => 1
        }
    }

    /// Inverse of `Sign::index`. Any nonzero index is `Negative`.
    pub fn from_index(idx: usize) -> Sign {
        if idx == 0 { Sign::Positive } else { Sign::Negative }
    }

    /// The prefix used when rendering an outcome: `+` or `-`
    pub fn prefix(self) -> char {
        match self {
            Sign::Positive => '+',
            Sign::Negative => '-'
        }
    }

    /// The numeric tag of this outcome when a table is exported as a plain numeric grid.
    pub fn tag(self) -> f64 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0
        }
    }
}

impl From<bool> for Sign {
    fn from(b: bool) -> Self {
        if b { Sign::Positive } else { Sign::Negative }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}


/// A (partial) assignment of outcomes to named variables. Insertion order is preserved, which
/// keeps the evidence of a query in the order the caller supplied it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Assignment {
    values: IndexMap<String, Sign>
}

impl Assignment {

    pub fn new() -> Self {
        Assignment { values: IndexMap::new() }
    }

    /// Build an `Assignment` from `(name, sign)` pairs.
    ///
    /// # Errors
    /// * `VarElimError::ConflictingEvidence` if a variable appears with both signs
    pub fn from_pairs<S: AsRef<str>>(pairs: &[(S, Sign)]) -> Result<Self> {
        let mut assn = Assignment::new();
        for &(ref name, sign) in pairs.iter() {
            assn.observe(name.as_ref(), sign)?;
        }
        Ok(assn)
    }

    /// Set the value of a variable, overwriting any previous value
    pub fn set(&mut self, var: &str, sign: Sign) {
        self.values.insert(String::from(var), sign);
    }

    /// Set the value of a variable, refusing to overwrite a previous, different value.
    pub fn observe(&mut self, var: &str, sign: Sign) -> Result<()> {
        match self.values.get(var) {
            Some(&prev) if prev != sign => Err(VarElimError::ConflictingEvidence(String::from(var))),
            _ => {
                self.set(var, sign);
                Ok(())
            }
        }
    }

    pub fn get(&self, var: &str) -> Option<Sign> {
        self.values.get(var).cloned()
    }

    pub fn contains(&self, var: &str) -> bool {
        self.values.contains_key(var)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> Iter<String, Sign> {
        self.values.iter()
    }

    /// The names of the assigned variables, in insertion order
    pub fn variables(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type Item = (&'a String, &'a Sign);
    type IntoIter = Iter<'a, String, Sign>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}


/// Enumerate every full assignment to `scope` in canonical order: the first variable is the
/// most significant and `Positive` precedes `Negative`.
pub fn all_assignments(scope: &[String]) -> impl Iterator<Item = Assignment> {
    let scope = scope.to_vec();
    let k = scope.len();

    (0..(1usize << k)).map(move |row| {
        let mut assn = Assignment::new();
        for (i, var) in scope.iter().enumerate() {
            assn.set(var, Sign::from_index((row >> (k - i - 1)) & 1));
        }
        assn
    })
}
