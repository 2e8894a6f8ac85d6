//! Defines the `Error` type for the varelim library

use std::result;

use thiserror::Error;

pub type Result<T> = result::Result<T, VarElimError>;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum VarElimError {

    /// Represents an incomplete assignment where a complete assignment was required.
    #[error("missing assignments to the required variables")]
    IncompleteAssignment,

    /// Represents an error where a certain constraint on a scope was not satisfied
    #[error("provided scope did not satisfy constraints: {0}")]
    InvalidScope(String),

    /// Represents a variable that was present multiple times in a situation where it should only
    /// have been present once
    #[error("variable {0} was encountered twice")]
    DuplicateVariable(String),

    /// The number of values supplied for a table did not match the number of rows generated for
    /// its variables
    #[error("expected {expected} table values, found {found}")]
    MalformedInput { expected: usize, found: usize },

    /// The values of a `Factor` summed to zero, so there is no distribution to normalize to
    #[error("cannot normalize a factor whose values sum to zero")]
    DegenerateNormalization,

    /// Represents a situation in which a negative or non-finite probability was provided
    #[error("encountered a negative or non-finite probability")]
    NonPositiveProbability,

    /// The same variable was observed with both signs
    #[error("variable {0} was observed with conflicting values")]
    ConflictingEvidence(String),

    /// No scenario is registered under the requested name
    #[error("unknown scenario: {0}")]
    UnknownScenario(String)

}
