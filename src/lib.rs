extern crate indexmap;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate ndarray;
extern crate rand;
extern crate thiserror;

pub mod variable;
pub mod factor;
pub mod inference;
pub mod render;
pub mod samplers;
pub mod scenarios;
pub mod util;
pub use util::{Result, VarElimError};
pub use variable::{all_assignments, Assignment, Sign};
pub use factor::{Factor, Table};
pub use inference::{infer, ConditionalInferenceEngine, VariableEliminationEngine};
pub use render::TableDisplay;
