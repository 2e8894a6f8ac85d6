//! Defines the `Sampler` trait - an object that can randomly sample from a network of `Factor`s.

use crate::variable::{Assignment, Sign};

pub mod forward;

pub use self::forward::ForwardSampler;

pub trait Sampler {

    /// Draw a full assignment to the network.
    fn sample(&mut self) -> Assignment;

    /// Draw `n` full assignments.
    fn samples(&mut self, n: usize) -> Vec<Assignment> {
        (0..n).map(|_| self.sample()).collect()
    }

}


/// The fraction of `samples` consistent with `evidence` in which `var` is positive.
///
/// # Returns
/// `None` if no sample is consistent with `evidence` or `var` is never assigned.
pub fn frequency(samples: &[Assignment], var: &str, evidence: &Assignment) -> Option<f64> {
    let consistent: Vec<&Assignment> = samples.iter()
                                              .filter(|s| evidence.iter().all(|(v, &e)| s.get(v) == Some(e)))
                                              .filter(|s| s.contains(var))
                                              .collect();

    if consistent.is_empty() {
        return None;
    }

    let positive = consistent.iter().filter(|s| s.get(var) == Some(Sign::Positive)).count();
    Some(positive as f64 / consistent.len() as f64)
}
