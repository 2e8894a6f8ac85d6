//! Defines a simple forward sampler for Bayesian networks
//!
//! Implementation of Koller & Friedman Algorithm 12.1 (pp 489)

use crate::factor::Factor;
use crate::util::{Result, VarElimError};
use crate::variable::{Assignment, Sign};
use super::Sampler;

use rand::{Rng, SeedableRng};
use rand::rngs::{StdRng, ThreadRng};


/// A `Sampler` over a list of source conditional probability tables
pub struct ForwardSampler<'a, R: Rng> {

    /// The CPDs of the network in topological order
    order: Vec<&'a Factor>,

    rng: R
}


impl<'a> ForwardSampler<'a, ThreadRng> {

    pub fn new(factors: &'a [Factor]) -> Result<Self> {
        ForwardSampler::with_rng(factors, rand::thread_rng())
    }
}


impl<'a> ForwardSampler<'a, StdRng> {

    /// A reproducible sampler
    pub fn seeded(factors: &'a [Factor], seed: u64) -> Result<Self> {
        ForwardSampler::with_rng(factors, StdRng::seed_from_u64(seed))
    }
}


impl<'a, R: Rng> ForwardSampler<'a, R> {

    /// Create a sampler drawing from `factors` with `rng`.
    ///
    /// # Errors
    /// * `VarElimError::InvalidScope` if a factor does not have exactly one solution variable,
    ///   if a given variable has no factor of its own, or if the factors form a cycle
    /// * `VarElimError::DegenerateNormalization` if some parent assignment has no mass
    pub fn with_rng(factors: &'a [Factor], rng: R) -> Result<Self> {
        for f in factors.iter() {
            if f.solution_variables().len() != 1 || f.num_variables() != f.given_variables().len() + 1 {
                return Err(VarElimError::InvalidScope(format!("{} is not a CPD over one variable", f)));
            }

            // every parent assignment needs mass to draw from
            let mass = f.sum_out(&f.solution_variables()[0]);
            if mass.table().values().iter().any(|&v| v <= 0.0) {
                return Err(VarElimError::DegenerateNormalization);
            }
        }

        let order = topological_order(factors)?;
        Ok(ForwardSampler { order, rng })
    }


    fn get_sample(&mut self) -> Assignment {
        let mut a = Assignment::new();

        for cpd in self.order.iter() {
            // this cannot fail, because we iterate in topological order so each variable will get
            // a full assignment to its parents
            let var = &cpd.solution_variables()[0];

            a.set(var, Sign::Positive);
            let pos = cpd.value(&a).unwrap_or(0.0);
            a.set(var, Sign::Negative);
            let neg = cpd.value(&a).unwrap_or(0.0);

            let p = pos / (pos + neg);
            a.set(var, Sign::from(self.rng.gen::<f64>() < p));
        }

        a
    }
}


impl<'a, R: Rng> Sampler for ForwardSampler<'a, R> {

    fn sample(&mut self) -> Assignment {
        self.get_sample()
    }

}


/// Order the factors so that every factor comes after the factors of its given variables
fn topological_order(factors: &[Factor]) -> Result<Vec<&Factor>> {
    let mut sampled: Vec<&str> = Vec::new();
    let mut order: Vec<&Factor> = Vec::with_capacity(factors.len());
    let mut remaining: Vec<&Factor> = factors.iter().collect();

    while !remaining.is_empty() {
        let (ready, waiting): (Vec<&Factor>, Vec<&Factor>) = remaining.into_iter().partition(|f| {
            f.given_variables().iter().all(|v| sampled.contains(&v.as_str()))
        });

        if ready.is_empty() {
            let stuck = waiting.iter().map(|f| f.to_string()).collect::<Vec<String>>();
            return Err(VarElimError::InvalidScope(format!("no topological order for {:?}", stuck)));
        }

        for f in ready.into_iter() {
            sampled.push(f.solution_variables()[0].as_str());
            order.push(f);
        }
        remaining = waiting;
    }

    Ok(order)
}
