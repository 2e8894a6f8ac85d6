//! Defines a `ConditionalInferenceEngine` that uses exact inference by variable elimination to
//! answer conditional inference queries.
//!
//! Implementation of Koller & Friedman Algorithm 9.1 - Sum-Product-VE

use crate::factor::Factor;
use crate::util::{Result, VarElimError};
use crate::variable::Assignment;
use super::ConditionalInferenceEngine;

use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;


pub struct VariableEliminationEngine {

    /// the factors of the network, restricted by the evidence
    factors: Vec<Factor>,

    /// the observed variables
    evidence: Assignment

}


impl VariableEliminationEngine {

    /// Build an engine over `factors` conditioned on `evidence`. Every factor is restricted by
    /// every observation up front; factors that do not mention an observed variable are
    /// unaffected.
    pub fn new(factors: &[Factor], evidence: &Assignment) -> Self {
        let factors: Vec<Factor> = factors.iter().map(|f| f.restrict_all(evidence)).collect();
        debug!(
            "restricted {} factors by evidence {{{}}}",
            factors.len(),
            evidence.iter().map(|(v, s)| format!("{}{}", s, v)).join(", ")
        );

        VariableEliminationEngine { factors, evidence: evidence.clone() }
    }


    /// Every variable still in the scope of some restricted factor, in first seen order
    pub fn variables(&self) -> IndexSet<String> {
        scope_of(&self.factors)
    }


    /// Compute the normalized distribution over `query`, eliminating the variables of `order` in
    /// the given sequence. The variables of the result are `query`, in order.
    ///
    /// Variables of `order` that no factor mentions are skipped. Variables that are neither in
    /// `query` nor in `order` but remain in scope are eliminated afterwards.
    ///
    /// # Errors
    /// * `VarElimError::InvalidScope` if `query` is empty, overlaps `order` or the evidence, or
    ///   names a variable no factor mentions
    /// * `VarElimError::DuplicateVariable` if `query` names a variable twice
    /// * `VarElimError::DegenerateNormalization` if the evidence has probability zero
    pub fn eliminate<S: AsRef<str>>(&self, query: &[S], order: &[S]) -> Result<Factor> {
        let query: Vec<&str> = query.iter().map(|v| v.as_ref()).collect();
        let order: Vec<&str> = order.iter().map(|v| v.as_ref()).collect();
        self.check_query(&query, &order)?;

        let mut phis = self.factors.clone();
        for &var in order.iter() {
            phis = eliminate_var(phis, var);
        }

        let leftover: Vec<String> = scope_of(&phis).into_iter()
                                                   .filter(|v| !query.contains(&v.as_str()))
                                                   .collect();
        if !leftover.is_empty() {
            warn!("variables {:?} were not in the elimination order; eliminating them last", leftover);
            for var in leftover.iter() {
                phis = eliminate_var(phis, var);
            }
        }

        // multiply together remaining phis
        let phi_star = phis.into_iter()
                           .reduce(|acc, phi| acc.product(&phi))
                           .ok_or_else(|| VarElimError::InvalidScope(String::from("no factors to combine")))?;

        // now we have an unnormalized distribution. Normalizing by its sum yields the conditional
        // probability
        let result = phi_star.normalize()?.reorder(&query)?;
        debug!("{} over {:?}", result, result.variables());
        Ok(result)
    }


    /// Compute the normalized distribution over `query`, eliminating every other variable in an
    /// order chosen by the max-cardinality heuristic.
    pub fn eliminate_all<S: AsRef<str>>(&self, query: &[S]) -> Result<Factor> {
        let query: Vec<&str> = query.iter().map(|v| v.as_ref()).collect();
        let order: Vec<String> = max_cardinality_elimination_order(&self.factors)
                                     .into_iter()
                                     .filter(|v| !query.contains(&v.as_str()))
                                     .collect();
        debug!("elimination order {:?}", order);

        self.eliminate(&query, &order.iter().map(|v| v.as_str()).collect::<Vec<&str>>())
    }


    fn check_query(&self, query: &[&str], order: &[&str]) -> Result<()> {
        if query.is_empty() {
            return Err(VarElimError::InvalidScope(String::from("empty query")));
        }

        if let Some(dup) = query.iter().duplicates().next() {
            return Err(VarElimError::DuplicateVariable(String::from(*dup)));
        }

        let scope = self.variables();
        for &var in query.iter() {
            if self.evidence.contains(var) {
                return Err(VarElimError::InvalidScope(format!("query variable {} is observed", var)));
            } else if order.contains(&var) {
                return Err(VarElimError::InvalidScope(format!("query variable {} is to be eliminated", var)));
            } else if !scope.contains(var) {
                return Err(VarElimError::InvalidScope(format!("query variable {} is not in any factor", var)));
            }
        }

        Ok(())
    }
}


impl ConditionalInferenceEngine for VariableEliminationEngine {

    fn infer(&mut self, variables: &[String]) -> Result<Factor> {
        self.eliminate_all(variables)
    }

}


/// Replace every factor that mentions `var` with their product, marginalized over `var`
fn eliminate_var(phis: Vec<Factor>, var: &str) -> Vec<Factor> {
    let (phi_1prime, mut phi_2prime): (Vec<Factor>, Vec<Factor>) = phis.into_iter()
                                                                        .partition(|f| f.contains(var));

    if phi_1prime.is_empty() {
        trace!("no factor mentions {}", var);
        return phi_2prime;
    }

    debug!("eliminating {} from {}", var, phi_1prime.iter().join(" "));

    // product step - multiply factors with var. A single factor is used as is
    let psi = phi_1prime.into_iter().reduce(|acc, phi| acc.product(&phi));

    // sum step - marginalize psi over var
    if let Some(psi) = psi {
        let tau = psi.sum_out(var);
        debug!("{} has {} rows", tau, tau.table().num_rows());
        phi_2prime.push(tau);
    }

    phi_2prime
}


/// Union of the scopes of `factors`, in first seen order
fn scope_of(factors: &[Factor]) -> IndexSet<String> {
    factors.iter().flat_map(|f| f.variables().iter().cloned()).collect()
}


/// Compute the preferred elimination order by the max-cardinality heuristic
fn max_cardinality_elimination_order(factors: &[Factor]) -> Vec<String> {
    // since we do not explictly hold the graph structure, we need to determine the neighbors of
    // each variable.
    let mut neighbors: IndexMap<String, IndexSet<String>> = scope_of(factors).into_iter()
                                                                             .map(|v| (v, IndexSet::new()))
                                                                             .collect();

    for f in factors.iter() {
        for (vi, vj) in f.variables().iter().tuple_combinations() {
            if let Some(n) = neighbors.get_mut(vi) {
                n.insert(vj.clone());
            }
            if let Some(n) = neighbors.get_mut(vj) {
                n.insert(vi.clone());
            }
        }
    }

    // set of marked variables
    let mut marked: IndexSet<String> = IndexSet::new();
    // the (reverse) elimination order
    let mut elimination = Vec::new();

    for _ in 0..neighbors.len() {
        // the unmarked variable with the most marked neighbors. Ties go to the first seen
        let next = neighbors.iter()
                            .filter(|&(v, _)| !marked.contains(v))
                            .map(|(v, ns)| (v, ns.iter().filter(|&n| marked.contains(n)).count()))
                            .fold(None, |best: Option<(&String, usize)>, (v, ct)| match best {
                                Some((_, max)) if ct <= max => best,
                                _ => Some((v, ct))
                            });

        if let Some((v, _)) = next {
            let v = v.clone();
            elimination.push(v.clone());
            marked.insert(v);
        }
    }

    // we need to reverse the elimination order before returning
    elimination.reverse();
    elimination
}
