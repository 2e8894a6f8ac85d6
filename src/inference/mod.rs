//! Defines the interface to inference engines

use crate::factor::Factor;
use crate::util::Result;
use crate::variable::{Assignment, Sign};

mod variable_elimination;

pub use self::variable_elimination::VariableEliminationEngine;


/// A `ConditionalInferenceEngine` is capable of answering Conditional Probability Queries of the form:
///     ```P(Y | E = e)```
///
/// `ConditionalInferenceEngine`s are stateful and must take the evidence `e` as an argument to whatever
/// construction mechanism they employ.
pub trait ConditionalInferenceEngine {

    /// Infer the joint distribution ```P(variables | evidence)```
    fn infer(&mut self, variables: &[String]) -> Result<Factor>;

}


/// Compute ```P(query | evidence)``` from the source `factors` by eliminating `hidden` in the
/// given order.
///
/// # Returns
/// a normalized `Factor` over the query variables
///
/// # Errors
/// * `VarElimError::ConflictingEvidence` if a variable is observed with both signs
/// * `VarElimError::InvalidScope` if the query is not answerable from the factors
/// * `VarElimError::DegenerateNormalization` if the evidence has probability zero
pub fn infer<S: AsRef<str>>(factors: &[Factor],
                            query: &[S],
                            hidden: &[S],
                            evidence: &[(S, Sign)]) -> Result<Factor>
{
    let evidence = Assignment::from_pairs(evidence)?;
    VariableEliminationEngine::new(factors, &evidence).eliminate(query, hidden)
}


#[cfg(test)]
/// Tests for the inference engines in this module, run against the credit card fraud network.
/// The expected values were computed by enumerating the full joint distribution.
mod tests {
    use super::*;
    use crate::scenarios::{self, Parameters};

    fn positive(f: &Factor) -> f64 {
        let mut assn = Assignment::new();
        assn.set(&f.variables()[0], Sign::Positive);
        f.value(&assn).unwrap()
    }

    fn assert_distribution(f: &Factor) {
        assert_eq!(2, f.table().num_rows());
        assert!((f.table().total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn fraud_prior() {
        let factors = scenarios::fraud_network(Parameters::Textbook).unwrap();
        let f = infer(&factors, &["Fraud"], &["Trav", "FP", "IP", "OC", "CRP"], &[]).unwrap();

        assert_eq!(vec!["Fraud"], f.variables());
        assert_distribution(&f);
        // 0.05 * 0.05 + 0.95 * 0.01
        assert!((positive(&f) - 0.012).abs() < 1e-9);
        assert!((f.table().value(1) - 0.988).abs() < 1e-9);
    }

    #[test]
    fn investigation_given_evidence() {
        let factors = scenarios::fraud_network(Parameters::Textbook).unwrap();
        let evidence = [("FP", Sign::Positive), ("Trav", Sign::Negative), ("CRP", Sign::Positive)];
        let f = infer(&factors, &["IP"], &["Fraud", "OC"], &evidence).unwrap();

        assert_eq!(vec!["IP"], f.variables());
        assert_distribution(&f);
        assert!((positive(&f) - 0.774065).abs() < 1e-5);
    }

    #[test]
    fn every_scenario() {
        let expected = [0.012, 0.774065, 0.052632, 0.059932];

        for (query, &p) in scenarios::queries().iter().zip(expected.iter()) {
            let f = query.run(&scenarios::fraud_network(Parameters::Textbook).unwrap()).unwrap();
            assert_distribution(&f);
            assert!((positive(&f) - p).abs() < 1e-5, "scenario {}", query.number);
        }
    }

    #[test]
    fn realistic_prior() {
        let factors = scenarios::fraud_network(Parameters::Realistic).unwrap();
        let f = infer(&factors, &["Fraud"], &["Trav", "FP", "IP", "OC", "CRP"], &[]).unwrap();

        // 0.10 * 0.02 + 0.90 * 0.005
        assert!((positive(&f) - 0.0065).abs() < 1e-9);
    }

    #[test]
    fn engine_order_matches_caller_order() {
        let factors = scenarios::fraud_network(Parameters::Textbook).unwrap();

        for query in scenarios::queries().iter() {
            let by_caller = query.run(&factors).unwrap();

            let evidence = Assignment::from_pairs(&query.evidence).unwrap();
            let mut engine = VariableEliminationEngine::new(&factors, &evidence);
            let variables: Vec<String> = query.query.iter().map(|v| String::from(*v)).collect();

            // the result should be the same on subsequent iterations
            for _ in 0..3 {
                let by_engine = engine.infer(&variables).unwrap();
                assert_eq!(by_caller.variables(), by_engine.variables());
                for i in 0..2 {
                    assert!((by_caller.table().value(i) - by_engine.table().value(i)).abs() < 1e-12);
                }
            }
        }
    }

    #[test]
    fn joint_query() {
        let factors = scenarios::fraud_network(Parameters::Textbook).unwrap();
        let f = infer(&factors, &["CRP", "OC"], &["Trav", "Fraud", "FP", "IP"], &[]).unwrap();

        assert_eq!(vec!["CRP", "OC"], f.variables());
        assert_eq!(4, f.table().num_rows());
        assert!((f.table().total() - 1.0).abs() < 1e-9);

        // +crp+oc, +crp-oc, -crp+oc, -crp-oc
        let expected = [0.63, 0.02, 0.27, 0.08];
        for (i, &p) in expected.iter().enumerate() {
            assert!((f.table().value(i) - p).abs() < 1e-9);
        }

        let mut assn = Assignment::new();
        assn.set("OC", Sign::Negative);
        assn.set("CRP", Sign::Positive);
        assert!((f.value(&assn).unwrap() - 0.02).abs() < 1e-9);
    }

    #[test]
    fn duplicate_query() {
        let factors = scenarios::fraud_network(Parameters::Textbook).unwrap();

        assert_eq!(
            Err(crate::util::VarElimError::DuplicateVariable(String::from("Fraud"))),
            infer(&factors, &["Fraud", "Fraud"], &["Trav", "FP", "IP", "OC", "CRP"], &[])
        );
    }

    #[test]
    fn conflicting_evidence() {
        let factors = scenarios::fraud_network(Parameters::Textbook).unwrap();
        let evidence = [("FP", Sign::Positive), ("FP", Sign::Negative)];

        assert!(infer(&factors, &["Fraud"], &["Trav"], &evidence).is_err());
    }
}
