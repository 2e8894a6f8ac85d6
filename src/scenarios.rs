//! The credit card fraud network and the queries run against it.
//!
//! Variables: `Trav` (the card holder is travelling), `Fraud` (the transaction is fraudulent),
//! `FP` (a foreign purchase), `OC` (the holder owns a computer), `CRP` (a computer related
//! purchase was made recently) and `IP` (the purchase was made over the internet).

use crate::factor::Factor;
use crate::inference;
use crate::util::{Result, VarElimError};
use crate::variable::Sign;


/// The probability tables used to parameterize the network
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parameters {
    /// The textbook values
    Textbook,

    /// Values tuned towards observed fraud rates
    Realistic
}


/// Build the source factors of the fraud network.
pub fn fraud_network(parameters: Parameters) -> Result<Vec<Factor>> {
    match parameters {
        Parameters::Textbook => Ok(vec![
            Factor::cpd(&["Trav"], &[], vec![0.05, 0.95])?,
            Factor::cpd(&["Fraud"], &["Trav"], vec![0.05, 0.95, 0.01, 0.99])?,
            Factor::cpd(&["OC"], &[], vec![0.9, 0.1])?,
            Factor::cpd(&["CRP"], &["OC"], vec![0.7, 0.3, 0.2, 0.8])?,
            Factor::cpd(&["FP"], &["Trav", "Fraud"], vec![0.95, 0.05, 0.9, 0.1, 0.1, 0.9, 0.01, 0.99])?,
            Factor::cpd(&["IP"], &["OC", "Fraud"], vec![0.1, 0.9, 0.85, 0.15, 0.05, 0.95, 0.6, 0.4])?
        ]),
        Parameters::Realistic => Ok(vec![
            Factor::cpd(&["Trav"], &[], vec![0.10, 0.90])?,
            // fraud is more likely while travelling
            Factor::cpd(&["Fraud"], &["Trav"], vec![0.02, 0.98, 0.005, 0.995])?,
            Factor::cpd(&["OC"], &[], vec![0.95, 0.05])?,
            Factor::cpd(&["CRP"], &["OC"], vec![0.80, 0.20, 0.30, 0.70])?,
            Factor::cpd(&["FP"], &["Trav", "Fraud"], vec![0.98, 0.02, 0.20, 0.80, 0.95, 0.05, 0.03, 0.97])?,
            Factor::cpd(&["IP"], &["OC", "Fraud"], vec![0.05, 0.95, 0.01, 0.99, 0.90, 0.10, 0.40, 0.60])?
        ])
    }
}


/// A query against the fraud network
#[derive(Clone, Debug)]
pub struct Query {
    pub number: u32,
    pub description: &'static str,
    pub query: Vec<&'static str>,
    pub hidden: Vec<&'static str>,
    pub evidence: Vec<(&'static str, Sign)>
}

impl Query {

    /// Answer the query by variable elimination over `factors`
    pub fn run(&self, factors: &[Factor]) -> Result<Factor> {
        inference::infer(factors, &self.query, &self.hidden, &self.evidence)
    }
}


/// Every registered query, in order
pub fn queries() -> Vec<Query> {
    vec![
        Query {
            number: 1,
            description: "prior probability of fraud",
            query: vec!["Fraud"],
            hidden: vec!["Trav", "FP", "IP", "OC", "CRP"],
            evidence: vec![]
        },
        Query {
            number: 2,
            description: "internet purchase given a foreign purchase at home and a recent computer purchase",
            query: vec!["IP"],
            hidden: vec!["Fraud", "OC"],
            evidence: vec![("FP", Sign::Positive), ("Trav", Sign::Negative), ("CRP", Sign::Positive)]
        },
        Query {
            number: 3,
            description: "fraud given a foreign purchase while travelling",
            query: vec!["Fraud"],
            hidden: vec!["IP", "OC", "CRP"],
            evidence: vec![("FP", Sign::Positive), ("Trav", Sign::Positive)]
        },
        Query {
            number: 4,
            description: "fraud given a foreign purchase by a computer owner",
            query: vec!["Fraud"],
            hidden: vec!["IP", "Trav", "CRP"],
            evidence: vec![("FP", Sign::Positive), ("OC", Sign::Positive)]
        }
    ]
}


/// Look up a registered query by number
pub fn query(number: u32) -> Result<Query> {
    queries().into_iter()
             .find(|q| q.number == number)
             .ok_or_else(|| VarElimError::UnknownScenario(number.to_string()))
}
