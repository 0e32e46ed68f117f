// Errors the analysis core can surface to its caller.
//
// Parsing never fails (bad data degrades to empty sets) and PageRank
// non-convergence is reported through the centrality report, so the only
// hard failure is an input set that claims the same person twice.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// Two input groups (or two ego graphs) share a person key.
    #[error("duplicate person key `{0}`: each person must appear in exactly one input group")]
    DuplicatePerson(String),
}
