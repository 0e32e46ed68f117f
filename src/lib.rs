// Kindred: relationship graphs and overlap analysis for social-network exports
//
// This is the library root. The analysis core (identity, ingest, graph,
// overlap, pipeline) works on in-memory data only; discovery and output are
// the filesystem-facing collaborators used by the CLI.

pub mod config;
pub mod discovery;
pub mod error;
pub mod graph;
pub mod identity;
pub mod ingest;
pub mod output;
pub mod overlap;
pub mod pipeline;
