// Analysis pipeline — one synchronous pass from raw records to every result.
//
//   records -> profiles -> ego graphs -> merged graph -> centrality, roles
//                       \-> overlaps, shared entities, similarity
//
// Each run recomputes everything; nothing is cached between invocations.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::AnalysisError;
use crate::graph::centrality::{self, CentralityReport, PageRankConfig};
use crate::graph::ego::build_ego_graph;
use crate::graph::merge::merge_graphs;
use crate::graph::model::SocialGraph;
use crate::graph::roles::{node_roles, NodeRole};
use crate::ingest::profile::{build_profiles, PersonInput, PersonProfile};
use crate::overlap::{analyze_overlaps, OverlapReport};

/// One person's ego graph and its centrality.
#[derive(Debug, Clone, Serialize)]
pub struct EgoAnalysis {
    pub person_key: String,
    pub graph: SocialGraph,
    pub centrality: CentralityReport,
}

/// Everything derived from one set of inputs.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Sorted by person key
    pub profiles: Vec<PersonProfile>,
    /// Same order as `profiles`
    pub egos: Vec<EgoAnalysis>,
    pub merged: SocialGraph,
    pub merged_centrality: CentralityReport,
    pub roles: Vec<NodeRole>,
    pub overlaps: OverlapReport,
}

impl Analysis {
    pub fn profile(&self, person_key: &str) -> Option<&PersonProfile> {
        self.profiles.iter().find(|p| p.person_key == person_key)
    }

    pub fn ego(&self, person_key: &str) -> Option<&EgoAnalysis> {
        self.egos.iter().find(|e| e.person_key == person_key)
    }
}

/// Fail if two inputs claim the same person key.
fn check_unique_people(inputs: &[PersonInput]) -> Result<(), AnalysisError> {
    let mut seen = BTreeSet::new();
    for input in inputs {
        if !seen.insert(input.person_key.as_str()) {
            return Err(AnalysisError::DuplicatePerson(input.person_key.clone()));
        }
    }
    Ok(())
}

/// Run the full analysis.
pub fn analyze(inputs: &[PersonInput], pagerank: &PageRankConfig) -> Result<Analysis, AnalysisError> {
    check_unique_people(inputs)?;

    let mut profiles = build_profiles(inputs);
    profiles.sort_by(|a, b| a.person_key.cmp(&b.person_key));
    info!(people = profiles.len(), "Built profiles");

    // Every ego graph is finished before the merge touches any of them
    let egos: Vec<EgoAnalysis> = profiles
        .iter()
        .map(|profile| {
            let graph = build_ego_graph(profile);
            let centrality = centrality::compute(&graph, pagerank);
            debug!(
                person = %profile.person_key,
                nodes = graph.node_count(),
                edges = graph.edge_count(),
                "Built ego graph"
            );
            EgoAnalysis {
                person_key: profile.person_key.clone(),
                graph,
                centrality,
            }
        })
        .collect();

    let merged = merge_graphs(egos.iter().map(|e| &e.graph))?;
    let merged_centrality = centrality::compute(&merged, pagerank);
    if !merged_centrality.pagerank_converged {
        warn!("PageRank on the merged graph did not converge; scores are zero");
    }
    let roles = node_roles(&merged);
    let overlaps = analyze_overlaps(&profiles);

    info!(
        nodes = merged.node_count(),
        edges = merged.edge_count(),
        shared_entities = overlaps.shared_entities.len(),
        "Analysis complete"
    );

    Ok(Analysis {
        profiles,
        egos,
        merged,
        merged_centrality,
        roles,
        overlaps,
    })
}
