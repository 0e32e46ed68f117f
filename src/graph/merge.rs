// Graph merging — union of ego graphs into one combined graph.
//
// Accounts and topics shared between people collapse onto one node because
// nodes are keyed by (kind, id). Person nodes are the exception: two inputs
// claiming the same ego key would silently fuse two people, so it is an error.

use std::collections::BTreeSet;

use tracing::info;

use super::model::SocialGraph;
use crate::error::AnalysisError;

/// Merge ego graphs into one graph.
///
/// Runs after every ego graph is built; the node map is only written here.
pub fn merge_graphs<'a, I>(graphs: I) -> Result<SocialGraph, AnalysisError>
where
    I: IntoIterator<Item = &'a SocialGraph>,
{
    let mut merged = SocialGraph::new();
    let mut seen_persons: BTreeSet<String> = BTreeSet::new();
    let mut inputs = 0usize;

    for graph in graphs {
        for person in graph.persons() {
            if !seen_persons.insert(person.key.id.clone()) {
                return Err(AnalysisError::DuplicatePerson(person.key.id.clone()));
            }
        }
        merged.absorb(graph);
        inputs += 1;
    }

    info!(
        graphs = inputs,
        nodes = merged.node_count(),
        edges = merged.edge_count(),
        "Merged ego graphs"
    );

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ego::build_ego_graph;
    use crate::graph::model::{Direction, EdgeKind, NodeKey};
    use crate::ingest::profile::PersonProfile;

    #[test]
    fn test_shared_account_becomes_one_node() {
        let mut a = PersonProfile::empty("ana");
        a.following.insert("x".to_string());
        let mut b = PersonProfile::empty("ben");
        b.followers.insert("x".to_string());

        let merged = merge_graphs(&[build_ego_graph(&a), build_ego_graph(&b)]).unwrap();
        let x = NodeKey::account("x");
        assert_eq!(merged.node_count(), 3);
        let edges: Vec<_> = merged.edges_of(&x).map(|e| e.kind).collect();
        assert_eq!(edges.len(), 2);
        assert!(edges.contains(&EdgeKind::Follows(Direction::Outbound)));
        assert!(edges.contains(&EdgeKind::Follows(Direction::Inbound)));
    }

    #[test]
    fn test_duplicate_person_is_rejected() {
        let g = build_ego_graph(&PersonProfile::empty("ana"));
        let err = merge_graphs(&[g.clone(), g]).unwrap_err();
        assert_eq!(err, AnalysisError::DuplicatePerson("ana".to_string()));
    }

    #[test]
    fn test_merge_of_nothing_is_empty() {
        let merged = merge_graphs(std::iter::empty::<&SocialGraph>()).unwrap();
        assert_eq!(merged.node_count(), 0);
    }
}
