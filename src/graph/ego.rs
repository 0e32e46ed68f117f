// Ego graph construction — one person's direct relationships as a graph.
//
//   follower   account -> person   Follows(Inbound)
//   following  person  -> account  Follows(Outbound)
//   topic      person  -> topic    HasTopic
//
// An account that is both follower and followed gets both edges. Mutuality
// is derived later from the edge set, never stored.

use super::model::{Direction, EdgeKind, NodeKey, SocialGraph};
use crate::ingest::profile::PersonProfile;

/// Build the ego graph for one profile.
pub fn build_ego_graph(profile: &PersonProfile) -> SocialGraph {
    let mut graph = SocialGraph::new();
    let ego = NodeKey::person(&profile.person_key);
    graph.add_node(ego.clone(), profile.person_key.clone());

    for account in &profile.followers {
        graph.add_node(NodeKey::account(account), account.clone());
        graph.add_edge(
            NodeKey::account(account),
            ego.clone(),
            EdgeKind::Follows(Direction::Inbound),
        );
    }

    for account in &profile.following {
        graph.add_node(NodeKey::account(account), account.clone());
        graph.add_edge(
            ego.clone(),
            NodeKey::account(account),
            EdgeKind::Follows(Direction::Outbound),
        );
    }

    for topic in &profile.topics {
        graph.add_node(NodeKey::topic(topic), topic.clone());
        graph.add_edge(ego.clone(), NodeKey::topic(topic), EdgeKind::HasTopic);
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::model::NodeKind;

    fn profile() -> PersonProfile {
        let mut p = PersonProfile::empty("Ana");
        p.followers.extend(["bob".to_string(), "carol".to_string()]);
        p.following.extend(["bob".to_string(), "dave".to_string()]);
        p.topics.insert("music".to_string());
        p
    }

    #[test]
    fn test_node_counts() {
        let g = build_ego_graph(&profile());
        assert_eq!(g.persons().count(), 1);
        assert_eq!(g.nodes().filter(|n| n.kind() == NodeKind::Account).count(), 3);
        assert_eq!(g.nodes().filter(|n| n.kind() == NodeKind::Topic).count(), 1);
    }

    #[test]
    fn test_mutual_account_has_two_edges() {
        let g = build_ego_graph(&profile());
        let bob = NodeKey::account("bob");
        let ego = NodeKey::person("Ana");
        assert_eq!(g.edges_of(&bob).count(), 2);
        assert!(g.has_edge(&bob, &ego));
        assert!(g.has_edge(&ego, &bob));
        // 2 followers + 2 following + 1 topic
        assert_eq!(g.edge_count(), 5);
    }

    #[test]
    fn test_empty_profile_is_single_node() {
        let g = build_ego_graph(&PersonProfile::empty("Ghost"));
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.edge_count(), 0);
    }
}
