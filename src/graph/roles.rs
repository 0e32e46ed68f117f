// Node roles — how accounts and topics relate to the people in a graph.
//
// Renderers colour nodes by these: accounts by follow direction, and any
// entity linked to two or more people as shared.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::model::{NodeKey, NodeKind, SocialGraph};

/// Follow direction of an account relative to the people it touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    /// Only edges into people: it follows someone, nobody follows it
    Follower,
    /// Only edges from people: followed, but follows nobody analysed
    Following,
    /// Edges in both directions (possibly with different people)
    Mutual,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeRole {
    pub key: NodeKey,
    pub label: String,
    /// Number of distinct people with an edge to or from this node
    pub shared_by: usize,
    /// `None` for topics and for accounts with no person edges
    pub account_role: Option<AccountRole>,
}

impl NodeRole {
    pub fn is_shared(&self) -> bool {
        self.shared_by >= 2
    }
}

#[derive(Default)]
struct Links<'a> {
    people: BTreeSet<&'a str>,
    into_person: bool,
    from_person: bool,
}

/// Roles for every non-person node, in node-key order.
pub fn node_roles(graph: &SocialGraph) -> Vec<NodeRole> {
    let mut links: BTreeMap<&NodeKey, Links> = BTreeMap::new();

    for edge in graph.edges() {
        match (edge.source.kind, edge.target.kind) {
            (NodeKind::Person, NodeKind::Person) => {}
            (NodeKind::Person, _) => {
                let entry = links.entry(&edge.target).or_default();
                entry.people.insert(&edge.source.id);
                entry.from_person = true;
            }
            (_, NodeKind::Person) => {
                let entry = links.entry(&edge.source).or_default();
                entry.people.insert(&edge.target.id);
                entry.into_person = true;
            }
            _ => {}
        }
    }

    graph
        .nodes()
        .filter(|n| n.kind() != NodeKind::Person)
        .map(|node| {
            let link = links.get(&node.key);
            let shared_by = link.map_or(0, |l| l.people.len());
            let account_role = match (node.kind(), link) {
                (NodeKind::Account, Some(l)) => match (l.into_person, l.from_person) {
                    (true, false) => Some(AccountRole::Follower),
                    (false, true) => Some(AccountRole::Following),
                    (true, true) => Some(AccountRole::Mutual),
                    (false, false) => None,
                },
                _ => None,
            };
            NodeRole {
                key: node.key.clone(),
                label: node.label.clone(),
                shared_by,
                account_role,
            }
        })
        .collect()
}
