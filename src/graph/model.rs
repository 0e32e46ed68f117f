// Typed directed graph of people, accounts and topics.
//
// Nodes are keyed by (kind, id) so a handle and a topic with the same text,
// or a person whose key matches some handle, never collapse into one node.
// Edges are a set of (source, target, kind) triples, so contributing the
// same relationship twice is a no-op.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Serialize, Serializer};

/// The three node variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Person,
    Account,
    Topic,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Person => "person",
            NodeKind::Account => "account",
            NodeKind::Topic => "topic",
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            NodeKind::Person => "person:",
            NodeKind::Account => "acc:",
            NodeKind::Topic => "topic:",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Graph-wide node identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeKey {
    pub kind: NodeKind,
    pub id: String,
}

impl NodeKey {
    pub fn person(key: impl Into<String>) -> Self {
        Self { kind: NodeKind::Person, id: key.into() }
    }

    pub fn account(identity: impl Into<String>) -> Self {
        Self { kind: NodeKind::Account, id: identity.into() }
    }

    pub fn topic(identity: impl Into<String>) -> Self {
        Self { kind: NodeKind::Topic, id: identity.into() }
    }
}

/// Renders as `person:<key>`, `acc:<handle>` or `topic:<name>`.
impl std::fmt::Display for NodeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub key: NodeKey,
    pub label: String,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.key.kind
    }
}

/// Which way a follow relationship points relative to the ego person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// account -> person (the account follows the person)
    Inbound,
    /// person -> account (the person follows the account)
    Outbound,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Inbound => "inbound",
            Direction::Outbound => "outbound",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "type", content = "direction", rename_all = "snake_case")]
pub enum EdgeKind {
    Follows(Direction),
    HasTopic,
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Follows(_) => "follows",
            EdgeKind::HasTopic => "has_topic",
        }
    }

    pub fn direction(&self) -> Option<Direction> {
        match self {
            EdgeKind::Follows(d) => Some(*d),
            EdgeKind::HasTopic => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Edge {
    pub source: NodeKey,
    pub target: NodeKey,
    pub kind: EdgeKind,
}

/// A directed multi-kind graph with deduplicated nodes and edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialGraph {
    nodes: BTreeMap<NodeKey, Node>,
    edges: BTreeSet<Edge>,
}

impl SocialGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node unless one with the same key exists. Returns whether it was new.
    pub fn add_node(&mut self, key: NodeKey, label: impl Into<String>) -> bool {
        if self.nodes.contains_key(&key) {
            return false;
        }
        let node = Node { key: key.clone(), label: label.into() };
        self.nodes.insert(key, node);
        true
    }

    /// Insert an edge, adding missing endpoints labelled by their id.
    /// Returns whether the edge was new.
    pub fn add_edge(&mut self, source: NodeKey, target: NodeKey, kind: EdgeKind) -> bool {
        let source_label = source.id.clone();
        let target_label = target.id.clone();
        self.add_node(source.clone(), source_label);
        self.add_node(target.clone(), target_label);
        self.edges.insert(Edge { source, target, kind })
    }

    pub fn node(&self, key: &NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    pub fn contains_node(&self, key: &NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Nodes in key order: people, then accounts, then topics.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn persons(&self) -> impl Iterator<Item = &Node> {
        self.nodes().filter(|n| n.kind() == NodeKind::Person)
    }

    /// Whether any edge (of any kind) runs from `source` to `target`.
    pub fn has_edge(&self, source: &NodeKey, target: &NodeKey) -> bool {
        self.edges
            .iter()
            .any(|e| &e.source == source && &e.target == target)
    }

    /// All edges touching `key`, in either direction.
    pub fn edges_of<'a>(&'a self, key: &'a NodeKey) -> impl Iterator<Item = &'a Edge> {
        self.edges
            .iter()
            .filter(move |e| &e.source == key || &e.target == key)
    }

    /// Fold another graph's nodes and edges into this one.
    ///
    /// Nodes already present keep their existing label.
    pub fn absorb(&mut self, other: &SocialGraph) {
        for node in other.nodes() {
            self.add_node(node.key.clone(), node.label.clone());
        }
        self.edges.extend(other.edges.iter().cloned());
    }
}

impl Serialize for SocialGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct GraphDump<'a> {
            nodes: Vec<&'a Node>,
            edges: Vec<&'a Edge>,
        }
        GraphDump {
            nodes: self.nodes.values().collect(),
            edges: self.edges.iter().collect(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_text_different_kind_is_two_nodes() {
        let mut g = SocialGraph::new();
        g.add_node(NodeKey::account("jazz"), "jazz");
        g.add_node(NodeKey::topic("jazz"), "jazz");
        g.add_node(NodeKey::person("jazz"), "jazz");
        assert_eq!(g.node_count(), 3);
    }

    #[test]
    fn test_duplicate_edge_is_collapsed() {
        let mut g = SocialGraph::new();
        let p = NodeKey::person("ana");
        let a = NodeKey::account("bob");
        assert!(g.add_edge(a.clone(), p.clone(), EdgeKind::Follows(Direction::Inbound)));
        assert!(!g.add_edge(a.clone(), p.clone(), EdgeKind::Follows(Direction::Inbound)));
        assert!(g.add_edge(p.clone(), a.clone(), EdgeKind::Follows(Direction::Outbound)));
        assert_eq!(g.edge_count(), 2);
        assert!(g.has_edge(&a, &p));
        assert!(g.has_edge(&p, &a));
    }

    #[test]
    fn test_key_display() {
        assert_eq!(NodeKey::person("Ana").to_string(), "person:Ana");
        assert_eq!(NodeKey::account("bob").to_string(), "acc:bob");
        assert_eq!(NodeKey::topic("music").to_string(), "topic:music");
    }
}
