// Unit tests for ego graphs, merging, centrality and node roles.

use kindred::error::AnalysisError;
use kindred::graph::centrality::{self, betweenness, page_rank, GraphView, PageRankConfig};
use kindred::graph::ego::build_ego_graph;
use kindred::graph::merge::merge_graphs;
use kindred::graph::model::{Direction, EdgeKind, NodeKey, NodeKind, SocialGraph};
use kindred::graph::roles::{node_roles, AccountRole};
use kindred::ingest::profile::PersonProfile;

fn profile(key: &str, followers: &[&str], following: &[&str], topics: &[&str]) -> PersonProfile {
    let mut p = PersonProfile::empty(key);
    p.followers.extend(followers.iter().map(|s| s.to_string()));
    p.following.extend(following.iter().map(|s| s.to_string()));
    p.topics.extend(topics.iter().map(|s| s.to_string()));
    p
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ============================================================
// Ego graphs
// ============================================================

#[test]
fn ego_graph_has_typed_nodes_and_directed_edges() {
    let g = build_ego_graph(&profile("ana", &["bob"], &["carl"], &["jazz"]));

    assert_eq!(g.node_count(), 4);
    assert_eq!(g.edge_count(), 3);
    assert!(g.has_edge(&NodeKey::account("bob"), &NodeKey::person("ana")));
    assert!(g.has_edge(&NodeKey::person("ana"), &NodeKey::account("carl")));
    assert!(g.has_edge(&NodeKey::person("ana"), &NodeKey::topic("jazz")));
    assert_eq!(
        g.node(&NodeKey::person("ana")).map(|n| n.label.as_str()),
        Some("ana"),
        "person label is the person key"
    );
}

#[test]
fn mutual_account_gets_both_edges() {
    let g = build_ego_graph(&profile("ana", &["bob"], &["bob"], &[]));
    assert_eq!(g.node_count(), 2, "one account node for bob");
    assert_eq!(g.edge_count(), 2, "inbound and outbound edges are distinct");

    let kinds: Vec<EdgeKind> = g.edges().map(|e| e.kind).collect();
    assert!(kinds.contains(&EdgeKind::Follows(Direction::Inbound)));
    assert!(kinds.contains(&EdgeKind::Follows(Direction::Outbound)));
}

#[test]
fn same_string_as_account_and_topic_stays_two_nodes() {
    let g = build_ego_graph(&profile("ana", &[], &["jazz"], &["jazz"]));
    assert_eq!(g.node_count(), 3);
    assert!(g.contains_node(&NodeKey::account("jazz")));
    assert!(g.contains_node(&NodeKey::topic("jazz")));
}

#[test]
fn duplicate_edges_collapse() {
    let mut g = SocialGraph::new();
    let kind = EdgeKind::Follows(Direction::Outbound);
    assert!(g.add_edge(NodeKey::person("a"), NodeKey::account("x"), kind));
    assert!(!g.add_edge(NodeKey::person("a"), NodeKey::account("x"), kind));
    assert_eq!(g.edge_count(), 1);
}

// ============================================================
// Merging
// ============================================================

#[test]
fn merge_dedupes_shared_entities() {
    let a = build_ego_graph(&profile("ana", &[], &["x", "y"], &["jazz"]));
    let b = build_ego_graph(&profile("ben", &["x"], &["y"], &["jazz"]));
    let merged = merge_graphs([&a, &b]).unwrap();

    // ana, ben, x, y, jazz
    assert_eq!(merged.node_count(), 5);
    // ana->x, ana->y, ana->jazz, x->ben, ben->y, ben->jazz
    assert_eq!(merged.edge_count(), 6);
    assert_eq!(merged.persons().count(), 2);
}

#[test]
fn merge_is_idempotent_on_identical_edges() {
    let a = build_ego_graph(&profile("ana", &[], &["x"], &[]));
    let merged = merge_graphs([&a]).unwrap();
    assert_eq!(merged, a, "merging a single graph reproduces it");
}

#[test]
fn merge_rejects_duplicate_person() {
    let a = build_ego_graph(&profile("ana", &[], &["x"], &[]));
    let again = build_ego_graph(&profile("ana", &["y"], &[], &[]));
    let err = merge_graphs([&a, &again]).unwrap_err();
    assert_eq!(err, AnalysisError::DuplicatePerson("ana".to_string()));
}

#[test]
fn merge_of_nothing_is_empty() {
    let merged = merge_graphs(std::iter::empty::<&SocialGraph>()).unwrap();
    assert_eq!(merged.node_count(), 0);
}

// ============================================================
// Centrality
// ============================================================

#[test]
fn chain_middle_has_half_betweenness() {
    // x -> ana -> y: ana lies on the only x..y path
    let g = build_ego_graph(&profile("ana", &["x"], &["y"], &[]));
    let report = centrality::compute(&g, &PageRankConfig::default());

    let ana = report.get(&NodeKey::person("ana")).unwrap();
    assert!(approx(ana.betweenness, 0.5), "got {}", ana.betweenness);
    assert_eq!(ana.in_degree, 1);
    assert_eq!(ana.out_degree, 1);
    assert_eq!(ana.degree, 2);

    let x = report.get(&NodeKey::account("x")).unwrap();
    assert!(approx(x.betweenness, 0.0), "endpoints carry no betweenness");
}

#[test]
fn pagerank_is_a_distribution() {
    let a = build_ego_graph(&profile("ana", &["b", "c"], &["c", "d"], &["t"]));
    let view = GraphView::from_graph(&a);
    let outcome = page_rank(&view, &PageRankConfig::default());

    assert!(outcome.converged);
    let total: f64 = outcome.scores.iter().sum();
    assert!((total - 1.0).abs() < 1e-6, "scores sum to {total}");
    assert!(outcome.scores.iter().all(|&s| s >= 0.0));
}

#[test]
fn symmetric_leaves_share_pagerank() {
    let g = build_ego_graph(&profile("ana", &[], &["a", "b", "c"], &[]));
    let report = centrality::compute(&g, &PageRankConfig::default());
    let a = report.get(&NodeKey::account("a")).unwrap().pagerank;
    let b = report.get(&NodeKey::account("b")).unwrap().pagerank;
    let ana = report.get(&NodeKey::person("ana")).unwrap().pagerank;
    assert!(approx(a, b));
    assert!(a > ana, "followed accounts receive the ego's rank");
}

#[test]
fn non_convergence_degrades_to_zero_scores() {
    let g = build_ego_graph(&profile("ana", &["x"], &["y", "z"], &[]));
    let config = PageRankConfig {
        max_iterations: 1,
        ..PageRankConfig::default()
    };
    let report = centrality::compute(&g, &config);

    assert!(!report.pagerank_converged);
    assert!(report.nodes.iter().all(|n| n.pagerank == 0.0));
    assert!(
        report.nodes.iter().any(|n| n.betweenness > 0.0),
        "other measures are still computed"
    );
}

#[test]
fn tiny_graphs_do_not_panic() {
    let empty = SocialGraph::new();
    let report = centrality::compute(&empty, &PageRankConfig::default());
    assert!(report.nodes.is_empty());

    let single = build_ego_graph(&PersonProfile::empty("solo"));
    let report = centrality::compute(&single, &PageRankConfig::default());
    assert_eq!(report.nodes.len(), 1);
    assert!(approx(report.nodes[0].pagerank, 1.0));
    assert!(approx(report.nodes[0].betweenness, 0.0));

    let view = GraphView::from_graph(&build_ego_graph(&profile("a", &[], &["b"], &[])));
    assert_eq!(betweenness(&view), vec![0.0, 0.0], "two nodes are never normalized");
}

#[test]
fn centrality_rows_are_grouped_by_kind() {
    let g = build_ego_graph(&profile("ana", &["x"], &["y"], &["jazz"]));
    let report = centrality::compute(&g, &PageRankConfig::default());
    let kinds: Vec<NodeKind> = report.nodes.iter().map(|n| n.key.kind).collect();
    assert_eq!(
        kinds,
        vec![NodeKind::Account, NodeKind::Account, NodeKind::Person, NodeKind::Topic]
    );
}

// ============================================================
// Node roles
// ============================================================

#[test]
fn roles_reflect_direction_and_sharing() {
    let a = build_ego_graph(&profile("ana", &["f"], &["x", "m"], &["jazz"]));
    let b = build_ego_graph(&profile("ben", &["m"], &["x"], &["jazz"]));
    let merged = merge_graphs([&a, &b]).unwrap();
    let roles = node_roles(&merged);

    let role = |key: NodeKey| roles.iter().find(|r| r.key == key).unwrap().clone();

    let x = role(NodeKey::account("x"));
    assert_eq!(x.shared_by, 2);
    assert!(x.is_shared());
    assert_eq!(x.account_role, Some(AccountRole::Following));

    assert_eq!(role(NodeKey::account("f")).account_role, Some(AccountRole::Follower));
    assert_eq!(
        role(NodeKey::account("m")).account_role,
        Some(AccountRole::Mutual),
        "followed by ana and following ben"
    );

    let jazz = role(NodeKey::topic("jazz"));
    assert_eq!(jazz.shared_by, 2);
    assert_eq!(jazz.account_role, None);

    assert!(roles.iter().all(|r| r.key.kind != NodeKind::Person));
}
