// Centrality — degree, betweenness and PageRank over a SocialGraph.
//
// The graph is first flattened into a dense, integer-indexed CSR view
// (outgoing and incoming adjacency) so both algorithms run over plain
// slices. Parallel edges of different kinds between the same ordered pair
// count once, as in a simple directed graph.

use std::collections::{BTreeSet, HashMap, VecDeque};

use serde::Serialize;
use tracing::{debug, warn};

use super::model::{NodeKey, SocialGraph};

/// PageRank parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRankConfig {
    /// Damping factor (probability of following an edge)
    pub damping_factor: f64,
    /// Iteration cap; not converging within it degrades to all-zero scores
    pub max_iterations: usize,
    /// Per-node tolerance; iteration stops when the L1 change < n * tolerance
    pub tolerance: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            max_iterations: 200,
            tolerance: 1e-6,
        }
    }
}

/// Result of a PageRank run, indexed like the view it ran on.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRankOutcome {
    pub scores: Vec<f64>,
    pub converged: bool,
    pub iterations: usize,
}

/// Dense CSR view of a graph's topology.
pub struct GraphView {
    pub node_count: usize,
    /// Dense index (0..N) back to the node key
    pub index_to_key: Vec<NodeKey>,
    pub key_to_index: HashMap<NodeKey, usize>,
    /// Offsets into `out_targets`, length node_count + 1
    pub out_offsets: Vec<usize>,
    pub out_targets: Vec<usize>,
    /// Offsets into `in_sources`, length node_count + 1
    pub in_offsets: Vec<usize>,
    pub in_sources: Vec<usize>,
}

impl GraphView {
    pub fn from_graph(graph: &SocialGraph) -> Self {
        let index_to_key: Vec<NodeKey> = graph.nodes().map(|n| n.key.clone()).collect();
        let key_to_index: HashMap<NodeKey, usize> = index_to_key
            .iter()
            .enumerate()
            .map(|(i, k)| (k.clone(), i))
            .collect();
        let n = index_to_key.len();

        // BTreeSet per node: dedups parallel edges and keeps neighbor order stable
        let mut outgoing: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); n];
        let mut incoming: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); n];
        for edge in graph.edges() {
            let (Some(&s), Some(&t)) = (key_to_index.get(&edge.source), key_to_index.get(&edge.target))
            else {
                continue;
            };
            outgoing[s].insert(t);
            incoming[t].insert(s);
        }

        let (out_offsets, out_targets) = flatten(outgoing);
        let (in_offsets, in_sources) = flatten(incoming);

        Self {
            node_count: n,
            index_to_key,
            key_to_index,
            out_offsets,
            out_targets,
            in_offsets,
            in_sources,
        }
    }

    pub fn out_degree(&self, idx: usize) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    pub fn in_degree(&self, idx: usize) -> usize {
        self.in_offsets[idx + 1] - self.in_offsets[idx]
    }

    /// Outgoing neighbors (successors) of a node
    pub fn successors(&self, idx: usize) -> &[usize] {
        &self.out_targets[self.out_offsets[idx]..self.out_offsets[idx + 1]]
    }
}

fn flatten(lists: Vec<BTreeSet<usize>>) -> (Vec<usize>, Vec<usize>) {
    let mut offsets = Vec::with_capacity(lists.len() + 1);
    let mut flat = Vec::new();
    offsets.push(0);
    for list in lists {
        flat.extend(list);
        offsets.push(flat.len());
    }
    (offsets, flat)
}

/// PageRank by power iteration.
///
/// Starts from the uniform distribution; mass sitting on dangling nodes (no
/// out-edges) is spread uniformly each step. If the L1 change never drops
/// below `n * tolerance` within `max_iterations`, every score is 0.0 and
/// `converged` is false. This never panics or errors.
pub fn page_rank(view: &GraphView, config: &PageRankConfig) -> PageRankOutcome {
    let n = view.node_count;
    if n == 0 {
        return PageRankOutcome { scores: Vec::new(), converged: true, iterations: 0 };
    }

    let d = config.damping_factor;
    let uniform = 1.0 / n as f64;
    let dangling: Vec<usize> = (0..n).filter(|&i| view.out_degree(i) == 0).collect();

    let mut scores = vec![uniform; n];
    let mut next = vec![0.0; n];

    for iteration in 1..=config.max_iterations {
        let dangling_sum: f64 = d * dangling.iter().map(|&i| scores[i]).sum::<f64>();
        let base = dangling_sum * uniform + (1.0 - d) * uniform;

        next.iter_mut().for_each(|s| *s = base);
        for (i, &score) in scores.iter().enumerate() {
            let out = view.out_degree(i);
            if out == 0 {
                continue;
            }
            let share = d * score / out as f64;
            for &t in view.successors(i) {
                next[t] += share;
            }
        }

        let err: f64 = next.iter().zip(&scores).map(|(a, b)| (a - b).abs()).sum();
        std::mem::swap(&mut scores, &mut next);

        if err < n as f64 * config.tolerance {
            debug!(iterations = iteration, "PageRank converged");
            return PageRankOutcome { scores, converged: true, iterations: iteration };
        }
    }

    warn!(
        max_iterations = config.max_iterations,
        nodes = n,
        "PageRank did not converge, reporting zero scores"
    );
    PageRankOutcome {
        scores: vec![0.0; n],
        converged: false,
        iterations: config.max_iterations,
    }
}

/// Betweenness centrality (Brandes) over the directed graph.
///
/// Shortest paths follow edge direction. Scores are normalized by
/// `1 / ((n-1)(n-2))` when n > 2 and left raw otherwise.
pub fn betweenness(view: &GraphView) -> Vec<f64> {
    let n = view.node_count;
    let mut centrality = vec![0.0; n];

    let mut stack: Vec<usize> = Vec::with_capacity(n);
    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0f64; n];
    let mut dist = vec![-1i64; n];
    let mut delta = vec![0.0f64; n];
    let mut queue = VecDeque::new();

    for s in 0..n {
        stack.clear();
        preds.iter_mut().for_each(Vec::clear);
        sigma.iter_mut().for_each(|x| *x = 0.0);
        dist.iter_mut().for_each(|x| *x = -1);
        delta.iter_mut().for_each(|x| *x = 0.0);

        sigma[s] = 1.0;
        dist[s] = 0;
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            stack.push(v);
            let next_dist = dist[v] + 1;
            let sigma_v = sigma[v];
            for &w in view.successors(v) {
                if dist[w] < 0 {
                    dist[w] = next_dist;
                    queue.push_back(w);
                }
                if dist[w] == next_dist {
                    sigma[w] += sigma_v;
                    preds[w].push(v);
                }
            }
        }

        while let Some(w) = stack.pop() {
            let coeff = (1.0 + delta[w]) / sigma[w];
            for &v in &preds[w] {
                let contribution = sigma[v] * coeff;
                delta[v] += contribution;
            }
            if w != s {
                centrality[w] += delta[w];
            }
        }
    }

    if n > 2 {
        let scale = 1.0 / ((n - 1) as f64 * (n - 2) as f64);
        centrality.iter_mut().for_each(|c| *c *= scale);
    }
    centrality
}

/// Centrality figures for one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeCentrality {
    pub key: NodeKey,
    pub label: String,
    /// in_degree + out_degree
    pub degree: usize,
    pub in_degree: usize,
    pub out_degree: usize,
    pub betweenness: f64,
    pub pagerank: f64,
}

/// Centrality for every node of a graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralityReport {
    /// Sorted by kind, then degree descending, then PageRank descending, then key
    pub nodes: Vec<NodeCentrality>,
    /// False when PageRank hit its iteration cap (all pagerank fields are 0.0)
    pub pagerank_converged: bool,
    pub pagerank_iterations: usize,
}

impl CentralityReport {
    pub fn get(&self, key: &NodeKey) -> Option<&NodeCentrality> {
        self.nodes.iter().find(|n| &n.key == key)
    }
}

/// Compute every centrality measure for `graph`.
pub fn compute(graph: &SocialGraph, config: &PageRankConfig) -> CentralityReport {
    let view = GraphView::from_graph(graph);
    let between = betweenness(&view);
    let pagerank = page_rank(&view, config);

    let mut nodes: Vec<NodeCentrality> = graph
        .nodes()
        .enumerate()
        .map(|(i, node)| {
            let in_degree = view.in_degree(i);
            let out_degree = view.out_degree(i);
            NodeCentrality {
                key: node.key.clone(),
                label: node.label.clone(),
                degree: in_degree + out_degree,
                in_degree,
                out_degree,
                betweenness: between[i],
                pagerank: pagerank.scores[i],
            }
        })
        .collect();

    nodes.sort_by(|a, b| {
        a.key
            .kind
            .as_str()
            .cmp(b.key.kind.as_str())
            .then(b.degree.cmp(&a.degree))
            .then(b.pagerank.total_cmp(&a.pagerank))
            .then(a.key.cmp(&b.key))
    });

    CentralityReport {
        nodes,
        pagerank_converged: pagerank.converged,
        pagerank_iterations: pagerank.iterations,
    }
}
