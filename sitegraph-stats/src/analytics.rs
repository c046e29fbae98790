//! Link-structure analytics computed on the `petgraph` projection of a
//! [`WebGraph`]: PageRank and harmonic centrality.
//!
//! # PageRank
//!
//! Iterative power method:
//!
//! PR(u) = (1-d)/N + d * (D/N + Σ PR(v)/L(v)) for all v linking to u
//!
//! where d is the damping factor, N the number of websites, L(v) the number
//! of outgoing links of v and D the total rank held by websites with no
//! outgoing links, which is spread evenly so scores keep summing to 1.
//!
//! # Harmonic centrality
//!
//! H(u) = Σ 1/dist(v, u) over every other website v that can reach u.
//! Unreachable pairs contribute nothing, so disconnected graphs are fine.

use petgraph::Direction;
use petgraph::graph::NodeIndex;
use sitegraph_core::WebGraph;
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// Configuration for [`page_rank`].
#[derive(Debug, Clone, PartialEq)]
pub struct PageRankConfig {
    /// Probability of following a link rather than jumping to a random website.
    /// Default: 0.85
    pub damping_factor: f64,

    /// Default: 100
    pub max_iterations: usize,

    /// Stop once no score changes by more than this between iterations.
    /// Default: 1e-6
    pub tolerance: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self { damping_factor: 0.85, max_iterations: 100, tolerance: 1e-6 }
    }
}

impl PageRankConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_damping_factor(mut self, damping_factor: f64) -> Self {
        self.damping_factor = damping_factor;
        self
    }

    pub const fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// PageRank score of every website.
pub fn page_rank(g: &WebGraph, config: &PageRankConfig) -> HashMap<String, f64> {
    let projection = g.to_petgraph(usize::MAX);
    let graph = &projection.graph;
    let n = graph.node_count();
    if n == 0 {
        return HashMap::new();
    }

    let nf = n as f64;
    let d = config.damping_factor;
    let out_degree: Vec<usize> = graph
        .node_indices()
        .map(|node| graph.neighbors_directed(node, Direction::Outgoing).count())
        .collect();

    let mut scores = vec![1.0 / nf; n];
    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iterations {
        iterations += 1;

        let dangling: f64 = graph
            .node_indices()
            .filter(|node| out_degree[node.index()] == 0)
            .map(|node| scores[node.index()])
            .sum();
        let base = (1.0 - d) / nf + d * dangling / nf;

        let mut next = vec![base; n];
        for node in graph.node_indices() {
            let incoming: f64 = graph
                .neighbors_directed(node, Direction::Incoming)
                .map(|src| scores[src.index()] / out_degree[src.index()] as f64)
                .sum();
            next[node.index()] += d * incoming;
        }

        let delta = scores
            .iter()
            .zip(&next)
            .map(|(old, new)| (old - new).abs())
            .fold(0.0, f64::max);
        scores = next;

        if delta < config.tolerance {
            converged = true;
            break;
        }
    }

    debug!(
        "PageRank over {} websites: {} iterations, converged: {}",
        n, iterations, converged
    );

    graph
        .node_indices()
        .map(|node| (graph[node].clone(), scores[node.index()]))
        .collect()
}

/// Harmonic centrality of every website, following links in their direction.
pub fn harmonic_centrality(g: &WebGraph) -> HashMap<String, f64> {
    let projection = g.to_petgraph(usize::MAX);
    let graph = &projection.graph;
    let n = graph.node_count();

    let mut centrality = vec![0.0; n];
    let mut distance: Vec<Option<usize>> = vec![None; n];
    let mut queue: VecDeque<NodeIndex> = VecDeque::new();

    for source in graph.node_indices() {
        distance.iter_mut().for_each(|slot| *slot = None);
        distance[source.index()] = Some(0);
        queue.clear();
        queue.push_back(source);

        while let Some(current) = queue.pop_front() {
            let Some(dist) = distance[current.index()] else {
                continue;
            };
            for next in graph.neighbors_directed(current, Direction::Outgoing) {
                if distance[next.index()].is_none() {
                    distance[next.index()] = Some(dist + 1);
                    centrality[next.index()] += 1.0 / (dist + 1) as f64;
                    queue.push_back(next);
                }
            }
        }
    }

    graph
        .node_indices()
        .map(|node| (graph[node].clone(), centrality[node.index()]))
        .collect()
}
