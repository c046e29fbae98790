use crate::graph::WebGraph;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// A `petgraph` copy of (part of) a [`WebGraph`], for algorithms that want
/// dense node indices. Node weights are domain names.
#[derive(Debug, Clone)]
pub struct Projection {
    pub graph: DiGraph<String, ()>,
    pub index: HashMap<String, NodeIndex>,
}

impl Projection {
    pub fn node(&self, domain: &str) -> Option<NodeIndex> {
        self.index.get(domain).copied()
    }

    pub fn domain(&self, node: NodeIndex) -> Option<&str> {
        self.graph.node_weight(node).map(String::as_str)
    }
}

impl WebGraph {
    /// Project at most `max_vertices` websites, taken in ascending domain
    /// order, and the hyperlinks between them into a `petgraph::DiGraph`.
    pub fn to_petgraph(&self, max_vertices: usize) -> Projection {
        let mut domains: Vec<&str> = self.vertices.keys().map(String::as_str).collect();
        domains.sort_unstable();
        domains.truncate(max_vertices);

        let mut graph = DiGraph::with_capacity(domains.len(), self.edges.len());
        let mut index = HashMap::with_capacity(domains.len());
        for domain in domains {
            let node = graph.add_node(domain.to_string());
            index.insert(domain.to_string(), node);
        }

        let mut links: Vec<(&str, &str)> = self.list_edges();
        links.sort_unstable();
        for (source, destination) in links {
            if let (Some(&a), Some(&b)) = (index.get(source), index.get(destination)) {
                graph.add_edge(a, b, ());
            }
        }

        Projection { graph, index }
    }
}
