use crate::error::{GraphError, Result};
use crate::website::{Stats, Website};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// A directed graph in which every vertex is a website and every edge is a
/// hyperlink from one website to another.
///
/// Vertices and edges are only ever added. Queries are total over the id
/// space and answer `false`, `None` or an empty set for unknown domains;
/// the two mutating operations fail loudly on misuse.
///
/// `WebGraph` does no internal locking. Wrap it in a lock, or keep it on a
/// single thread, if it has to be shared.
#[derive(Debug, Clone, Default)]
pub struct WebGraph {
    pub(crate) vertices: HashMap<String, Website>,
    pub(crate) edges: HashMap<(String, String), Stats>,
    global_stats: HashMap<String, f64>,
}

impl WebGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a website with the given initial statistics and no links.
    ///
    /// Fails with [`GraphError::DuplicateVertex`] if the domain is already present;
    /// the existing vertex is left untouched.
    pub fn add_vertex(&mut self, domain: impl Into<String>, stats: Stats) -> Result<()> {
        let domain = domain.into();
        if self.vertices.contains_key(&domain) {
            return Err(GraphError::DuplicateVertex(domain));
        }
        self.vertices
            .insert(domain.clone(), Website::new(domain, stats));
        Ok(())
    }

    /// Record a hyperlink `source -> destination`.
    ///
    /// Both websites must already exist and must differ. Re-adding an existing
    /// edge replaces its attributes.
    pub fn add_edge(&mut self, source: &str, destination: &str, edge_stats: Stats) -> Result<()> {
        for domain in [source, destination] {
            if !self.vertices.contains_key(domain) {
                return Err(GraphError::UnknownVertex(domain.to_string()));
            }
        }
        if source == destination {
            return Err(GraphError::SelfLoop(source.to_string()));
        }

        if let Some(src) = self.vertices.get_mut(source) {
            src.link_out(destination);
        }
        if let Some(dst) = self.vertices.get_mut(destination) {
            dst.link_in(source);
        }

        let previous = self
            .edges
            .insert((source.to_string(), destination.to_string()), edge_stats);
        if previous.is_some() {
            debug!("Replaced attributes of edge {} -> {}", source, destination);
        }
        Ok(())
    }

    /// Whether `source` links directly to `destination`.
    pub fn adjacent(&self, source: &str, destination: &str) -> bool {
        self.vertices
            .get(source)
            .map(|v| v.links_out().contains(destination))
            .unwrap_or(false)
    }

    /// Domains linked with `domain` in either direction.
    pub fn neighbors(&self, domain: &str) -> HashSet<&str> {
        match self.vertices.get(domain) {
            Some(v) => v
                .links_in()
                .iter()
                .chain(v.links_out().iter())
                .map(String::as_str)
                .collect(),
            None => HashSet::new(),
        }
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.vertices.contains_key(domain)
    }

    pub fn website(&self, domain: &str) -> Option<&Website> {
        self.vertices.get(domain)
    }

    /// Mutable access for writing statistics. Links cannot be changed through it.
    pub fn website_mut(&mut self, domain: &str) -> Option<&mut Website> {
        self.vertices.get_mut(domain)
    }

    /// Attributes of the edge `source -> destination`, or `None` if the
    /// websites exist but are not linked.
    pub fn edge_stats(&self, source: &str, destination: &str) -> Result<Option<&Stats>> {
        for domain in [source, destination] {
            if !self.vertices.contains_key(domain) {
                return Err(GraphError::UnknownVertex(domain.to_string()));
            }
        }
        Ok(self
            .edges
            .get(&(source.to_string(), destination.to_string())))
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All websites, in no particular order.
    pub fn websites(&self) -> impl Iterator<Item = &Website> {
        self.vertices.values()
    }

    pub fn list_vertices(&self) -> Vec<&Website> {
        self.vertices.values().collect()
    }

    pub fn list_edges(&self) -> Vec<(&str, &str)> {
        self.edges
            .keys()
            .map(|(s, d)| (s.as_str(), d.as_str()))
            .collect()
    }

    pub fn global_stats(&self) -> &HashMap<String, f64> {
        &self.global_stats
    }

    pub fn global_stat(&self, name: &str) -> Option<f64> {
        self.global_stats.get(name).copied()
    }

    pub fn set_global_stat(&mut self, name: impl Into<String>, value: f64) {
        self.global_stats.insert(name.into(), value);
    }
}
