//! Building a [`WebGraph`] from the three plain records produced by a loader:
//! the id/domain index, raw traffic statistics keyed by id, and the directed
//! edge list.

use crate::error::Result;
use crate::graph::WebGraph;
use crate::website::{StatValue, Stats};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

pub const DEFAULT_MAX_VERTICES: usize = 10_000;

/// Bidirectional mapping between numeric site ids and domain names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainIndex {
    by_id: HashMap<u32, String>,
    by_domain: HashMap<String, u32>,
}

impl DomainIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from `(id, domain)` pairs. A later pair with an id that
    /// was already seen replaces the earlier one. See [`DomainIndex::insert`]
    /// for domains listed under more than one id.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u32, S)>,
        S: Into<String>,
    {
        let mut index = Self::new();
        for (id, domain) in pairs {
            index.insert(id, domain);
        }
        index
    }

    /// Map `id` to `domain`, rebinding `id` if it was already present.
    ///
    /// When several ids carry the same domain, [`DomainIndex::id`] returns the
    /// lowest of them. That is the id [`build_graph`] keeps, so statistics
    /// looked up by domain land on the website that is actually loaded.
    pub fn insert(&mut self, id: u32, domain: impl Into<String>) {
        let domain = domain.into();
        if let Some(old) = self.by_id.insert(id, domain.clone()) {
            if self.by_domain.get(&old) == Some(&id) {
                self.by_domain.remove(&old);
                // another id may still carry the old domain
                let next = self
                    .by_id
                    .iter()
                    .filter(|(_, d)| **d == old)
                    .map(|(other, _)| *other)
                    .min();
                if let Some(next) = next {
                    self.by_domain.insert(old, next);
                }
            }
        }
        self.by_domain
            .entry(domain)
            .and_modify(|existing| *existing = (*existing).min(id))
            .or_insert(id);
    }

    pub fn domain(&self, id: u32) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    pub fn id(&self, domain: &str) -> Option<u32> {
        self.by_domain.get(domain).copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Ids in ascending order.
    pub fn ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.by_id.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

/// Raw traffic statistics for one website, as provided by the stats source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawStats {
    pub alexa_rank: i64,
    pub daily_min: f64,
    pub daily_pageviews: f64,
    pub traffic_ratio: f64,
    pub site_links: i64,
    pub tranco_rank: i64,
}

impl RawStats {
    pub fn into_stats(self) -> Stats {
        let mut stats = Stats::new();
        stats.insert("alexa_rank".to_string(), StatValue::Int(self.alexa_rank));
        stats.insert("daily_min".to_string(), StatValue::Float(self.daily_min));
        stats.insert(
            "daily_pageviews".to_string(),
            StatValue::Float(self.daily_pageviews),
        );
        stats.insert(
            "traffic_ratio".to_string(),
            StatValue::Float(self.traffic_ratio),
        );
        stats.insert("site_links".to_string(), StatValue::Int(self.site_links));
        stats.insert("tranco_rank".to_string(), StatValue::Int(self.tranco_rank));
        stats
    }
}

/// Filters applied while building the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestOptions {
    /// Drop websites that have no statistics.
    pub stats_only: bool,
    /// Maximum number of websites kept, in ascending id order.
    pub max_vertices: usize,
    /// Domains that are never loaded, together with every edge touching them.
    pub exclude: HashSet<String>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            stats_only: false,
            max_vertices: DEFAULT_MAX_VERTICES,
            exclude: HashSet::new(),
        }
    }
}

impl IngestOptions {
    pub fn with_stats_only(mut self, stats_only: bool) -> Self {
        self.stats_only = stats_only;
        self
    }

    pub fn with_max_vertices(mut self, max_vertices: usize) -> Self {
        self.max_vertices = max_vertices;
        self
    }

    pub fn with_excluded<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(domains.into_iter().map(Into::into));
        self
    }
}

/// Counts describing what [`build_graph`] kept and dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestSummary {
    pub websites_added: usize,
    pub websites_with_stats: usize,
    pub websites_dropped: usize,
    pub edges_added: usize,
    pub edges_skipped: usize,
}

/// Build a graph from an id index, raw statistics and an edge list.
///
/// Websites are visited in ascending id order so the vertex cap is
/// reproducible. A website with statistics is kept while the cap allows; one
/// without is kept with empty statistics unless `stats_only` is set. Edges are
/// added only when both endpoints were kept. Self-links and repeated domains
/// are skipped with a warning rather than treated as errors.
pub fn build_graph(
    index: &DomainIndex,
    stats: &HashMap<u32, RawStats>,
    edges: &[(u32, u32)],
    options: &IngestOptions,
) -> Result<(WebGraph, IngestSummary)> {
    let mut graph = WebGraph::new();
    let mut summary = IngestSummary::default();
    let mut kept: HashSet<u32> = HashSet::new();

    for id in index.ids() {
        let Some(domain) = index.domain(id) else {
            continue;
        };
        if options.exclude.contains(domain) {
            debug!("Excluding {} (id {})", domain, id);
            summary.websites_dropped += 1;
            continue;
        }
        if graph.contains(domain) {
            warn!("Skipping repeated domain {} (id {})", domain, id);
            summary.websites_dropped += 1;
            continue;
        }

        let under_cap = kept.len() < options.max_vertices;
        match stats.get(&id) {
            Some(raw) if under_cap => {
                graph.add_vertex(domain, raw.into_stats())?;
                summary.websites_with_stats += 1;
            }
            None if under_cap && !options.stats_only => {
                graph.add_vertex(domain, Stats::new())?;
            }
            _ => {
                summary.websites_dropped += 1;
                continue;
            }
        }
        kept.insert(id);
        summary.websites_added += 1;
    }

    for &(src_id, dst_id) in edges {
        if !kept.contains(&src_id) || !kept.contains(&dst_id) {
            summary.edges_skipped += 1;
            continue;
        }
        let (Some(src), Some(dst)) = (index.domain(src_id), index.domain(dst_id)) else {
            summary.edges_skipped += 1;
            continue;
        };
        if src == dst {
            warn!("Skipping self link on {}", src);
            summary.edges_skipped += 1;
            continue;
        }
        graph.add_edge(src, dst, Stats::new())?;
        summary.edges_added += 1;
    }

    info!(
        "Built web graph with {} websites and {} links ({} websites dropped, {} links skipped)",
        graph.vertex_count(),
        graph.edge_count(),
        summary.websites_dropped,
        summary.edges_skipped
    );

    Ok((graph, summary))
}
