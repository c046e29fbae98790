use crate::error::Result;
use crate::global::GlobalStat;
use crate::loader::{StatKind, load, load_global};
use sitegraph_core::WebGraph;
use tracing::info;

/// Which optional statistic groups [`annotate`] loads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Degree and outgoing-neighbour statistics.
    pub structural: bool,
    /// PageRank and harmonic centrality.
    pub link_analytics: bool,
}

impl PipelineOptions {
    pub fn with_structural(mut self, structural: bool) -> Self {
        self.structural = structural;
        self
    }

    pub fn with_link_analytics(mut self, link_analytics: bool) -> Self {
        self.link_analytics = link_analytics;
        self
    }
}

/// Annotate a freshly built graph: every global aggregate first, then the
/// per-website statistics, then whichever optional groups are enabled.
///
/// Every website needs `daily_min`, `daily_pageviews`, `traffic_ratio` and
/// `site_links` (and `tranco_rank` for structural statistics). The first
/// failure stops the pipeline; statistics loaded before it stay in place.
pub fn annotate(g: &mut WebGraph, options: &PipelineOptions) -> Result<()> {
    for stat in GlobalStat::ALL {
        load_global(g, stat)?;
    }

    let mut kinds: Vec<StatKind> = StatKind::ENGAGEMENT.to_vec();
    if options.structural {
        kinds.extend(StatKind::STRUCTURAL);
    }
    if options.link_analytics {
        kinds.extend(StatKind::LINK_ANALYTICS);
    }
    for kind in &kinds {
        load(g, *kind)?;
    }

    info!(
        "Annotated {} websites with {} global and {} per-website statistics",
        g.vertex_count(),
        GlobalStat::ALL.len(),
        kinds.len()
    );
    Ok(())
}
