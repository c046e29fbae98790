use crate::analytics::{self, PageRankConfig};
use crate::error::Result;
use crate::global::GlobalStat;
use crate::rank;
use crate::vertex;
use sitegraph_core::{StatValue, WebGraph, Website};
use tracing::debug;

/// Every per-website statistic the loader knows how to compute and store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKind {
    MinPerPage,
    SearchTraffic,
    LinksTraffic,
    EngagementRating,
    Degree,
    InDegree,
    OutDegree,
    NeighboursAvgPopularity,
    NeighbourLargestInDegree,
    PopularityPerDegree,
    PopularityPerNeighboursAvgPopularity,
    PopularityPerNeighbourLargestInDegree,
    PredictedRank,
    PageRank,
    HarmonicCentrality,
}

impl StatKind {
    /// Traffic-derived statistics, in load order.
    pub const ENGAGEMENT: [StatKind; 5] = [
        StatKind::MinPerPage,
        StatKind::SearchTraffic,
        StatKind::LinksTraffic,
        StatKind::EngagementRating,
        StatKind::PredictedRank,
    ];

    /// Degree and outgoing-neighbour statistics.
    pub const STRUCTURAL: [StatKind; 8] = [
        StatKind::Degree,
        StatKind::InDegree,
        StatKind::OutDegree,
        StatKind::NeighboursAvgPopularity,
        StatKind::NeighbourLargestInDegree,
        StatKind::PopularityPerDegree,
        StatKind::PopularityPerNeighboursAvgPopularity,
        StatKind::PopularityPerNeighbourLargestInDegree,
    ];

    pub const LINK_ANALYTICS: [StatKind; 2] = [StatKind::PageRank, StatKind::HarmonicCentrality];

    /// Key under which the statistic is stored on each website.
    pub fn key(&self) -> &'static str {
        match self {
            StatKind::MinPerPage => "min_per_page",
            StatKind::SearchTraffic => "search_traffic",
            StatKind::LinksTraffic => "links_traffic",
            StatKind::EngagementRating => "engagement_rating",
            StatKind::Degree => "degree",
            StatKind::InDegree => "in_degree",
            StatKind::OutDegree => "out_degree",
            StatKind::NeighboursAvgPopularity => "neighbours_avg_popularity",
            StatKind::NeighbourLargestInDegree => "neighbour_largest_in_degree",
            StatKind::PopularityPerDegree => "popularity_per_degree",
            StatKind::PopularityPerNeighboursAvgPopularity => {
                "popularity_per_neighbours_avg_popularity"
            }
            StatKind::PopularityPerNeighbourLargestInDegree => {
                "popularity_per_neighbour_largest_in_degree"
            }
            StatKind::PredictedRank => "predicted_rank",
            StatKind::PageRank => "page_rank",
            StatKind::HarmonicCentrality => "harmonic_centrality",
        }
    }

    /// Compute the statistic for every website without touching the graph.
    pub fn compute_all(&self, g: &WebGraph) -> Result<Vec<(String, StatValue)>> {
        match self {
            StatKind::MinPerPage => each_site(g, |_, s| vertex::min_per_page(s).map(Into::into)),
            StatKind::SearchTraffic => {
                each_site(g, |_, s| vertex::search_traffic(s).map(Into::into))
            }
            StatKind::LinksTraffic => {
                each_site(g, |_, s| vertex::links_traffic(s).map(Into::into))
            }
            StatKind::EngagementRating => {
                each_site(g, |_, s| vertex::engagement_rating(s).map(Into::into))
            }
            StatKind::Degree => each_site(g, |_, s| Ok(vertex::degree(s).into())),
            StatKind::InDegree => each_site(g, |_, s| Ok(vertex::in_degree(s).into())),
            StatKind::OutDegree => each_site(g, |_, s| Ok(vertex::out_degree(s).into())),
            StatKind::NeighboursAvgPopularity => {
                each_site(g, |g, s| vertex::neighbours_avg_popularity(g, s).map(Into::into))
            }
            StatKind::NeighbourLargestInDegree => {
                each_site(g, |g, s| Ok(vertex::neighbour_largest_in_degree(g, s).into()))
            }
            StatKind::PopularityPerDegree => {
                each_site(g, |_, s| vertex::popularity_per_degree(s).map(Into::into))
            }
            StatKind::PopularityPerNeighboursAvgPopularity => each_site(g, |g, s| {
                vertex::popularity_per_neighbours_avg_popularity(g, s).map(Into::into)
            }),
            StatKind::PopularityPerNeighbourLargestInDegree => each_site(g, |g, s| {
                vertex::popularity_per_neighbour_largest_in_degree(g, s).map(Into::into)
            }),
            // Needs the whole graph, so rank everything once instead of per website.
            StatKind::PredictedRank => Ok(rank::rank_all(g)?
                .into_iter()
                .map(|(domain, position)| (domain, StatValue::from(position)))
                .collect()),
            StatKind::PageRank => Ok(analytics::page_rank(g, &PageRankConfig::default())
                .into_iter()
                .map(|(domain, score)| (domain, StatValue::Float(score)))
                .collect()),
            StatKind::HarmonicCentrality => Ok(analytics::harmonic_centrality(g)
                .into_iter()
                .map(|(domain, score)| (domain, StatValue::Float(score)))
                .collect()),
        }
    }
}

fn each_site<F>(g: &WebGraph, stat: F) -> Result<Vec<(String, StatValue)>>
where
    F: Fn(&WebGraph, &Website) -> Result<StatValue>,
{
    g.websites()
        .map(|site| Ok((site.domain().to_string(), stat(g, site)?)))
        .collect()
}

/// Compute `kind` for every website and store it under `kind.key()`.
///
/// Values are written only once every website has been computed, so a
/// failure leaves the graph exactly as it was.
pub fn load(g: &mut WebGraph, kind: StatKind) -> Result<()> {
    let values = kind.compute_all(g)?;
    debug!("Loading '{}' onto {} websites", kind.key(), values.len());

    for (domain, value) in values {
        if let Some(site) = g.website_mut(&domain) {
            site.set_stat(kind.key(), value);
        }
    }
    Ok(())
}

/// Compute a graph-wide aggregate and store it under `stat.key()`.
pub fn load_global(g: &mut WebGraph, stat: GlobalStat) -> Result<f64> {
    let value = stat.compute(g)?;
    debug!("Global '{}' = {}", stat.key(), value);
    g.set_global_stat(stat.key(), value);
    Ok(value)
}
