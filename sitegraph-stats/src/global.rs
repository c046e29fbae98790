//! Graph-wide aggregates: the arithmetic mean of a per-website statistic.
//!
//! An empty graph averages to `0.0`. Raw fields missing on a website count
//! as zero; derived statistics propagate their errors. Averages and
//! percentages are rounded like the per-website statistics.

use crate::error::Result;
use crate::vertex::{self, DAILY_MIN, DAILY_PAGEVIEWS, PRECISION, SITE_LINKS, round_to};
use sitegraph_core::{WebGraph, Website};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobalStat {
    DailyMin,
    DailyPageviews,
    MinPerPage,
    SearchTraffic,
    SiteLinks,
    LinksTraffic,
    EngagementRating,
}

impl GlobalStat {
    pub const ALL: [GlobalStat; 7] = [
        GlobalStat::DailyMin,
        GlobalStat::DailyPageviews,
        GlobalStat::MinPerPage,
        GlobalStat::SearchTraffic,
        GlobalStat::SiteLinks,
        GlobalStat::LinksTraffic,
        GlobalStat::EngagementRating,
    ];

    /// Key under which the aggregate is stored in the graph's global stats.
    pub fn key(&self) -> &'static str {
        match self {
            GlobalStat::DailyMin => "global_daily_min",
            GlobalStat::DailyPageviews => "global_daily_pageviews",
            GlobalStat::MinPerPage => "global_min_per_page",
            GlobalStat::SearchTraffic => "global_search_traffic",
            GlobalStat::SiteLinks => "global_site_links",
            GlobalStat::LinksTraffic => "global_links_traffic",
            GlobalStat::EngagementRating => "global_engagement_rating",
        }
    }

    pub fn compute(&self, g: &WebGraph) -> Result<f64> {
        match self {
            GlobalStat::DailyMin => global_daily_min(g),
            GlobalStat::DailyPageviews => global_daily_pageviews(g),
            GlobalStat::MinPerPage => global_min_per_page(g),
            GlobalStat::SearchTraffic => global_search_traffic(g),
            GlobalStat::SiteLinks => global_site_links(g),
            GlobalStat::LinksTraffic => global_links_traffic(g),
            GlobalStat::EngagementRating => global_engagement_rating(g),
        }
    }
}

fn mean_of<F>(g: &WebGraph, stat: F) -> Result<f64>
where
    F: Fn(&Website) -> Result<f64>,
{
    let mut total = 0.0;
    let mut count = 0usize;
    for site in g.websites() {
        total += stat(site)?;
        count += 1;
    }
    if count == 0 {
        return Ok(0.0);
    }
    Ok(round_to(total / count as f64, PRECISION))
}

fn raw_or_zero(site: &Website, stat: &str) -> f64 {
    site.stat(stat).map(|v| v.as_f64()).unwrap_or(0.0)
}

pub fn global_daily_min(g: &WebGraph) -> Result<f64> {
    mean_of(g, |s| Ok(raw_or_zero(s, DAILY_MIN)))
}

pub fn global_daily_pageviews(g: &WebGraph) -> Result<f64> {
    mean_of(g, |s| Ok(raw_or_zero(s, DAILY_PAGEVIEWS)))
}

pub fn global_site_links(g: &WebGraph) -> Result<f64> {
    mean_of(g, |s| Ok(raw_or_zero(s, SITE_LINKS)))
}

pub fn global_min_per_page(g: &WebGraph) -> Result<f64> {
    mean_of(g, vertex::min_per_page)
}

pub fn global_search_traffic(g: &WebGraph) -> Result<f64> {
    mean_of(g, vertex::search_traffic)
}

pub fn global_links_traffic(g: &WebGraph) -> Result<f64> {
    mean_of(g, vertex::links_traffic)
}

pub fn global_engagement_rating(g: &WebGraph) -> Result<f64> {
    mean_of(g, vertex::engagement_rating)
}

/// Percentage difference of `value` from `baseline`; `0.0` when the baseline is zero.
pub fn percent_difference(value: f64, baseline: f64) -> f64 {
    if baseline == 0.0 {
        return 0.0;
    }
    round_to((value - baseline) / baseline * 100.0, PRECISION)
}

/// Percentage difference of `value` from the aggregate `aggregate(g)`.
///
/// A zero aggregate means there is no meaningful baseline, and yields `0.0`.
pub fn percentify<F>(value: f64, aggregate: F, g: &WebGraph) -> Result<f64>
where
    F: FnOnce(&WebGraph) -> Result<f64>,
{
    Ok(percent_difference(value, aggregate(g)?))
}
