//! Statistics computed for a single website.
//!
//! Functions that divide by a raw traffic field fail with
//! [`StatsError::DivisionByZero`] when that field is zero, because a zero
//! there means bad data. Ratios over graph structure (degree, neighbour
//! popularity) return `0.0` instead, since a website with no links is a
//! perfectly valid state.
//!
//! Results are rounded to [`PRECISION`] decimal places, except
//! [`neighbours_avg_popularity`], which keeps one more. Degrees and
//! [`popularity`] are exact.

use crate::error::{Result, StatsError};
use sitegraph_core::{WebGraph, Website};

pub const DAILY_MIN: &str = "daily_min";
pub const DAILY_PAGEVIEWS: &str = "daily_pageviews";
pub const TRAFFIC_RATIO: &str = "traffic_ratio";
pub const SITE_LINKS: &str = "site_links";
pub const TRANCO_RANK: &str = "tranco_rank";

/// Decimal places kept on stored statistics.
pub const PRECISION: i32 = 2;

/// Round half away from zero to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

pub(crate) fn required(site: &Website, stat: &'static str) -> Result<f64> {
    site.stat(stat)
        .map(|v| v.as_f64())
        .ok_or_else(|| StatsError::MissingStat {
            domain: site.domain().to_string(),
            stat,
        })
}

fn nonzero(site: &Website, stat: &'static str, value: f64) -> Result<f64> {
    if value == 0.0 {
        return Err(StatsError::DivisionByZero {
            domain: site.domain().to_string(),
            stat,
        });
    }
    Ok(value)
}

/// Average minutes spent per page: `daily_min / daily_pageviews`.
pub fn min_per_page(site: &Website) -> Result<f64> {
    let daily_min = required(site, DAILY_MIN)?;
    let daily_pageviews = nonzero(site, DAILY_PAGEVIEWS, required(site, DAILY_PAGEVIEWS)?)?;
    Ok(round_to(daily_min / daily_pageviews, PRECISION))
}

/// Share of traffic arriving from search engines, as a percentage.
pub fn search_traffic(site: &Website) -> Result<f64> {
    Ok(round_to(required(site, TRAFFIC_RATIO)? * 100.0, PRECISION))
}

/// Share of traffic attributed to linking websites, as a percentage.
pub fn links_traffic(site: &Website) -> Result<f64> {
    let daily_pageviews = required(site, DAILY_PAGEVIEWS)?;
    let site_links = required(site, SITE_LINKS)?;
    let total = nonzero(site, DAILY_PAGEVIEWS, site_links + daily_pageviews)?;
    Ok(round_to(site_links / total * 100.0, PRECISION))
}

/// Composite engagement score.
///
/// `sqrt(activity) * sqrt(quality) * sqrt(link_influence)` where
/// activity is `daily_min * daily_pageviews`, quality is the mean of
/// [`min_per_page`] and [`search_traffic`], and link influence is
/// `ln(links_traffic + 1)`. The factors multiply, so a website that is zero
/// on any one of them scores zero overall.
///
/// The intermediate statistics are recomputed, rounded, from the four raw
/// fields and never read back from the website's stored stats.
pub fn engagement_rating(site: &Website) -> Result<f64> {
    let daily_min = required(site, DAILY_MIN)?;
    let daily_pageviews = required(site, DAILY_PAGEVIEWS)?;

    let activity = daily_min * daily_pageviews;
    let quality = (min_per_page(site)? + search_traffic(site)?) / 2.0;
    let link_influence = (links_traffic(site)? + 1.0).ln();

    Ok(round_to(
        activity.sqrt() * quality.sqrt() * link_influence.sqrt(),
        PRECISION,
    ))
}

pub fn degree(site: &Website) -> usize {
    site.in_degree() + site.out_degree()
}

pub fn in_degree(site: &Website) -> usize {
    site.in_degree()
}

pub fn out_degree(site: &Website) -> usize {
    site.out_degree()
}

/// `1 / tranco_rank`; larger means more popular.
pub fn popularity(site: &Website) -> Result<f64> {
    let rank = nonzero(site, TRANCO_RANK, required(site, TRANCO_RANK)?)?;
    Ok(1.0 / rank)
}

fn outgoing<'g>(g: &'g WebGraph, site: &'g Website) -> impl Iterator<Item = &'g Website> {
    site.links_out().iter().filter_map(move |d| g.website(d))
}

/// Mean popularity of the websites this one links to, `0.0` if it links nowhere.
pub fn neighbours_avg_popularity(g: &WebGraph, site: &Website) -> Result<f64> {
    let mut total = 0.0;
    let mut count = 0usize;
    for neighbour in outgoing(g, site) {
        total += popularity(neighbour)?;
        count += 1;
    }
    if count == 0 {
        return Ok(0.0);
    }
    Ok(round_to(total / count as f64, PRECISION + 1))
}

/// Largest in-degree among the websites this one links to, `0.0` if it links nowhere.
pub fn neighbour_largest_in_degree(g: &WebGraph, site: &Website) -> f64 {
    outgoing(g, site)
        .map(Website::in_degree)
        .max()
        .unwrap_or(0) as f64
}

fn popularity_per(site: &Website, divisor: f64) -> Result<f64> {
    if divisor == 0.0 {
        return Ok(0.0);
    }
    Ok(round_to(popularity(site)? / divisor, PRECISION))
}

pub fn popularity_per_degree(site: &Website) -> Result<f64> {
    popularity_per(site, degree(site) as f64)
}

pub fn popularity_per_neighbours_avg_popularity(g: &WebGraph, site: &Website) -> Result<f64> {
    popularity_per(site, neighbours_avg_popularity(g, site)?)
}

pub fn popularity_per_neighbour_largest_in_degree(g: &WebGraph, site: &Website) -> Result<f64> {
    popularity_per(site, neighbour_largest_in_degree(g, site))
}
