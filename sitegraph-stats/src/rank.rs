use crate::error::Result;
use crate::vertex::engagement_rating;
use sitegraph_core::WebGraph;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

/// Position of every website when ordered by engagement rating, highest first.
///
/// The sort is stable, but websites are fed to it in the graph's own
/// (unordered) iteration order, so equal ratings rank in no particular order.
pub fn rank_all(g: &WebGraph) -> Result<HashMap<String, usize>> {
    let mut ratings: Vec<(&str, f64)> = g
        .websites()
        .map(|site| Ok((site.domain(), engagement_rating(site)?)))
        .collect::<Result<_>>()?;

    ratings.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    debug!("Ranked {} websites by engagement", ratings.len());

    Ok(ratings
        .into_iter()
        .enumerate()
        .map(|(position, (domain, _))| (domain.to_string(), position))
        .collect())
}

/// 0-based rank of `domain` by engagement rating, or `None` if the graph has
/// no such website.
pub fn predict_rank(g: &WebGraph, domain: &str) -> Result<Option<usize>> {
    if !g.contains(domain) {
        return Ok(None);
    }
    Ok(rank_all(g)?.get(domain).copied())
}
