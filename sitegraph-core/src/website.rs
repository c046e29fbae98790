use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A single statistic value. Ranks and counts stay integers, everything else is a float.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Int(i64),
    Float(f64),
}

impl StatValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            StatValue::Int(v) => *v as f64,
            StatValue::Float(v) => *v,
        }
    }
}

impl From<i64> for StatValue {
    fn from(value: i64) -> Self {
        StatValue::Int(value)
    }
}

impl From<usize> for StatValue {
    fn from(value: usize) -> Self {
        StatValue::Int(value as i64)
    }
}

impl From<f64> for StatValue {
    fn from(value: f64) -> Self {
        StatValue::Float(value)
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Int(v) => write!(f, "{}", v),
            StatValue::Float(v) => write!(f, "{:.2}", v),
        }
    }
}

/// Named statistics attached to a website or an edge.
pub type Stats = HashMap<String, StatValue>;

/// A vertex of the web graph: one website, identified by its domain name.
///
/// The neighbour sets hold domain names rather than references, and are only
/// ever changed by [`crate::WebGraph::add_edge`], which records every edge on
/// both endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Website {
    domain: String,
    links_in: HashSet<String>,
    links_out: HashSet<String>,
    stats: Stats,
}

impl Website {
    pub(crate) fn new(domain: String, stats: Stats) -> Self {
        Self {
            domain,
            links_in: HashSet::new(),
            links_out: HashSet::new(),
            stats,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Websites linking to this one.
    pub fn links_in(&self) -> &HashSet<String> {
        &self.links_in
    }

    /// Websites this one links to.
    pub fn links_out(&self) -> &HashSet<String> {
        &self.links_out
    }

    pub fn in_degree(&self) -> usize {
        self.links_in.len()
    }

    pub fn out_degree(&self) -> usize {
        self.links_out.len()
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn stat(&self, name: &str) -> Option<StatValue> {
        self.stats.get(name).copied()
    }

    /// Store a statistic, replacing any previous value under the same name.
    pub fn set_stat(&mut self, name: impl Into<String>, value: impl Into<StatValue>) {
        self.stats.insert(name.into(), value.into());
    }

    pub(crate) fn link_in(&mut self, source: &str) {
        self.links_in.insert(source.to_string());
    }

    pub(crate) fn link_out(&mut self, destination: &str) {
        self.links_out.insert(destination.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_value_as_f64() {
        assert_eq!(StatValue::Int(3).as_f64(), 3.0);
        assert_eq!(StatValue::Float(2.5).as_f64(), 2.5);
    }

    #[test]
    fn test_set_stat_overwrites() {
        let mut site = Website::new("example.com".to_string(), Stats::new());
        site.set_stat("daily_min", 1.0);
        site.set_stat("daily_min", 2.0);
        assert_eq!(site.stat("daily_min"), Some(StatValue::Float(2.0)));
    }

    #[test]
    fn test_stat_value_display() {
        assert_eq!(StatValue::Int(7).to_string(), "7");
        assert_eq!(StatValue::Float(9.0909).to_string(), "9.09");
    }

    #[test]
    fn test_new_website_has_no_links() {
        let site = Website::new("example.com".to_string(), Stats::new());
        assert_eq!(site.in_degree(), 0);
        assert_eq!(site.out_degree(), 0);
    }
}
