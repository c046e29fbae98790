// Report generation from an annotated web graph

use serde::{Deserialize, Serialize};
use sitegraph_core::{IngestSummary, WebGraph, Website};
use sitegraph_stats::vertex::DAILY_MIN;
use sitegraph_stats::{GlobalStat, StatKind, StatsError, percent_difference};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportData {
    pub total_websites: usize,
    pub total_links: usize,
    pub ingest: IngestSummary,
    /// Graph-wide averages, keyed by their stored name.
    pub global_stats: BTreeMap<String, f64>,
    pub top_sites: Vec<SiteRow>,
}

/// One website in the report, with its figures and how far each sits from
/// the graph-wide average, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRow {
    pub rank: usize,
    pub domain: String,
    pub engagement_rating: f64,
    pub engagement_vs_global: f64,
    pub daily_min: f64,
    pub daily_min_vs_global: f64,
    pub min_per_page: f64,
    pub min_per_page_vs_global: f64,
    pub links_traffic: f64,
    pub links_traffic_vs_global: f64,
    pub in_degree: usize,
    pub out_degree: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_rank: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub harmonic_centrality: Option<f64>,
}

fn stored(site: &Website, kind: StatKind) -> Result<f64, StatsError> {
    site.stat(kind.key())
        .map(|v| v.as_f64())
        .ok_or_else(|| StatsError::MissingStat {
            domain: site.domain().to_string(),
            stat: kind.key(),
        })
}

fn vs_global(g: &WebGraph, value: f64, stat: GlobalStat) -> f64 {
    // an absent average is no baseline, like a zero one
    percent_difference(value, g.global_stat(stat.key()).unwrap_or(0.0))
}

/// Summarise an annotated `g`, listing the `top` websites by their stored
/// predicted rank.
///
/// Every figure is read from what the pipeline stored on the graph; nothing
/// is recomputed. A website without its engagement statistics is an error.
pub fn gather_report_data(
    g: &WebGraph,
    ingest: IngestSummary,
    top: usize,
) -> Result<ReportData, StatsError> {
    let mut ranked: Vec<(usize, &Website)> = g
        .websites()
        .map(|site| Ok((stored(site, StatKind::PredictedRank)? as usize, site)))
        .collect::<Result<_, StatsError>>()?;
    ranked.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.domain().cmp(b.1.domain())));

    let mut top_sites = Vec::with_capacity(top.min(ranked.len()));
    for (rank, site) in ranked.into_iter().take(top) {
        let engagement_rating = stored(site, StatKind::EngagementRating)?;
        let daily_min = site.stat(DAILY_MIN).map(|v| v.as_f64()).unwrap_or(0.0);
        let min_per_page = stored(site, StatKind::MinPerPage)?;
        let links_traffic = stored(site, StatKind::LinksTraffic)?;

        top_sites.push(SiteRow {
            rank,
            domain: site.domain().to_string(),
            engagement_vs_global: vs_global(g, engagement_rating, GlobalStat::EngagementRating),
            daily_min_vs_global: vs_global(g, daily_min, GlobalStat::DailyMin),
            min_per_page_vs_global: vs_global(g, min_per_page, GlobalStat::MinPerPage),
            links_traffic_vs_global: vs_global(g, links_traffic, GlobalStat::LinksTraffic),
            engagement_rating,
            daily_min,
            min_per_page,
            links_traffic,
            in_degree: site.in_degree(),
            out_degree: site.out_degree(),
            page_rank: site.stat(StatKind::PageRank.key()).map(|v| v.as_f64()),
            harmonic_centrality: site
                .stat(StatKind::HarmonicCentrality.key())
                .map(|v| v.as_f64()),
        });
    }

    Ok(ReportData {
        total_websites: g.vertex_count(),
        total_links: g.edge_count(),
        ingest,
        global_stats: g
            .global_stats()
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect(),
        top_sites,
    })
}

fn section(report: &mut String, title: &str) {
    report.push_str(RULE);
    report.push('\n');
    report.push_str(title);
    report.push('\n');
    report.push_str(RULE);
    report.push_str("\n\n");
}

fn signed_percent(value: f64) -> String {
    format!("{:+.2}%", value)
}

pub fn generate_text_report(data: &ReportData) -> String {
    let mut report = String::new();

    section(&mut report, "SITEGRAPH ENGAGEMENT REPORT");
    report.push_str(&format!("Websites:     {}\n", data.total_websites));
    report.push_str(&format!("Links:        {}\n", data.total_links));
    report.push_str(&format!(
        "Dropped:      {} websites, {} links\n\n",
        data.ingest.websites_dropped, data.ingest.edges_skipped
    ));

    if !data.global_stats.is_empty() {
        section(&mut report, "GLOBAL AVERAGES");
        for (name, value) in &data.global_stats {
            let label = name.strip_prefix("global_").unwrap_or(name);
            report.push_str(&format!("  {:<20} {:>12.2}\n", label, value));
        }
        report.push('\n');
    }

    section(&mut report, "TOP WEBSITES");
    if data.top_sites.is_empty() {
        report.push_str("  (no websites)\n\n");
    }
    for site in &data.top_sites {
        report.push_str(&format!("[{}] {}\n", site.rank, site.domain));
        report.push_str(&format!(
            "  Engagement:    {:>10.2}  ({} vs global)\n",
            site.engagement_rating,
            signed_percent(site.engagement_vs_global)
        ));
        report.push_str(&format!(
            "  Daily minutes: {:>10.2}  ({} vs global)\n",
            site.daily_min,
            signed_percent(site.daily_min_vs_global)
        ));
        report.push_str(&format!(
            "  Min per page:  {:>10.2}  ({} vs global)\n",
            site.min_per_page,
            signed_percent(site.min_per_page_vs_global)
        ));
        report.push_str(&format!(
            "  Links traffic: {:>10.2}  ({} vs global)\n",
            site.links_traffic,
            signed_percent(site.links_traffic_vs_global)
        ));
        report.push_str(&format!(
            "  Links:         {} in, {} out\n",
            site.in_degree, site.out_degree
        ));
        if let Some(score) = site.page_rank {
            report.push_str(&format!("  PageRank:      {:.6}\n", score));
        }
        if let Some(score) = site.harmonic_centrality {
            report.push_str(&format!("  Harmonic:      {:.2}\n", score));
        }
        report.push('\n');
    }

    report.push_str(RULE);
    report.push('\n');
    report.push_str("                          End of Report\n");
    report.push_str(RULE);
    report.push('\n');

    report
}

pub fn generate_json_report(data: &ReportData) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "Sitegraph",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "summary": {
                "total_websites": data.total_websites,
                "total_links": data.total_links,
                "ingest": data.ingest
            },
            "global_stats": data.global_stats,
            "top_sites": data.top_sites
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
