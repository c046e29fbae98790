use sitegraph::report::*;
use sitegraph_core::{IngestSummary, StatValue, Stats, WebGraph};
use sitegraph_stats::{PipelineOptions, StatsError, annotate};
use tempfile::NamedTempFile;

fn traffic(daily_min: f64, pageviews: f64, ratio: f64, links: i64, tranco: i64) -> Stats {
    let mut s = Stats::new();
    s.insert("daily_min".to_string(), StatValue::Float(daily_min));
    s.insert("daily_pageviews".to_string(), StatValue::Float(pageviews));
    s.insert("traffic_ratio".to_string(), StatValue::Float(ratio));
    s.insert("site_links".to_string(), StatValue::Int(links));
    s.insert("tranco_rank".to_string(), StatValue::Int(tranco));
    s
}

fn annotated(options: PipelineOptions) -> WebGraph {
    let mut g = WebGraph::new();
    g.add_vertex("web1.com", traffic(10.0, 5.0, 0.5, 10, 20)).unwrap();
    g.add_vertex("web2.com", traffic(20.0, 10.0, 0.3, 15, 10)).unwrap();
    g.add_edge("web1.com", "web2.com", Stats::new()).unwrap();
    annotate(&mut g, &options).unwrap();
    g
}

// ============================================================================
// Report Format Tests
// ============================================================================

#[test]
fn test_report_format_from_str() {
    assert_eq!(ReportFormat::from_str("text"), Some(ReportFormat::Text));
    assert_eq!(ReportFormat::from_str("JSON"), Some(ReportFormat::Json));
    assert_eq!(ReportFormat::from_str("html"), None);
}

// ============================================================================
// Report Data Tests
// ============================================================================

#[test]
fn test_gather_report_data() {
    let g = annotated(PipelineOptions::default());
    let data = gather_report_data(&g, IngestSummary::default(), 10).unwrap();

    assert_eq!(data.total_websites, 2);
    assert_eq!(data.total_links, 1);
    assert_eq!(data.global_stats.len(), 7);
    assert_eq!(data.global_stats["global_daily_min"], 15.0);

    let ranks: Vec<(&str, usize)> = data
        .top_sites
        .iter()
        .map(|site| (site.domain.as_str(), site.rank))
        .collect();
    assert_eq!(ranks, vec![("web2.com", 0), ("web1.com", 1)]);
}

#[test]
fn test_gather_report_data_percentages() {
    let g = annotated(PipelineOptions::default());
    let data = gather_report_data(&g, IngestSummary::default(), 10).unwrap();
    let web1 = &data.top_sites[1];

    assert_eq!(web1.engagement_rating, 74.02);
    assert_eq!(web1.daily_min_vs_global, -33.33);
    assert_eq!(web1.min_per_page_vs_global, 0.0);
    // 74.02 against the stored average 94.35
    assert_eq!(web1.engagement_vs_global, -21.55);
    assert_eq!(web1.out_degree, 1);
    assert!(web1.page_rank.is_none());
}

#[test]
fn test_gather_report_data_top_limit() {
    let g = annotated(PipelineOptions::default());
    let data = gather_report_data(&g, IngestSummary::default(), 1).unwrap();

    assert_eq!(data.top_sites.len(), 1);
    assert_eq!(data.top_sites[0].domain, "web2.com");
}

#[test]
fn test_gather_report_data_link_analytics() {
    let g = annotated(PipelineOptions::default().with_link_analytics(true));
    let data = gather_report_data(&g, IngestSummary::default(), 10).unwrap();

    for site in &data.top_sites {
        assert!(site.page_rank.is_some());
        assert!(site.harmonic_centrality.is_some());
    }
}

#[test]
fn test_gather_report_data_reads_stored_values() {
    let mut g = annotated(PipelineOptions::default());
    let web1 = g.website_mut("web1.com").unwrap();
    web1.set_stat("predicted_rank", 0usize);
    web1.set_stat("engagement_rating", 50.0);
    g.website_mut("web2.com").unwrap().set_stat("predicted_rank", 1usize);
    g.set_global_stat("global_engagement_rating", 100.0);

    let data = gather_report_data(&g, IngestSummary::default(), 10).unwrap();
    let first = &data.top_sites[0];

    assert_eq!(first.domain, "web1.com");
    assert_eq!(first.rank, 0);
    assert_eq!(first.engagement_rating, 50.0);
    assert_eq!(first.engagement_vs_global, -50.0);
}

#[test]
fn test_gather_report_data_missing_stats() {
    let mut g = WebGraph::new();
    g.add_vertex("bare.com", Stats::new()).unwrap();
    assert!(gather_report_data(&g, IngestSummary::default(), 10).is_err());
}

#[test]
fn test_gather_report_data_requires_annotation() {
    let mut g = WebGraph::new();
    g.add_vertex("web1.com", traffic(10.0, 5.0, 0.5, 10, 20)).unwrap();

    let err = gather_report_data(&g, IngestSummary::default(), 10).unwrap_err();
    assert_eq!(
        err,
        StatsError::MissingStat {
            domain: "web1.com".to_string(),
            stat: "predicted_rank",
        }
    );
}

// ============================================================================
// Report Rendering Tests
// ============================================================================

#[test]
fn test_generate_text_report() {
    let g = annotated(PipelineOptions::default());
    let data = gather_report_data(&g, IngestSummary::default(), 10).unwrap();
    let report = generate_text_report(&data);

    assert!(report.contains("SITEGRAPH ENGAGEMENT REPORT"));
    assert!(report.contains("Websites:     2"));
    assert!(report.contains("GLOBAL AVERAGES"));
    assert!(report.contains("[0] web2.com"));
    assert!(report.contains("[1] web1.com"));
    assert!(report.contains("-33.33% vs global"));
    assert!(report.contains("End of Report"));
}

#[test]
fn test_generate_text_report_empty() {
    let data = gather_report_data(&WebGraph::new(), IngestSummary::default(), 10).unwrap();
    let report = generate_text_report(&data);

    assert!(report.contains("(no websites)"));
    assert!(!report.contains("GLOBAL AVERAGES"));
}

#[test]
fn test_generate_json_report() {
    let g = annotated(PipelineOptions::default());
    let data = gather_report_data(&g, IngestSummary::default(), 10).unwrap();
    let json = generate_json_report(&data).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    let report = &parsed["report"];
    assert_eq!(report["metadata"]["generator"], "Sitegraph");
    assert!(report["metadata"]["generated_at"].is_string());
    assert_eq!(report["summary"]["total_websites"], 2);
    assert_eq!(report["global_stats"]["global_daily_min"], 15.0);
    assert_eq!(report["top_sites"][0]["domain"], "web2.com");
    assert!(report["top_sites"][0].get("page_rank").is_none());
}

#[test]
fn test_report_data_round_trips_through_serde() {
    let g = annotated(PipelineOptions::default().with_structural(true));
    let data = gather_report_data(&g, IngestSummary::default(), 10).unwrap();

    let json = serde_json::to_string(&data).unwrap();
    let restored: ReportData = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.top_sites.len(), data.top_sites.len());
    assert_eq!(
        restored.global_stats.keys().collect::<Vec<_>>(),
        data.global_stats.keys().collect::<Vec<_>>()
    );
    assert_eq!(restored.top_sites[0].domain, "web2.com");
}

#[test]
fn test_save_report() {
    let temp_file = NamedTempFile::new().unwrap();
    save_report("hello report", temp_file.path()).unwrap();

    let content = std::fs::read_to_string(temp_file.path()).unwrap();
    assert_eq!(content, "hello report");
}
