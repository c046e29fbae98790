use crate::report::{
    ReportData, ReportFormat, gather_report_data, generate_json_report, generate_text_report,
    save_report,
};
use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use sitegraph_core::{
    DomainIndex, IngestOptions, IngestSummary, RawStats, WebGraph, build_graph,
};
use sitegraph_stats::{PipelineOptions, annotate};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// The three input files a web graph is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFiles {
    pub vertices: PathBuf,
    pub edges: PathBuf,
    pub stats: PathBuf,
}

impl InputFiles {
    pub fn from_args(args: &ArgMatches) -> Result<Self> {
        let path_arg = |name: &str| -> Result<PathBuf> {
            args.get_one::<String>(name)
                .map(|p| expand_path(p))
                .with_context(|| format!("--{} is required", name))
        };
        Ok(Self {
            vertices: path_arg("vertices")?,
            edges: path_arg("edges")?,
            stats: path_arg("stats")?,
        })
    }
}

/// What the `path` command asks of the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathQuery {
    Directed,
    Undirected,
    Strong,
    Bounded(usize),
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

fn content_lines(path: &Path) -> Result<Vec<(usize, String)>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| (idx + 1, line.trim().to_string()))
        .collect())
}

/// Load the id/domain index from a file of `id domain` lines.
pub fn load_vertex_mappings(path: &Path) -> Result<DomainIndex> {
    let mut index = DomainIndex::new();
    for (line_no, line) in content_lines(path)? {
        let mut fields = line.split_whitespace();
        let (Some(id), Some(domain), None) = (fields.next(), fields.next(), fields.next()) else {
            bail!("{}:{}: expected 'id domain', got '{}'", path.display(), line_no, line);
        };
        let id: u32 = id
            .parse()
            .with_context(|| format!("{}:{}: invalid site id '{}'", path.display(), line_no, id))?;
        index.insert(id, domain);
    }
    debug!("Loaded {} vertex mappings from {}", index.len(), path.display());
    Ok(index)
}

/// Load the directed edge list from a file of `source_id destination_id` lines.
pub fn load_edges(path: &Path) -> Result<Vec<(u32, u32)>> {
    let mut edges = Vec::new();
    for (line_no, line) in content_lines(path)? {
        let ids: Vec<&str> = line.split_whitespace().collect();
        let [src, dst] = ids.as_slice() else {
            bail!(
                "{}:{}: expected 'source_id destination_id', got '{}'",
                path.display(),
                line_no,
                line
            );
        };
        let parse = |id: &str| -> Result<u32> {
            id.parse()
                .with_context(|| format!("{}:{}: invalid site id '{}'", path.display(), line_no, id))
        };
        edges.push((parse(src)?, parse(dst)?));
    }
    debug!("Loaded {} edges from {}", edges.len(), path.display());
    Ok(edges)
}

/// One row of the stats CSV, in column order.
#[derive(Debug, Deserialize)]
struct StatsRow {
    alexa_rank: i64,
    domain: String,
    daily_min: f64,
    daily_pageviews: f64,
    traffic_ratio: f64,
    site_links: i64,
    tranco_rank: i64,
}

impl From<StatsRow> for RawStats {
    fn from(row: StatsRow) -> Self {
        RawStats {
            alexa_rank: row.alexa_rank,
            daily_min: row.daily_min,
            daily_pageviews: row.daily_pageviews,
            traffic_ratio: row.traffic_ratio,
            site_links: row.site_links,
            tranco_rank: row.tranco_rank,
        }
    }
}

/// Load per-website traffic statistics from the stats CSV, keyed by site id.
///
/// The first row is a header. Columns are positional: `alexa_rank, domain,
/// daily_min, daily_pageviews, traffic_ratio, site_links, tranco_rank`.
/// Fields may be quoted and are trimmed. Rows for domains missing from
/// `index` are ignored.
pub fn load_website_stats(path: &Path, index: &DomainIndex) -> Result<HashMap<u32, RawStats>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut stats = HashMap::new();
    let mut ignored = 0usize;

    for result in reader.records() {
        let record =
            result.with_context(|| format!("{}: malformed stats row", path.display()))?;
        let line = record.position().map_or(0, |pos| pos.line());
        let row: StatsRow = record
            .deserialize(None)
            .with_context(|| format!("{}:{}: invalid stats row", path.display(), line))?;

        let Some(id) = index.id(&row.domain) else {
            ignored += 1;
            continue;
        };
        stats.insert(id, RawStats::from(row));
    }

    if ignored > 0 {
        warn!("Ignored {} stats rows for domains with no vertex mapping", ignored);
    }
    debug!("Loaded stats for {} websites from {}", stats.len(), path.display());
    Ok(stats)
}

/// Read all three input files and build the graph.
pub fn load_graph(files: &InputFiles, options: &IngestOptions) -> Result<(WebGraph, IngestSummary)> {
    let index = load_vertex_mappings(&files.vertices)?;
    let stats = load_website_stats(&files.stats, &index)?;
    let edges = load_edges(&files.edges)?;
    build_graph(&index, &stats, &edges, options).context("Failed to build web graph")
}

fn ingest_options(args: &ArgMatches, stats_only: bool) -> IngestOptions {
    let max_vertices = args
        .get_one::<usize>("max-vertices")
        .copied()
        .unwrap_or(sitegraph_core::ingest::DEFAULT_MAX_VERTICES);
    let excluded = args
        .get_many::<String>("exclude")
        .into_iter()
        .flatten()
        .cloned();

    IngestOptions::default()
        .with_stats_only(stats_only)
        .with_max_vertices(max_vertices)
        .with_excluded(excluded)
}

/// Build, annotate and summarise a graph.
///
/// Every website needs traffic statistics to be annotated, so websites
/// without them are never loaded.
pub fn analyze_graph(
    files: &InputFiles,
    ingest: &IngestOptions,
    pipeline: &PipelineOptions,
    top: usize,
) -> Result<ReportData> {
    let ingest = ingest.clone().with_stats_only(true);
    let (mut graph, summary) = load_graph(files, &ingest)?;
    annotate(&mut graph, pipeline).context("Failed to compute statistics")?;
    gather_report_data(&graph, summary, top).context("Failed to gather report data")
}

fn spinner(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

pub fn handle_analyze(args: &ArgMatches, quiet: bool) -> Result<()> {
    let files = InputFiles::from_args(args)?;
    let ingest = ingest_options(args, true);
    let pipeline = PipelineOptions::default()
        .with_structural(args.get_flag("structural"))
        .with_link_analytics(args.get_flag("link-analytics"));
    let top = args.get_one::<usize>("top").copied().unwrap_or(10);
    let format = args
        .get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        .unwrap_or(ReportFormat::Text);

    let progress = spinner(quiet);
    progress.set_message(format!("Analyzing {}", files.vertices.display()));
    let data = analyze_graph(&files, &ingest, &pipeline, top);
    progress.finish_and_clear();
    let data = data?;

    let report = match format {
        ReportFormat::Text => generate_text_report(&data),
        ReportFormat::Json => {
            generate_json_report(&data).context("Failed to serialize JSON report")?
        }
    };

    match args.get_one::<String>("output") {
        Some(output) => {
            let path = expand_path(output);
            save_report(&report, &path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            if !quiet {
                println!(
                    "{} Report saved to {}",
                    "✓".green().bold(),
                    path.display().to_string().bright_white()
                );
            }
        }
        None => print!("{}", report),
    }
    Ok(())
}

/// Render the answer to a path query as printable lines.
pub fn run_path_query(graph: &WebGraph, from: &str, to: &str, query: PathQuery) -> String {
    match query {
        PathQuery::Directed => describe_path(from, to, graph.path_directed(from, to).as_deref()),
        PathQuery::Undirected => {
            describe_path(from, to, graph.path_undirected(from, to).as_deref())
        }
        PathQuery::Strong => {
            let (forward, backward) = graph.strongly_connected(from, to);
            let verdict = if forward.is_some() && backward.is_some() {
                format!("{} strongly connected", "✓".green().bold())
            } else {
                format!("{} not strongly connected", "✗".red().bold())
            };
            format!(
                "{}\n{}\n{}\n",
                describe_path(from, to, forward.as_deref()).trim_end(),
                describe_path(to, from, backward.as_deref()).trim_end(),
                verdict
            )
        }
        PathQuery::Bounded(max_depth) => {
            if graph.bounded_path_directed_exists(from, to, max_depth) {
                format!(
                    "{} {} reaches {} within {} links\n",
                    "✓".green().bold(),
                    from,
                    to,
                    max_depth
                )
            } else {
                format!(
                    "{} {} does not reach {} within {} links\n",
                    "✗".red().bold(),
                    from,
                    to,
                    max_depth
                )
            }
        }
    }
}

fn describe_path(from: &str, to: &str, path: Option<&[String]>) -> String {
    match path {
        Some(path) => format!(
            "{} {} ({} links)\n",
            "✓".green().bold(),
            path.join(" -> "),
            path.len().saturating_sub(1)
        ),
        None => format!("{} no path from {} to {}\n", "✗".red().bold(), from, to),
    }
}

pub fn handle_path(args: &ArgMatches) -> Result<()> {
    let files = InputFiles::from_args(args)?;
    let ingest = ingest_options(args, args.get_flag("stats-only"));
    let (from, to) = match (args.get_one::<String>("FROM"), args.get_one::<String>("TO")) {
        (Some(from), Some(to)) => (from.as_str(), to.as_str()),
        _ => bail!("Both FROM and TO must be provided"),
    };

    let query = if args.get_flag("undirected") {
        PathQuery::Undirected
    } else if args.get_flag("strong") {
        PathQuery::Strong
    } else if let Some(depth) = args.get_one::<usize>("max-depth") {
        PathQuery::Bounded(*depth)
    } else {
        PathQuery::Directed
    };

    let (graph, _) = load_graph(&files, &ingest)?;
    for domain in [from, to] {
        if !graph.contains(domain) {
            bail!("Unknown website '{}' (not loaded from {})", domain, files.vertices.display());
        }
    }

    print!("{}", run_path_query(&graph, from, to, query));
    Ok(())
}
