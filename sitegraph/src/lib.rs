pub mod handlers;
pub mod report;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    InputFiles, PathQuery, analyze_graph, expand_path, load_edges, load_graph,
    load_vertex_mappings, load_website_stats, run_path_query,
};

pub use report::{
    ReportData, ReportFormat, SiteRow, gather_report_data, generate_json_report,
    generate_text_report, save_report,
};
