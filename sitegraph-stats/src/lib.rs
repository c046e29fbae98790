pub mod analytics;
pub mod error;
pub mod global;
pub mod loader;
pub mod pipeline;
pub mod rank;
pub mod vertex;

pub use analytics::{PageRankConfig, harmonic_centrality, page_rank};
pub use error::StatsError;
pub use global::{GlobalStat, percent_difference, percentify};
pub use loader::{StatKind, load, load_global};
pub use pipeline::{PipelineOptions, annotate};
pub use rank::{predict_rank, rank_all};
