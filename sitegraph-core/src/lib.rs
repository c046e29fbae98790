pub mod error;
pub mod graph;
pub mod ingest;
pub mod path;
pub mod projection;
pub mod website;

pub use error::GraphError;
pub use graph::WebGraph;
pub use ingest::{DomainIndex, IngestOptions, IngestSummary, RawStats, build_graph};
pub use path::PathPair;
pub use projection::Projection;
pub use website::{StatValue, Stats, Website};
