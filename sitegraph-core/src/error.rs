use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Duplicate website: {0} is already in the graph")]
    DuplicateVertex(String),

    #[error("Unknown website: {0}")]
    UnknownVertex(String),

    #[error("Self loop: {0} cannot link to itself")]
    SelfLoop(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;
