//! Pipeline error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Store error: {0}")]
    Store(#[from] kgraph_db::DbError),

    #[error("Graph error: {0}")]
    Core(#[from] kgraph_core::CoreError),

    #[error("Node {id} is missing property '{property}'")]
    MissingProperty { id: String, property: &'static str },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
