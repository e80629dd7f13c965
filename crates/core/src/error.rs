//! Error types for the core domain

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Edge list length mismatch: {edges} edge pairs but {weights} weights")]
    EdgeWeightMismatch { edges: usize, weights: usize },

    #[error("Edge references node {0} which is not in the exported node list")]
    DanglingEdge(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
