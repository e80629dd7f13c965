//! Model error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Edge index references node {index} but only {num_nodes} feature rows exist")]
    NodeIndexOutOfRange { index: usize, num_nodes: usize },

    #[error("Edge references unknown node: {0}")]
    UnknownNode(String),

    #[error("Invalid model configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
