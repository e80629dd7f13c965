//! Graph store error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    /// The store could not be reached or is no longer usable
    #[error("Store unavailable: {0}")]
    Connection(String),

    #[error("No {0} with id {1}")]
    NotFound(String, String),

    #[error("Schema initialization failed: {0}")]
    SchemaInit(String),

    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),
}

pub type Result<T> = std::result::Result<T, DbError>;
