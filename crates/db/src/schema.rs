//! SurrealDB schema definitions

use crate::{DbConnection, DbError, Result};
use tracing::info;

/// Table holding every graph node, distinguished by `label`
pub const NODE_TABLE: &str = "node";

/// Initialize the database schema
pub async fn initialize_schema(db: &DbConnection) -> Result<()> {
    info!("Initializing database schema...");

    apply_definitions(db, SCHEMA_DEFINITION).await?;

    info!("Schema initialized successfully");
    Ok(())
}

async fn apply_definitions(db: &DbConnection, definitions: &str) -> Result<()> {
    db.query(definitions)
        .await
        .and_then(|response| response.check())
        .map_err(|e| DbError::SchemaInit(e.to_string()))?;
    Ok(())
}

const SCHEMA_DEFINITION: &str = r#"
-- ============================================
-- NODES
-- ============================================

DEFINE TABLE IF NOT EXISTS node SCHEMALESS;
DEFINE FIELD IF NOT EXISTS label ON node TYPE string;
DEFINE FIELD IF NOT EXISTS seq ON node TYPE int;

-- ============================================
-- GRAPH EDGE TABLE
-- ============================================

DEFINE TABLE IF NOT EXISTS relation SCHEMALESS;
DEFINE FIELD IF NOT EXISTS kind ON relation TYPE string;
DEFINE FIELD IF NOT EXISTS seq ON relation TYPE int;

-- ============================================
-- INDEXES
-- ============================================

DEFINE INDEX IF NOT EXISTS idx_node_label ON node FIELDS label;
DEFINE INDEX IF NOT EXISTS idx_relation_kind ON relation FIELDS kind;
"#;
