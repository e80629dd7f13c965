//! Graph store layer
//!
//! Defines the [`GraphStore`] capability and its backings: SurrealDB
//! (embedded, in-memory or RocksDB) and a plain in-process store.

pub mod error;
pub mod memory;
pub mod schema;
pub mod store;
pub mod surreal;

pub use error::{DbError, Result};
pub use memory::MemoryStore;
pub use store::GraphStore;
pub use surreal::SurrealStore;

use surrealdb::engine::local::{Db, Mem};
use surrealdb::Surreal;

/// Database connection type
pub type DbConnection = Surreal<Db>;

/// Initialize database with RocksDB (persistent)
#[cfg(feature = "rocksdb")]
pub async fn init_persistent(path: impl AsRef<std::path::Path>) -> Result<DbConnection> {
    let db = Surreal::new::<surrealdb::engine::local::RocksDb>(path.as_ref()).await?;
    setup_database(&db).await?;
    Ok(db)
}

/// Initialize database in-memory (for testing)
pub async fn init_memory() -> Result<DbConnection> {
    let db = Surreal::new::<Mem>(()).await?;
    setup_database(&db).await?;
    Ok(db)
}

/// Setup database namespace, database, and schema
async fn setup_database(db: &DbConnection) -> Result<()> {
    db.use_ns("kgraph").use_db("graph").await?;
    schema::initialize_schema(db).await?;
    Ok(())
}
