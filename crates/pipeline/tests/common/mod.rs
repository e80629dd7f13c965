//! Common test utilities

use async_trait::async_trait;
use kgraph_core::{EdgeRecord, EdgeType, NewEdge, NodeId, NodeLabel, NodeRecord, Properties};
use kgraph_db::{init_memory, DbError, GraphStore, MemoryStore, SurrealStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Create a test store with an in-memory SurrealDB
pub async fn create_test_store() -> Arc<SurrealStore> {
    let db = init_memory().await.expect("Failed to create test database");
    Arc::new(SurrealStore::new(db))
}

/// Store that starts failing writes after a fixed number of them succeed
pub struct FlakyStore {
    inner: MemoryStore,
    writes_left: AtomicUsize,
}

impl FlakyStore {
    pub fn failing_after(writes: usize) -> Self {
        Self {
            inner: MemoryStore::new(),
            writes_left: AtomicUsize::new(writes),
        }
    }

    fn take_write(&self) -> Result<(), DbError> {
        self.writes_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .map(|_| ())
            .map_err(|_| DbError::Connection("store went away".into()))
    }
}

#[async_trait]
impl GraphStore for FlakyStore {
    async fn wipe(&self) -> Result<(), DbError> {
        self.take_write()?;
        self.inner.wipe().await
    }

    async fn create_node(&self, label: NodeLabel, properties: Properties) -> Result<NodeId, DbError> {
        self.take_write()?;
        self.inner.create_node(label, properties).await
    }

    async fn create_edge(&self, edge: NewEdge) -> Result<(), DbError> {
        self.take_write()?;
        self.inner.create_edge(edge).await
    }

    async fn nodes_by_label(&self, label: NodeLabel) -> Result<Vec<NodeRecord>, DbError> {
        self.inner.nodes_by_label(label).await
    }

    async fn edges_by_type(&self, edge_type: EdgeType) -> Result<Vec<EdgeRecord>, DbError> {
        self.inner.edges_by_type(edge_type).await
    }
}
