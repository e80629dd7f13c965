//! In-process graph store

use crate::{DbError, GraphStore, Result};
use async_trait::async_trait;
use kgraph_core::{EdgeRecord, EdgeType, NewEdge, NodeId, NodeLabel, NodeRecord, Properties};
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};
use tracing::instrument;

#[derive(Default)]
struct MemoryGraph {
    next_id: u64,
    nodes: Vec<NodeRecord>,
    node_ids: HashSet<NodeId>,
    edges: Vec<EdgeRecord>,
}

/// A [`GraphStore`] kept in a `Vec` behind a mutex
///
/// Ids are decimal counters that keep increasing across wipes.
#[derive(Default)]
pub struct MemoryStore {
    graph: Mutex<MemoryGraph>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryGraph>> {
        self.graph
            .lock()
            .map_err(|_| DbError::Connection("memory store lock poisoned".into()))
    }
}

#[async_trait]
impl GraphStore for MemoryStore {
    #[instrument(skip(self))]
    async fn wipe(&self) -> Result<()> {
        let mut graph = self.lock()?;
        graph.nodes.clear();
        graph.node_ids.clear();
        graph.edges.clear();
        Ok(())
    }

    #[instrument(skip(self, properties))]
    async fn create_node(&self, label: NodeLabel, properties: Properties) -> Result<NodeId> {
        let mut graph = self.lock()?;
        let id = NodeId::new(graph.next_id.to_string());
        graph.next_id += 1;
        graph.node_ids.insert(id.clone());
        graph.nodes.push(NodeRecord::new(id.clone(), label, properties));
        Ok(id)
    }

    #[instrument(skip(self, edge), fields(edge_type = %edge.edge_type))]
    async fn create_edge(&self, edge: NewEdge) -> Result<()> {
        let mut graph = self.lock()?;
        for id in [&edge.source, &edge.target] {
            if !graph.node_ids.contains(id) {
                return Err(DbError::NotFound("node".into(), id.to_string()));
            }
        }
        graph.edges.push(edge.into());
        Ok(())
    }

    async fn nodes_by_label(&self, label: NodeLabel) -> Result<Vec<NodeRecord>> {
        let graph = self.lock()?;
        Ok(graph.nodes.iter().filter(|n| n.label == label).cloned().collect())
    }

    async fn edges_by_type(&self, edge_type: EdgeType) -> Result<Vec<EdgeRecord>> {
        let graph = self.lock()?;
        Ok(graph
            .edges
            .iter()
            .filter(|e| e.edge_type == edge_type)
            .cloned()
            .collect())
    }
}
