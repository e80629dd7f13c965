//! The graph store capability
//!
//! Builders and exporters only talk to a [`GraphStore`], so any backing
//! that offers these operations can be swapped in. Every call either fully
//! succeeds or leaves the store unchanged for that call.

use crate::Result;
use async_trait::async_trait;
use kgraph_core::{EdgeRecord, EdgeType, NewEdge, NodeId, NodeLabel, NodeRecord, Properties};

#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Delete every node and edge.
    async fn wipe(&self) -> Result<()>;

    /// Create a node and return the identity the store assigned to it.
    async fn create_node(&self, label: NodeLabel, properties: Properties) -> Result<NodeId>;

    /// Create a directed edge between two existing nodes.
    async fn create_edge(&self, edge: NewEdge) -> Result<()>;

    /// All nodes with `label`, in creation order.
    async fn nodes_by_label(&self, label: NodeLabel) -> Result<Vec<NodeRecord>>;

    /// All edges of `edge_type`, in creation order.
    async fn edges_by_type(&self, edge_type: EdgeType) -> Result<Vec<EdgeRecord>>;

    /// Write a batch of edges.
    ///
    /// The default issues one [`create_edge`](GraphStore::create_edge) per
    /// edge and stops at the first failure.
    async fn create_edges(&self, edges: Vec<NewEdge>) -> Result<()> {
        for edge in edges {
            self.create_edge(edge).await?;
        }
        Ok(())
    }
}
