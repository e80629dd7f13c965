//! Graph Exporter - flattens the stored graph for numeric models

use crate::{PipelineError, Result};
use kgraph_core::edge::WEIGHT;
use kgraph_core::node::DESCRIPTION;
use kgraph_core::{EdgeType, ExportedGraph, ExportedNode, GraphStats, NodeId, NodeLabel};
use kgraph_db::GraphStore;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Read-only view of the store producing [`ExportedGraph`] snapshots
pub struct GraphExporter {
    store: Arc<dyn GraphStore>,
}

impl GraphExporter {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    /// Knowledge points with their text, and RELATED_TO edges as parallel
    /// index/weight lists. Node order is the store's creation order.
    #[instrument(skip(self))]
    pub async fn export(&self) -> Result<ExportedGraph> {
        let records = self.store.nodes_by_label(NodeLabel::KnowledgeNode).await?;

        let mut nodes = Vec::with_capacity(records.len());
        for record in records {
            let text = record
                .description()
                .ok_or_else(|| PipelineError::MissingProperty {
                    id: record.id.to_string(),
                    property: DESCRIPTION,
                })?
                .to_string();
            nodes.push(ExportedNode { id: record.id, text });
        }

        let known: HashSet<&NodeId> = nodes.iter().map(|n| &n.id).collect();
        let mut edge_index = Vec::new();
        let mut edge_weight = Vec::new();

        for edge in self.store.edges_by_type(EdgeType::RelatedTo).await? {
            if !known.contains(&edge.source) || !known.contains(&edge.target) {
                debug!("Skipping RELATED_TO edge {} -> {} outside knowledge nodes", edge.source, edge.target);
                continue;
            }
            let weight = edge.weight().ok_or_else(|| PipelineError::MissingProperty {
                id: format!("{}->{}", edge.source, edge.target),
                property: WEIGHT,
            })?;
            edge_index.push((edge.source, edge.target));
            edge_weight.push(weight as f32);
        }

        let graph = ExportedGraph {
            nodes,
            edge_index,
            edge_weight,
        };
        graph.validate()?;

        info!("Exported {} nodes and {} edges", graph.num_nodes(), graph.num_edges());
        Ok(graph)
    }

    /// Node and edge counts of the stored graph
    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<GraphStats> {
        Ok(GraphStats {
            course_count: self.store.nodes_by_label(NodeLabel::Course).await?.len(),
            knowledge_node_count: self.store.nodes_by_label(NodeLabel::KnowledgeNode).await?.len(),
            contains_count: self.store.edges_by_type(EdgeType::Contains).await?.len(),
            related_count: self.store.edges_by_type(EdgeType::RelatedTo).await?.len(),
        })
    }
}
