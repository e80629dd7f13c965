//! The exported graph - the hand-off to training and evaluation code

use crate::{CoreError, NodeId, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A knowledge point as exported: store id plus raw text
///
/// Turning `text` into numeric features is left to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedNode {
    pub id: NodeId,
    pub text: String,
}

/// Flattened snapshot of the knowledge-point graph
///
/// `edge_index[k]` and `edge_weight[k]` describe the same RELATED_TO edge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportedGraph {
    pub nodes: Vec<ExportedNode>,
    pub edge_index: Vec<(NodeId, NodeId)>,
    pub edge_weight: Vec<f32>,
}

impl ExportedGraph {
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edge_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check the parallel-array and referential guarantees
    pub fn validate(&self) -> Result<()> {
        if self.edge_index.len() != self.edge_weight.len() {
            return Err(CoreError::EdgeWeightMismatch {
                edges: self.edge_index.len(),
                weights: self.edge_weight.len(),
            });
        }

        let ids: HashSet<&NodeId> = self.nodes.iter().map(|n| &n.id).collect();
        for (source, target) in &self.edge_index {
            for id in [source, target] {
                if !ids.contains(id) {
                    return Err(CoreError::DanglingEdge(id.to_string()));
                }
            }
        }

        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let graph: Self = serde_json::from_str(json)?;
        graph.validate()?;
        Ok(graph)
    }
}

/// Node and edge counts of a stored graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub course_count: usize,
    pub knowledge_node_count: usize,
    pub contains_count: usize,
    pub related_count: usize,
}
