//! Tensorization of an exported graph

use crate::{ModelError, Result};
use kgraph_core::{ExportedGraph, NodeId};
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// An `[2, 0]` edge index: no edges at all
pub fn empty_edge_index() -> Array2<usize> {
    Array2::zeros((2, 0))
}

/// Dense arrays for an [`ExportedGraph`]
///
/// Row `i` of any feature matrix is the node `node_ids[i]`; `edge_index`
/// column `k` is the edge `(source_row, target_row)` with weight
/// `edge_weight[k]`.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphTensors {
    pub node_ids: Vec<NodeId>,
    pub edge_index: Array2<usize>,
    pub edge_weight: Array1<f32>,
}

impl GraphTensors {
    pub fn from_export(graph: &ExportedGraph) -> Result<Self> {
        if graph.edge_index.len() != graph.edge_weight.len() {
            return Err(ModelError::DimensionMismatch {
                what: "edge_weight",
                expected: graph.edge_index.len(),
                actual: graph.edge_weight.len(),
            });
        }

        let positions: HashMap<&NodeId, usize> = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (&node.id, i))
            .collect();
        let position = |id: &NodeId| {
            positions
                .get(id)
                .copied()
                .ok_or_else(|| ModelError::UnknownNode(id.to_string()))
        };

        let mut edge_index = Array2::<usize>::zeros((2, graph.edge_index.len()));
        for (k, (source, target)) in graph.edge_index.iter().enumerate() {
            edge_index[[0, k]] = position(source)?;
            edge_index[[1, k]] = position(target)?;
        }

        Ok(Self {
            node_ids: graph.nodes.iter().map(|n| n.id.clone()).collect(),
            edge_index,
            edge_weight: Array1::from(graph.edge_weight.clone()),
        })
    }

    pub fn num_nodes(&self) -> usize {
        self.node_ids.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edge_index.ncols()
    }
}
