//! Edge types - relationships between graph nodes

use crate::node::{NodeId, Properties};
use serde::{Deserialize, Serialize};

/// Property key holding a RELATED_TO edge's similarity score
pub const WEIGHT: &str = "weight";

/// Types of relationships in the knowledge graph
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeType {
    /// Course root contains a knowledge point
    Contains,
    /// Two knowledge points are textually similar
    RelatedTo,
}

impl EdgeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeType::Contains => "CONTAINS",
            EdgeType::RelatedTo => "RELATED_TO",
        }
    }
}

impl std::fmt::Display for EdgeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An edge to be written to the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEdge {
    /// Source node ID (the "from" node)
    pub source: NodeId,

    /// Target node ID (the "to" node)
    pub target: NodeId,

    /// Type of relationship
    pub edge_type: EdgeType,

    /// Additional attributes
    #[serde(default)]
    pub properties: Properties,
}

impl NewEdge {
    /// Create a new edge without attributes
    pub fn new(source: NodeId, target: NodeId, edge_type: EdgeType) -> Self {
        Self {
            source,
            target,
            edge_type,
            properties: Properties::new(),
        }
    }

    /// Builder: set the weight, clamped to [0, 1]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.properties
            .insert(WEIGHT.into(), serde_json::Value::from(weight.clamp(0.0, 1.0)));
        self
    }
}

/// An edge as returned by the graph store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: NodeId,
    pub target: NodeId,
    pub edge_type: EdgeType,
    #[serde(default)]
    pub properties: Properties,
}

impl EdgeRecord {
    /// Similarity weight, if the edge carries one
    pub fn weight(&self) -> Option<f64> {
        self.properties.get(WEIGHT).and_then(|v| v.as_f64())
    }
}

impl From<NewEdge> for EdgeRecord {
    fn from(edge: NewEdge) -> Self {
        Self {
            source: edge.source,
            target: edge.target,
            edge_type: edge.edge_type,
            properties: edge.properties,
        }
    }
}
