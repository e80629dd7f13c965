//! Node types - the course root and its knowledge points

use serde::{Deserialize, Serialize};

/// Property key holding a node's display name
pub const NAME: &str = "name";

/// Property key holding a knowledge point's full source text
pub const DESCRIPTION: &str = "description";

/// Free-form attributes attached to nodes and edges
pub type Properties = serde_json::Map<String, serde_json::Value>;

/// Store-assigned node identity, stable for the store's lifetime
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// The label (kind) of a graph node
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum NodeLabel {
    /// The single course root of a build
    Course,
    /// One knowledge point extracted from course material
    KnowledgeNode,
}

impl NodeLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeLabel::Course => "Course",
            NodeLabel::KnowledgeNode => "KnowledgeNode",
        }
    }
}

impl std::fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node as returned by the graph store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Identifier assigned by the store
    pub id: NodeId,

    /// Kind of node
    pub label: NodeLabel,

    /// Attributes (`name`, `description`, ...)
    #[serde(default)]
    pub properties: Properties,
}

impl NodeRecord {
    pub fn new(id: NodeId, label: NodeLabel, properties: Properties) -> Self {
        Self { id, label, properties }
    }

    /// Display name, if set
    pub fn name(&self) -> Option<&str> {
        self.properties.get(NAME).and_then(|v| v.as_str())
    }

    /// Full source text of a knowledge point, if set
    pub fn description(&self) -> Option<&str> {
        self.properties.get(DESCRIPTION).and_then(|v| v.as_str())
    }
}

/// Properties for a course root node
pub fn course_properties(name: impl Into<String>) -> Properties {
    let mut props = Properties::new();
    props.insert(NAME.into(), serde_json::Value::String(name.into()));
    props
}

/// Properties for a knowledge point node
pub fn knowledge_properties(name: impl Into<String>, description: impl Into<String>) -> Properties {
    let mut props = course_properties(name);
    props.insert(DESCRIPTION.into(), serde_json::Value::String(description.into()));
    props
}
