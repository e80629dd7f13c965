//! Core domain types for the knowledge-point graph
//!
//! This crate defines the fundamental data structures used throughout
//! the workspace: graph nodes, edges, the exported graph hand-off, and the
//! text capabilities (tokenization, keyword extraction, similarity).

pub mod node;
pub mod edge;
pub mod export;
pub mod text;
pub mod error;

pub use node::{NodeId, NodeLabel, NodeRecord, Properties};
pub use edge::{EdgeRecord, EdgeType, NewEdge};
pub use export::{ExportedGraph, ExportedNode, GraphStats};
pub use text::{JiebaTokenizer, SimpleTokenizer, Similarity, TokenSet, Tokenizer};
pub use error::{CoreError, Result};
