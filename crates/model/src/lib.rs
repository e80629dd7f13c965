//! Node-embedding model over the exported knowledge graph
//!
//! A two-layer GraphSAGE network: mean neighborhood aggregation, ReLU,
//! dropout in training mode, and a second aggregation to the output width.

pub mod error;
pub mod features;
pub mod model;
pub mod sage;
pub mod tensor;

pub use error::{ModelError, Result};
pub use features::HashedBagOfWords;
pub use model::{ForwardMode, GraphSage, ModelConfig};
pub use sage::SageConv;
pub use tensor::{empty_edge_index, GraphTensors};
