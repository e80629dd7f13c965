//! Build, export and inspect the knowledge-point graph
//!
//! - Cleaner: normalizes and deduplicates raw texts before a build
//! - Builder: wipes the store and writes the course, its knowledge points
//!   and their similarity edges
//! - Candidates: pairwise scoring decoupled from edge writes
//! - Exporter: flattens the graph into node/edge arrays

pub mod builder;
pub mod candidates;
pub mod cleaner;
pub mod config;
pub mod exporter;
pub mod error;

pub use builder::{BuildReport, GraphBuilder};
pub use candidates::{CandidateGenerator, EdgeCandidate, EdgeMaterializer};
pub use cleaner::TextCleaner;
pub use config::BuildConfig;
pub use exporter::GraphExporter;
pub use error::{PipelineError, Result};
