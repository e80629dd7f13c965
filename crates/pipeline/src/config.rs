//! Build configuration

use crate::{PipelineError, Result};
use serde::{Deserialize, Serialize};

/// Tunables for a graph build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// A RELATED_TO edge needs a similarity strictly above this
    pub similarity_threshold: f64,

    /// Keywords joined into a knowledge point's name
    pub keyword_count: usize,

    /// RELATED_TO edges handed to the store per batch
    pub edge_batch_size: usize,

    /// Shortest cleaned text kept, in characters
    pub min_text_chars: usize,

    /// Longest cleaned text kept, in characters
    pub max_text_chars: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.5,
            keyword_count: 3,
            edge_batch_size: 64,
            min_text_chars: 100,
            max_text_chars: 1000,
        }
    }
}

impl BuildConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(PipelineError::InvalidConfig(format!(
                "similarity_threshold must be within [0, 1], got {}",
                self.similarity_threshold
            )));
        }
        if self.edge_batch_size == 0 {
            return Err(PipelineError::InvalidConfig("edge_batch_size must be positive".into()));
        }
        if self.min_text_chars > self.max_text_chars {
            return Err(PipelineError::InvalidConfig(format!(
                "min_text_chars {} exceeds max_text_chars {}",
                self.min_text_chars, self.max_text_chars
            )));
        }
        Ok(())
    }
}
