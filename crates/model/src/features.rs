//! Caller-side feature construction from node text

use crate::{ModelError, Result};
use kgraph_core::{ExportedNode, Tokenizer};
use ndarray::{Array1, Array2};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Hashes each token into one of `width` buckets and L2-normalizes the
/// counts. Rows follow the order of the nodes given.
pub struct HashedBagOfWords<'a> {
    tokenizer: &'a dyn Tokenizer,
    width: usize,
}

impl<'a> HashedBagOfWords<'a> {
    pub fn new(tokenizer: &'a dyn Tokenizer, width: usize) -> Result<Self> {
        if width == 0 {
            return Err(ModelError::InvalidConfig("feature width must be positive".into()));
        }
        Ok(Self { tokenizer, width })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn encode_text(&self, text: &str) -> Array1<f32> {
        let mut row = Array1::<f32>::zeros(self.width);
        for token in self.tokenizer.tokenize(text) {
            row[self.bucket(&token)] += 1.0;
        }

        let norm = row.dot(&row).sqrt();
        if norm > 0.0 {
            row.mapv_inplace(|v| v / norm);
        }
        row
    }

    pub fn encode_nodes(&self, nodes: &[ExportedNode]) -> Array2<f32> {
        let mut features = Array2::<f32>::zeros((nodes.len(), self.width));
        for (mut row, node) in features.rows_mut().into_iter().zip(nodes) {
            row.assign(&self.encode_text(&node.text));
        }
        features
    }

    fn bucket(&self, token: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        (hasher.finish() % self.width as u64) as usize
    }
}
