//! Two-layer GraphSAGE embedding model

use crate::sage::SageConv;
use crate::{ModelError, Result};
use ndarray::{Array2, ArrayView2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Shape and regularization of a [`GraphSage`] model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Width of each input feature row
    pub in_channels: usize,

    /// Width after the first layer
    pub hidden_channels: usize,

    /// Width of the returned embeddings
    pub out_channels: usize,

    /// Probability of zeroing a hidden activation in training mode
    #[serde(default = "default_dropout")]
    pub dropout: f32,

    /// Seed for weight initialization
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_dropout() -> f32 {
    0.5
}

fn default_seed() -> u64 {
    42
}

impl ModelConfig {
    pub fn new(in_channels: usize, hidden_channels: usize, out_channels: usize) -> Self {
        Self {
            in_channels,
            hidden_channels,
            out_channels,
            dropout: default_dropout(),
            seed: default_seed(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.in_channels == 0 || self.hidden_channels == 0 || self.out_channels == 0 {
            return Err(ModelError::InvalidConfig(format!(
                "channel widths must be positive, got {}/{}/{}",
                self.in_channels, self.hidden_channels, self.out_channels
            )));
        }
        if !(0.0..1.0).contains(&self.dropout) {
            return Err(ModelError::InvalidConfig(format!(
                "dropout must be within [0, 1), got {}",
                self.dropout
            )));
        }
        Ok(())
    }
}

/// Whether dropout is active for a forward pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardMode {
    /// Dropout is the identity
    Inference,
    /// Dropout draws its mask from `seed`
    Training { seed: u64 },
}

/// conv1 → ReLU → dropout → conv2
#[derive(Debug, Clone)]
pub struct GraphSage {
    config: ModelConfig,
    conv1: SageConv,
    conv2: SageConv,
}

impl GraphSage {
    /// Model with seeded random weights
    pub fn new(config: ModelConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let conv1 = SageConv::new(config.in_channels, config.hidden_channels, &mut rng);
        let conv2 = SageConv::new(config.hidden_channels, config.out_channels, &mut rng);
        Ok(Self { config, conv1, conv2 })
    }

    /// Model from explicit layers, checked against `config`
    pub fn from_layers(config: ModelConfig, conv1: SageConv, conv2: SageConv) -> Result<Self> {
        config.validate()?;
        let checks = [
            ("conv1 input width", config.in_channels, conv1.in_channels()),
            ("conv1 output width", config.hidden_channels, conv1.out_channels()),
            ("conv2 input width", config.hidden_channels, conv2.in_channels()),
            ("conv2 output width", config.out_channels, conv2.out_channels()),
        ];
        for (what, expected, actual) in checks {
            if expected != actual {
                return Err(ModelError::DimensionMismatch { what, expected, actual });
            }
        }
        Ok(Self { config, conv1, conv2 })
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Embed every node: `features` is `[num_nodes, in_channels]`,
    /// `edge_index` is `[2, num_edges]` of row positions. Returns
    /// `[num_nodes, out_channels]`.
    pub fn forward(
        &self,
        features: ArrayView2<f32>,
        edge_index: ArrayView2<usize>,
        mode: ForwardMode,
    ) -> Result<Array2<f32>> {
        self.check_inputs(features, edge_index)?;
        debug!(
            "Forward pass over {} nodes and {} edges ({:?})",
            features.nrows(),
            edge_index.ncols(),
            mode
        );

        let mut hidden = self.conv1.forward(features, edge_index);
        hidden.mapv_inplace(|v| v.max(0.0));
        if let ForwardMode::Training { seed } = mode {
            dropout(&mut hidden, self.config.dropout, seed);
        }

        Ok(self.conv2.forward(hidden.view(), edge_index))
    }

    fn check_inputs(&self, features: ArrayView2<f32>, edge_index: ArrayView2<usize>) -> Result<()> {
        if features.ncols() != self.config.in_channels {
            return Err(ModelError::DimensionMismatch {
                what: "feature width",
                expected: self.config.in_channels,
                actual: features.ncols(),
            });
        }
        if edge_index.nrows() != 2 {
            return Err(ModelError::DimensionMismatch {
                what: "edge_index rows",
                expected: 2,
                actual: edge_index.nrows(),
            });
        }

        let num_nodes = features.nrows();
        if let Some(&index) = edge_index.iter().find(|&&i| i >= num_nodes) {
            return Err(ModelError::NodeIndexOutOfRange { index, num_nodes });
        }
        Ok(())
    }
}

/// Inverted dropout: zero with probability `p`, scale survivors by `1/(1-p)`
pub fn dropout(x: &mut Array2<f32>, p: f32, seed: u64) {
    if p <= 0.0 {
        return;
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let retain = f64::from(1.0 - p);
    let scale = 1.0 / (1.0 - p);
    x.mapv_inplace(|v| if rng.gen_bool(retain) { v * scale } else { 0.0 });
}
