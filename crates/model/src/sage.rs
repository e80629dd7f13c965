//! GraphSAGE convolution with mean aggregation

use crate::{ModelError, Result};
use ndarray::{Array1, Array2, ArrayView2};
use rand::rngs::StdRng;
use rand::Rng;

/// One neighborhood-aggregation layer
///
/// For every node `i` with predecessors `N(i)` (edges `j -> i`):
/// `out_i = mean(x_j for j in N(i)) · W_neigh + x_i · W_root + b`.
/// Nodes without predecessors aggregate to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct SageConv {
    lin_neighbors: Array2<f32>,
    lin_root: Array2<f32>,
    bias: Array1<f32>,
}

impl SageConv {
    /// Weights drawn uniformly from `±1/sqrt(in_channels)`, bias zero
    pub fn new(in_channels: usize, out_channels: usize, rng: &mut StdRng) -> Self {
        let bound = 1.0 / (in_channels.max(1) as f32).sqrt();
        let mut init = |_: (usize, usize)| rng.gen_range(-bound..bound);
        let lin_neighbors = Array2::from_shape_fn((in_channels, out_channels), &mut init);
        let lin_root = Array2::from_shape_fn((in_channels, out_channels), &mut init);

        Self {
            lin_neighbors,
            lin_root,
            bias: Array1::zeros(out_channels),
        }
    }

    /// Layer from explicit `[in, out]` weight matrices and an `[out]` bias
    pub fn from_weights(
        lin_neighbors: Array2<f32>,
        lin_root: Array2<f32>,
        bias: Array1<f32>,
    ) -> Result<Self> {
        if lin_neighbors.nrows() != lin_root.nrows() {
            return Err(ModelError::DimensionMismatch {
                what: "root weight rows",
                expected: lin_neighbors.nrows(),
                actual: lin_root.nrows(),
            });
        }
        if lin_neighbors.ncols() != lin_root.ncols() {
            return Err(ModelError::DimensionMismatch {
                what: "root weight columns",
                expected: lin_neighbors.ncols(),
                actual: lin_root.ncols(),
            });
        }
        if bias.len() != lin_root.ncols() {
            return Err(ModelError::DimensionMismatch {
                what: "bias length",
                expected: lin_root.ncols(),
                actual: bias.len(),
            });
        }

        Ok(Self {
            lin_neighbors,
            lin_root,
            bias,
        })
    }

    pub fn in_channels(&self) -> usize {
        self.lin_root.nrows()
    }

    pub fn out_channels(&self) -> usize {
        self.lin_root.ncols()
    }

    /// Apply the layer; inputs are assumed already shape-checked.
    pub fn forward(&self, x: ArrayView2<f32>, edge_index: ArrayView2<usize>) -> Array2<f32> {
        let aggregated = mean_aggregate(x, edge_index);
        let mut out = aggregated.dot(&self.lin_neighbors) + x.dot(&self.lin_root);
        out += &self.bias;
        out
    }
}

/// Mean of each node's predecessor rows, zero for nodes without any
pub fn mean_aggregate(x: ArrayView2<f32>, edge_index: ArrayView2<usize>) -> Array2<f32> {
    let mut sums = Array2::<f32>::zeros(x.raw_dim());
    let mut counts = vec![0usize; x.nrows()];

    for edge in edge_index.columns() {
        let (source, target) = (edge[0], edge[1]);
        let mut row = sums.row_mut(target);
        row += &x.row(source);
        counts[target] += 1;
    }

    for (mut row, &count) in sums.rows_mut().into_iter().zip(&counts) {
        if count > 0 {
            let count = count as f32;
            row.mapv_inplace(|v| v / count);
        }
    }
    sums
}
