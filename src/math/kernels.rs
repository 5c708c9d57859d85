//! Dense linear-algebra kernels for one sample's forward and backward pass.
//!
//! Every kernel splits its output into disjoint slots (one output unit or one
//! weight row per task) and only reads shared inputs, so the rayon tasks need
//! no synchronization.

use rayon::prelude::*;

use crate::math::matrix::Matrix;

/// Smallest number of slots handed to one rayon task. Keeps tiny layers from
/// drowning in scheduling overhead.
const MIN_SLOTS_PER_TASK: usize = 16;

/// `out[j] = bias[j] + Σ_row input[row] * weights[row][j]`, parallel over `j`.
pub fn weighted_sum(input: &[f64], weights: &Matrix, bias: &[f64]) -> Vec<f64> {
    debug_assert_eq!(input.len(), weights.rows);
    debug_assert_eq!(bias.len(), weights.cols);

    let cols = weights.cols;
    let mut out = vec![0.0; cols];
    out.par_iter_mut()
        .with_min_len(MIN_SLOTS_PER_TASK)
        .enumerate()
        .for_each(|(j, slot)| {
            let mut sum = 0.0;
            for (row, x) in input.iter().enumerate() {
                sum += x * weights.data[row * cols + j];
            }
            *slot = sum + bias[j];
        });
    out
}

/// Error for the layer below:
/// `prev[row] = (Σ_col weights[row][col] * error[col]) * derivative(activation[row])`.
///
/// `activation` is the cached output of the lower layer and `derivative` is
/// expressed in terms of that output (`1 - a²` for tanh). Parallel over `row`.
pub fn propagate_error<D>(weights: &Matrix, error: &[f64], activation: &[f64], derivative: D) -> Vec<f64>
where
    D: Fn(f64) -> f64 + Sync,
{
    debug_assert_eq!(error.len(), weights.cols);
    debug_assert_eq!(activation.len(), weights.rows);

    let mut prev = vec![0.0; weights.rows];
    prev.par_iter_mut()
        .with_min_len(MIN_SLOTS_PER_TASK)
        .enumerate()
        .for_each(|(row, slot)| {
            let sum: f64 = weights
                .row(row)
                .iter()
                .zip(error)
                .map(|(w, e)| w * e)
                .sum();
            *slot = sum * derivative(activation[row]);
        });
    prev
}

/// In-place SGD step on a weight table:
/// `weights[row][col] -= lr * input[row] * error[col]`.
///
/// The gradient is the outer product of the layer input and its error vector;
/// it is never materialized. Parallel over weight rows.
pub fn descend_weights(weights: &mut Matrix, input: &[f64], error: &[f64], learning_rate: f64) {
    debug_assert_eq!(input.len(), weights.rows);
    debug_assert_eq!(error.len(), weights.cols);

    let cols = weights.cols;
    weights
        .data
        .par_chunks_mut(cols.max(1))
        .with_min_len(MIN_SLOTS_PER_TASK)
        .zip(input.par_iter())
        .for_each(|(row, &x)| {
            if x == 0.0 {
                return;
            }
            for (w, e) in row.iter_mut().zip(error) {
                *w -= learning_rate * x * e;
            }
        });
}
