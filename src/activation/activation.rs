use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Activation attached to a layer when the topology is built.
///
/// Hidden layers squash with `Tanh`; the output layer normalizes with
/// `Softmax`. The choice is fixed per layer, never re-dispatched per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    Tanh,
    /// Vector-valued; applied to the whole logit vector at once.
    Softmax,
}

impl Activation {
    /// Activates a vector of weighted sums in place.
    pub fn apply(&self, values: &mut [f64]) {
        match self {
            Activation::Tanh => values.par_iter_mut().with_min_len(64).for_each(|x| *x = x.tanh()),
            Activation::Softmax => softmax_in_place(values),
        }
    }

    /// Derivative expressed in terms of the unit's *output* `a = f(x)`.
    ///
    /// For `Softmax` the trainer pairs it with cross-entropy and feeds the
    /// combined gradient `predicted - target` straight in, so the factor is 1.
    pub fn derivative_from_output(&self, a: f64) -> f64 {
        match self {
            Activation::Tanh => 1.0 - a * a,
            Activation::Softmax => 1.0,
        }
    }
}

/// Numerically stable softmax: shift by the max logit, exponentiate,
/// normalize. Sequential on purpose; the output layer is tiny and the sum
/// would need a reduction anyway.
pub fn softmax_in_place(values: &mut [f64]) {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut sum = 0.0;
    for v in values.iter_mut() {
        *v = (*v - max).exp();
        sum += *v;
    }
    for v in values.iter_mut() {
        *v /= sum;
    }
}

pub fn softmax(logits: &[f64]) -> Vec<f64> {
    let mut out = logits.to_vec();
    softmax_in_place(&mut out);
    out
}
