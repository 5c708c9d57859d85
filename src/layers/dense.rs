use rand::Rng;

use crate::activation::activation::Activation;
use crate::math::kernels;
use crate::math::matrix::Matrix;

/// One fully-connected layer: an `input_size × size` weight table, a bias per
/// output unit, and the activation chosen for it by the topology.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseLayer {
    pub weights: Matrix,
    pub biases: Vec<f64>,
    pub activation: Activation,
}

impl DenseLayer {
    /// Xavier-uniform weights, zero biases.
    pub fn new<R: Rng + ?Sized>(
        input_size: usize,
        size: usize,
        activation: Activation,
        rng: &mut R,
    ) -> DenseLayer {
        DenseLayer {
            weights: Matrix::xavier_uniform(input_size, size, rng),
            biases: vec![0.0; size],
            activation,
        }
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    pub fn size(&self) -> usize {
        self.weights.cols
    }

    /// `activation(input · W + b)`; reads the parameters only.
    pub fn feed_from(&self, input: &[f64]) -> Vec<f64> {
        let mut z = kernels::weighted_sum(input, &self.weights, &self.biases);
        self.activation.apply(&mut z);
        z
    }

    /// Error for the layer feeding this one, computed from this layer's error
    /// vector and the lower layer's cached output. Must run before
    /// `apply_gradients` touches the weights.
    pub fn backpropagate(&self, error: &[f64], lower_output: &[f64], lower_activation: Activation) -> Vec<f64> {
        kernels::propagate_error(&self.weights, error, lower_output, |a| {
            lower_activation.derivative_from_output(a)
        })
    }

    /// `W -= lr · inputᵀ·error`, `b -= lr · error`.
    pub fn apply_gradients(&mut self, input: &[f64], error: &[f64], lr: f64) {
        kernels::descend_weights(&mut self.weights, input, error, lr);
        for (b, e) in self.biases.iter_mut().zip(error) {
            *b -= lr * e;
        }
    }
}
