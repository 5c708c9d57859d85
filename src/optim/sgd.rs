use crate::layers::dense::DenseLayer;

/// Plain per-sample gradient descent: no momentum, no batching.
#[derive(Debug, Clone, Copy)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one update to a layer given its input and error vector.
    pub fn step(&self, layer: &mut DenseLayer, input: &[f64], error: &[f64]) {
        layer.apply_gradients(input, error, self.learning_rate);
    }
}
