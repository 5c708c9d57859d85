use rand::Rng;

use crate::error::PersistenceError;
use crate::layers::dense::DenseLayer;
use crate::math::matrix::Matrix;
use crate::network::topology::Topology;

/// Weights and biases of every layer, in forward order.
///
/// Lengths always match the topology the store was built for; `replace`
/// re-checks them before swapping anything in.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterStore {
    pub layers: Vec<DenseLayer>,
}

impl ParameterStore {
    /// Xavier-uniform weights and zero biases for each layer of `topology`.
    pub fn initialize<R: Rng + ?Sized>(topology: &Topology, rng: &mut R) -> ParameterStore {
        let layers = topology
            .layers()
            .map(|shape| DenseLayer::new(shape.input_size, shape.size, shape.activation, rng))
            .collect();
        ParameterStore { layers }
    }

    /// Swaps in flattened weight tables and bias vectors loaded from disk.
    /// Nothing is replaced unless every array fits `topology`.
    pub fn replace(
        &mut self,
        topology: &Topology,
        weights: Vec<Vec<f64>>,
        biases: Vec<Vec<f64>>,
    ) -> Result<(), PersistenceError> {
        let expected = topology.layer_count();
        for (what, actual) in [("weight tables", weights.len()), ("bias vectors", biases.len())] {
            if actual != expected {
                return Err(PersistenceError::LayerCount { what, expected, actual });
            }
        }
        for (i, (shape, (w, b))) in topology.layers().zip(weights.iter().zip(&biases)).enumerate() {
            if w.len() != shape.input_size * shape.size {
                return Err(PersistenceError::Shape {
                    layer: i,
                    what: "weight table",
                    expected: shape.input_size * shape.size,
                    actual: w.len(),
                });
            }
            if b.len() != shape.size {
                return Err(PersistenceError::Shape {
                    layer: i,
                    what: "bias vector",
                    expected: shape.size,
                    actual: b.len(),
                });
            }
        }

        for ((layer, shape), (w, b)) in self
            .layers
            .iter_mut()
            .zip(topology.layers())
            .zip(weights.into_iter().zip(biases))
        {
            layer.weights = Matrix { rows: shape.input_size, cols: shape.size, data: w };
            layer.biases = b;
            layer.activation = shape.activation;
        }
        Ok(())
    }

    /// Flattened copies of all weight tables, in layer order.
    pub fn weight_tables(&self) -> Vec<Vec<f64>> {
        self.layers.iter().map(|l| l.weights.data.clone()).collect()
    }

    pub fn bias_vectors(&self) -> Vec<Vec<f64>> {
        self.layers.iter().map(|l| l.biases.clone()).collect()
    }
}
