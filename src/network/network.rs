use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::data::greek_letter::GreekLetter;
use crate::data::sample::Sample;
use crate::data::symbol_image::GreekSymbolImage;
use crate::error::{ConfigError, RecognitionError, Result};
use crate::network::config::NetworkConfig;
use crate::network::parameters::ParameterStore;
use crate::network::topology::Topology;
use crate::train::loop_fn::{train_loop, TrainReport};
use crate::train::train_config::TrainOptions;

/// Seed for weight initialization, so the same config always builds the
/// same untrained network.
pub const INIT_SEED: u64 = 123;

/// Outcome of classifying one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub letter: GreekLetter,
    /// Softmax probability of `letter`, in [0, 1].
    pub confidence: f64,
    /// Which engine produced the prediction.
    pub model_name: String,
}

/// A fully-connected classifier: tanh hidden layers, softmax output.
///
/// Owns its configuration, topology and parameters exclusively. Callers that
/// share one network between threads wrap it in a lock (see `SharedNetwork`).
#[derive(Debug, Clone)]
pub struct Network {
    config: NetworkConfig,
    topology: Topology,
    params: ParameterStore,
}

impl Network {
    /// Builds a network with Xavier-initialized weights drawn from a generator
    /// seeded with `INIT_SEED`.
    pub fn new(config: NetworkConfig) -> Result<Network> {
        Network::with_rng(config, &mut StdRng::seed_from_u64(INIT_SEED))
    }

    /// Builds a network drawing its initial weights from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(config: NetworkConfig, rng: &mut R) -> Result<Network> {
        Ok(Network::build(config, rng)?)
    }

    pub(crate) fn build<R: Rng + ?Sized>(
        config: NetworkConfig,
        rng: &mut R,
    ) -> std::result::Result<Network, ConfigError> {
        let topology = Topology::from_config(&config)?;
        let params = ParameterStore::initialize(&topology, rng);
        log::debug!(
            "built network {:?} ({} weight layers)",
            topology.widths(),
            topology.layer_count()
        );
        Ok(Network { config, topology, params })
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn parameters(&self) -> &ParameterStore {
        &self.params
    }

    pub(crate) fn parameters_mut(&mut self) -> &mut ParameterStore {
        &mut self.params
    }

    pub fn input_size(&self) -> usize {
        self.topology.input_size()
    }

    pub fn model_name(&self) -> String {
        format!("Custom DNN ({} layers)", self.topology.layer_count())
    }

    pub(crate) fn check_input(&self, input: &[f64]) -> Result<()> {
        if input.len() != self.input_size() {
            return Err(RecognitionError::InvalidInputData {
                expected: self.input_size(),
                actual: input.len(),
            });
        }
        Ok(())
    }

    /// Class probabilities for one input vector.
    pub fn forward(&self, input: &[f64]) -> Result<Vec<f64>> {
        self.check_input(input)?;
        let mut current = input.to_vec();
        for layer in &self.params.layers {
            current = layer.feed_from(&current);
        }
        Ok(current)
    }

    /// Every layer's activation, starting with the input itself and ending
    /// with the output distribution. Backpropagation needs the whole cache.
    pub fn forward_cached(&self, input: &[f64]) -> Result<Vec<Vec<f64>>> {
        self.check_input(input)?;
        let mut activations = Vec::with_capacity(self.params.layers.len() + 1);
        activations.push(input.to_vec());
        for layer in &self.params.layers {
            let next = layer.feed_from(&activations[activations.len() - 1]);
            activations.push(next);
        }
        Ok(activations)
    }

    /// Most probable letter for `input`; ties go to the lowest class index.
    pub fn predict(&self, input: &[f64]) -> Result<Prediction> {
        let probabilities = self.forward(input)?;
        let (index, confidence) = argmax(&probabilities);
        let letter = GreekLetter::from_ordinal(index + 1)
            .ok_or_else(|| RecognitionError::UnknownLabel(format!("class #{}", index + 1)))?;
        Ok(Prediction {
            letter,
            confidence,
            model_name: self.model_name(),
        })
    }

    pub fn predict_image(&self, image: &GreekSymbolImage) -> Result<Prediction> {
        self.predict(image.pixels())
    }

    /// Fraction of `samples` whose predicted letter equals the label.
    /// An empty set scores 0.0.
    pub fn test(&self, samples: &[Sample]) -> Result<f64> {
        if samples.is_empty() {
            return Ok(0.0);
        }
        let mut correct = 0usize;
        for sample in samples {
            if self.predict(&sample.pixels)?.letter == sample.label {
                correct += 1;
            }
        }
        Ok(correct as f64 / samples.len() as f64)
    }

    /// Trains in place with the configured epochs, learning rate and
    /// early-stop threshold.
    pub fn train(&mut self, samples: &[Sample]) -> Result<TrainReport> {
        train_loop(self, samples, &TrainOptions::default())
    }

    /// Like `train`, with a progress channel and/or stop flag.
    pub fn train_with(&mut self, samples: &[Sample], options: &TrainOptions) -> Result<TrainReport> {
        train_loop(self, samples, options)
    }
}

/// Index and value of the largest entry; the first one wins a tie.
fn argmax(values: &[f64]) -> (usize, f64) {
    let mut best = (0, values.first().copied().unwrap_or(0.0));
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > best.1 {
            best = (i, v);
        }
    }
    best
}
