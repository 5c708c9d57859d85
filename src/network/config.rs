use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::greek_letter::GreekLetter;
use crate::data::symbol_image::INPUT_VECTOR_SIZE;
use crate::error::{ConfigError, PersistenceError};

fn default_learning_rate() -> f64 {
    0.01
}

/// Shape and training hyperparameters of a network.
///
/// Field names serialize in PascalCase, the layout model files have always
/// used. `validate` must pass before any parameters are allocated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NetworkConfig {
    /// Length of the pixel vector (784 for 28×28 images).
    pub input_size: usize,
    /// Width of each hidden layer, input side first. May be empty.
    #[serde(default)]
    pub hidden_layer_neurons: Vec<usize>,
    /// Number of images the dataset is expected to hold. Informational.
    #[serde(default)]
    pub training_sample_size: usize,
    pub epochs: usize,
    pub output_classes: usize,
    /// Training stops once an epoch's mean loss falls below this.
    #[serde(default)]
    pub acceptable_error: f64,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            input_size: INPUT_VECTOR_SIZE,
            hidden_layer_neurons: Vec::new(),
            training_sample_size: 10,
            epochs: 5,
            output_classes: GreekLetter::COUNT,
            acceptable_error: 0.3,
            learning_rate: default_learning_rate(),
        }
    }
}

impl NetworkConfig {
    /// Checks every field, failing on the first bad one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_size == 0 {
            return Err(ConfigError::new("InputSize", "must be greater than 0"));
        }
        if self.output_classes == 0 {
            return Err(ConfigError::new("OutputClasses", "must be greater than 0"));
        }
        if self.output_classes > GreekLetter::COUNT {
            return Err(ConfigError::new(
                "OutputClasses",
                format!(
                    "must not exceed {} (one class per Greek letter), got {}",
                    GreekLetter::COUNT,
                    self.output_classes
                ),
            ));
        }
        if let Some(pos) = self.hidden_layer_neurons.iter().position(|&n| n == 0) {
            return Err(ConfigError::new(
                "HiddenLayerNeurons",
                format!("hidden layer {pos} must have at least one neuron"),
            ));
        }
        // NaN fails both comparisons.
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(ConfigError::new(
                "LearningRate",
                format!("must be in (0, 1], got {}", self.learning_rate),
            ));
        }
        if self.epochs == 0 {
            return Err(ConfigError::new("Epochs", "must be greater than 0"));
        }
        if !(self.acceptable_error >= 0.0 && self.acceptable_error.is_finite()) {
            return Err(ConfigError::new(
                "AcceptableError",
                format!("must be finite and non-negative, got {}", self.acceptable_error),
            ));
        }
        Ok(())
    }

    /// Writes the configuration alone as pretty-printed JSON.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), PersistenceError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Reads and validates a configuration written by `save_json`.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<NetworkConfig, PersistenceError> {
        let file = File::open(path)?;
        let config: NetworkConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }
}
