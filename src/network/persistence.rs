use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{PersistenceError, RecognitionError, Result};
use crate::network::config::NetworkConfig;
use crate::network::network::{Network, INIT_SEED};

/// On-disk model document: the configuration plus every layer's flattened
/// weight table and bias vector, in topology order.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NetworkState {
    pub config: NetworkConfig,
    pub weights: Vec<Vec<f64>>,
    pub biases: Vec<Vec<f64>>,
}

impl NetworkState {
    pub fn capture(network: &Network) -> NetworkState {
        NetworkState {
            config: network.config().clone(),
            weights: network.parameters().weight_tables(),
            biases: network.parameters().bias_vectors(),
        }
    }

    /// Validates the stored config, builds a freshly seeded network from it,
    /// then replaces its parameters wholesale with the stored ones.
    pub fn restore(self) -> std::result::Result<Network, PersistenceError> {
        let mut network = Network::build(self.config, &mut StdRng::seed_from_u64(INIT_SEED))?;
        let topology = network.topology().clone();
        network
            .parameters_mut()
            .replace(&topology, self.weights, self.biases)?;
        Ok(network)
    }

    /// Fails on the first NaN or infinity in the config or parameter arrays.
    fn ensure_finite(&self) -> std::result::Result<(), PersistenceError> {
        let scalars = [
            ("AcceptableError", self.config.acceptable_error),
            ("LearningRate", self.config.learning_rate),
        ];
        if let Some((field, _)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return Err(PersistenceError::NonFinite { what: format!("config field {field}") });
        }
        for (what, arrays) in [("weight table", &self.weights), ("bias vector", &self.biases)] {
            if let Some(layer) = arrays.iter().position(|a| a.iter().any(|v| !v.is_finite())) {
                return Err(PersistenceError::NonFinite { what: format!("layer {layer} {what}") });
            }
        }
        Ok(())
    }
}

impl Network {
    /// Writes the network as a pretty-printed JSON document.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        write_state(&NetworkState::capture(self), path).map_err(|source| {
            RecognitionError::ModelSaving {
                path: path.to_path_buf(),
                source,
            }
        })?;
        log::info!("saved {} to {}", self.model_name(), path.display());
        Ok(())
    }

    /// Reads a network written by `save_json`. A missing file, a malformed
    /// document or arrays that do not fit the stored topology all fail; no
    /// default parameters are ever substituted.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Network> {
        let path = path.as_ref();
        let network = read_state(path)
            .and_then(NetworkState::restore)
            .map_err(|source| RecognitionError::ModelLoading {
                path: path.to_path_buf(),
                source,
            })?;
        log::info!("loaded {} from {}", network.model_name(), path.display());
        Ok(network)
    }
}

fn write_state(state: &NetworkState, path: &Path) -> std::result::Result<(), PersistenceError> {
    state.ensure_finite()?;
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, state)?;
    writer.flush()?;
    Ok(())
}

fn read_state(path: &Path) -> std::result::Result<NetworkState, PersistenceError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
