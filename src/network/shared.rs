use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::data::sample::Sample;
use crate::error::Result;
use crate::network::network::{Network, Prediction};
use crate::train::loop_fn::TrainReport;
use crate::train::train_config::TrainOptions;

/// The operations a Greek letter classifier offers its front-ends.
pub trait GreekClassifier {
    fn predict(&self, pixels: &[f64]) -> Result<Prediction>;

    fn train(&mut self, samples: &[Sample]) -> Result<TrainReport>;

    /// Accuracy in [0, 1]; 0.0 for an empty set.
    fn test(&self, samples: &[Sample]) -> Result<f64>;
}

impl GreekClassifier for Network {
    fn predict(&self, pixels: &[f64]) -> Result<Prediction> {
        Network::predict(self, pixels)
    }

    fn train(&mut self, samples: &[Sample]) -> Result<TrainReport> {
        Network::train(self, samples)
    }

    fn test(&self, samples: &[Sample]) -> Result<f64> {
        Network::test(self, samples)
    }
}

/// A network behind one exclusive lock, so training, inference and
/// persistence from several threads never interleave.
#[derive(Debug, Clone)]
pub struct SharedNetwork {
    inner: Arc<Mutex<Network>>,
}

impl SharedNetwork {
    pub fn new(network: Network) -> SharedNetwork {
        SharedNetwork {
            inner: Arc::new(Mutex::new(network)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Network> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn predict(&self, pixels: &[f64]) -> Result<Prediction> {
        self.lock().predict(pixels)
    }

    pub fn train(&self, samples: &[Sample], options: &TrainOptions) -> Result<TrainReport> {
        self.lock().train_with(samples, options)
    }

    pub fn test(&self, samples: &[Sample]) -> Result<f64> {
        self.lock().test(samples)
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.lock().save_json(path)
    }

    /// Replaces the shared network with one read from `path`. On failure the
    /// current network stays in place.
    pub fn load_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let loaded = Network::load_json(path)?;
        *self.lock() = loaded;
        Ok(())
    }

    /// Runs `f` with exclusive access to the network.
    pub fn with<T>(&self, f: impl FnOnce(&mut Network) -> T) -> T {
        f(&mut self.lock())
    }
}
