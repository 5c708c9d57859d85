pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod data;
pub mod error;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::Activation;
pub use layers::dense::DenseLayer;
pub use network::{GreekClassifier, Network, NetworkConfig, Prediction, SharedNetwork, Topology};
pub use loss::cross_entropy::CrossEntropyLoss;
pub use optim::sgd::Sgd;
pub use train::{EpochStats, TrainOptions, TrainReport};
pub use data::{load_samples_json, GreekLetter, GreekSymbolImage, Sample};
pub use error::{ConfigError, PersistenceError, RecognitionError, Result};
