pub mod config;
pub mod network;
pub mod parameters;
pub mod persistence;
pub mod shared;
pub mod topology;

pub use config::NetworkConfig;
pub use network::{Network, Prediction, INIT_SEED};
pub use parameters::ParameterStore;
pub use persistence::NetworkState;
pub use shared::{GreekClassifier, SharedNetwork};
pub use topology::{LayerShape, Topology};
