use std::path::PathBuf;

/// A configuration field that failed validation.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("invalid configuration for '{field}': {reason}")]
pub struct ConfigError {
    /// Name of the offending field as it appears in the model document.
    pub field: &'static str,
    pub reason: String,
}

impl ConfigError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError { field, reason: reason.into() }
    }
}

/// Why a model document could not be written or read back.
#[derive(thiserror::Error, Debug)]
pub enum PersistenceError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("expected {expected} {what}, found {actual}")]
    LayerCount {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A stored parameter array does not fit the topology its config describes.
    #[error("layer {layer}: {what} has {actual} values, expected {expected}")]
    Shape {
        layer: usize,
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// JSON has no encoding for NaN or infinity; such a value would be
    /// written as `null` and the document could not be read back.
    #[error("{what} holds a non-finite value")]
    NonFinite { what: String },
}

/// Every failure the classifier engine reports to its caller.
#[derive(thiserror::Error, Debug)]
pub enum RecognitionError {
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),

    #[error("invalid input vector size: expected {expected} items, but received {actual}")]
    InvalidInputData { expected: usize, actual: usize },

    #[error("failed to load model from '{}': {source}", .path.display())]
    ModelLoading {
        path: PathBuf,
        #[source]
        source: PersistenceError,
    },

    #[error("failed to save model to '{}': {source}", .path.display())]
    ModelSaving {
        path: PathBuf,
        #[source]
        source: PersistenceError,
    },

    #[error("failed to read dataset from '{}': {source}", .path.display())]
    DatasetLoading {
        path: PathBuf,
        #[source]
        source: PersistenceError,
    },

    #[error("unknown Greek letter label '{0}'")]
    UnknownLabel(String),

    #[error("invalid symbol image: {0}")]
    InvalidImage(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, RecognitionError>;
