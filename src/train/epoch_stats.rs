use serde::{Deserialize, Serialize};

/// Per-epoch statistics emitted by `train_loop`.
///
/// When `TrainOptions::progress_tx` is set, the loop sends one value at the
/// end of every completed epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Epoch budget from the configuration.
    pub total_epochs: usize,
    /// Summed cross-entropy divided by the dataset size.
    pub mean_loss: f64,
    /// Samples whose pixel vector did not match the input layer.
    pub skipped_samples: usize,
    /// Samples whose label has no output unit (all-zero target).
    pub untargeted_samples: usize,
    /// Wall-clock duration of this epoch in milliseconds.
    pub elapsed_ms: u64,
}
