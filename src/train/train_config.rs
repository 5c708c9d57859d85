use std::sync::mpsc;
use std::sync::{atomic::AtomicBool, Arc};

use crate::train::epoch_stats::EpochStats;

/// Optional hooks for a training run. Epochs, learning rate and the
/// early-stop threshold come from the network's own configuration.
///
/// # Fields
/// - `progress_tx` — one `EpochStats` is sent per completed epoch. If the
///                   receiver is dropped the run ends after that epoch.
/// - `stop_flag`   — set to `true` from another thread to stop the run; it is
///                   checked between samples, so the current sample's update
///                   always completes.
#[derive(Debug, Default, Clone)]
pub struct TrainOptions {
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainOptions {
    pub fn with_progress(mut self, tx: mpsc::Sender<EpochStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(flag);
        self
    }
}
