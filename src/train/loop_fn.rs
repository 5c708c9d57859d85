use std::time::Instant;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::data::sample::Sample;
use crate::error::{RecognitionError, Result};
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainOptions;
use crate::train::trainer::run_epoch;

/// Summary of a finished training run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainReport {
    /// Epochs that ran to completion.
    pub epochs_run: usize,
    /// Mean loss of every completed epoch, in order.
    pub epoch_losses: Vec<f64>,
    /// The mean loss fell below the acceptable error.
    pub stopped_early: bool,
    /// The stop flag ended the run part-way through an epoch.
    pub cancelled: bool,
}

impl TrainReport {
    pub fn final_loss(&self) -> Option<f64> {
        self.epoch_losses.last().copied()
    }
}

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` in place for up to `config.epochs` epochs of per-sample
/// SGD, reshuffling the visiting order before every epoch.
///
/// # Early termination
/// The loop breaks early if:
/// - an epoch's mean loss drops below `config.acceptable_error`,
/// - the `progress_tx` receiver has been dropped, **or**
/// - `options.stop_flag` is raised (checked between samples).
///
/// # Errors
/// `InvalidInputData` if not a single sample fits the input layer. Individual
/// malformed samples in an otherwise usable dataset are skipped.
pub fn train_loop(network: &mut Network, samples: &[Sample], options: &TrainOptions) -> Result<TrainReport> {
    let mut report = TrainReport::default();
    if samples.is_empty() {
        log::warn!("training called with an empty dataset; nothing to do");
        return Ok(report);
    }

    let input_size = network.input_size();
    if samples.iter().all(|s| s.pixels.len() != input_size) {
        return Err(RecognitionError::InvalidInputData {
            expected: input_size,
            actual: samples[0].pixels.len(),
        });
    }

    let config = network.config().clone();
    let sgd = Sgd::new(config.learning_rate);
    let n = samples.len();
    let mut order: Vec<usize> = (0..n).collect();
    let mut rng = rand::thread_rng();

    log::info!(
        "training {} on {} samples for up to {} epochs (lr {}, target loss {})",
        network.model_name(),
        n,
        config.epochs,
        config.learning_rate,
        config.acceptable_error
    );

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();
        order.shuffle(&mut rng);

        let outcome = run_epoch(network, samples, &order, &sgd, options.stop_flag.as_deref())?;
        if outcome.cancelled {
            log::info!("training stopped during epoch {epoch}");
            report.cancelled = true;
            break;
        }

        let mean_loss = outcome.total_loss / n as f64;
        report.epochs_run = epoch;
        report.epoch_losses.push(mean_loss);
        log::info!("Epoch {epoch}/{}, Loss: {mean_loss:.4}", config.epochs);

        if outcome.skipped > 0 {
            log::warn!(
                "epoch {epoch}: skipped {} samples whose length is not {input_size}",
                outcome.skipped
            );
        }
        if outcome.untargeted > 0 {
            log::warn!(
                "epoch {epoch}: {} samples carry labels beyond the {} output classes",
                outcome.untargeted,
                config.output_classes
            );
        }

        let reached_target = mean_loss < config.acceptable_error;

        if let Some(ref tx) = options.progress_tx {
            let stats = EpochStats {
                epoch,
                total_epochs: config.epochs,
                mean_loss,
                skipped_samples: outcome.skipped,
                untargeted_samples: outcome.untargeted,
                elapsed_ms: t_start.elapsed().as_millis() as u64,
            };
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                log::debug!("progress receiver dropped; stopping after epoch {epoch}");
                report.stopped_early = reached_target;
                break;
            }
        }

        if reached_target {
            log::info!("Target loss reached. Stopping early at epoch {epoch}.");
            report.stopped_early = true;
            break;
        }
    }

    Ok(report)
}
