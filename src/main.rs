//! Command-line front-end for the Greek letter classifier.
//!
//! ```text
//! greek-nn init-config --out config.json --hidden 128,64
//! greek-nn train --config config.json --data train.json --out model.json --test test.json
//! greek-nn test --model model.json --data test.json
//! greek-nn predict --model model.json --image letter.png
//! ```
//!
//! Datasets are JSON arrays of `{"pixels": [...784 values...], "label": "Alpha"}`.
//! Set `RUST_LOG=debug` for more detail.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use greek_nn::{load_samples_json, GreekSymbolImage, Network, NetworkConfig};

#[derive(Parser, Debug)]
#[command(name = "greek-nn", version, about = "Feed-forward Greek letter classifier")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a configuration file with the default 28x28 / 24-class shape.
    InitConfig {
        #[arg(long)]
        out: PathBuf,
        /// Hidden layer widths, input side first.
        #[arg(long, value_delimiter = ',')]
        hidden: Vec<usize>,
        #[arg(long)]
        epochs: Option<usize>,
        #[arg(long)]
        learning_rate: Option<f64>,
        #[arg(long)]
        acceptable_error: Option<f64>,
    },
    /// Train a fresh network and save it.
    Train {
        #[arg(long)]
        config: PathBuf,
        #[arg(long)]
        data: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Optional held-out set to report accuracy on after training.
        #[arg(long)]
        test: Option<PathBuf>,
    },
    /// Report accuracy of a saved network on a labelled dataset.
    Test {
        #[arg(long)]
        model: PathBuf,
        #[arg(long)]
        data: PathBuf,
    },
    /// Classify one 28x28 PNG.
    Predict {
        #[arg(long)]
        model: PathBuf,
        #[arg(long)]
        image: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::InitConfig { out, hidden, epochs, learning_rate, acceptable_error } => {
            let defaults = NetworkConfig::default();
            let config = NetworkConfig {
                hidden_layer_neurons: hidden,
                epochs: epochs.unwrap_or(defaults.epochs),
                learning_rate: learning_rate.unwrap_or(defaults.learning_rate),
                acceptable_error: acceptable_error.unwrap_or(defaults.acceptable_error),
                ..defaults
            };
            config.validate()?;
            config
                .save_json(&out)
                .with_context(|| format!("writing {}", out.display()))?;
            println!("wrote {}", out.display());
        }
        Command::Train { config, data, out, test } => {
            let mut config = NetworkConfig::load_json(&config)
                .with_context(|| format!("reading config {}", config.display()))?;
            let samples = load_samples_json(&data)?;
            config.training_sample_size = samples.len();

            let mut network = Network::new(config)?;
            let report = network.train(&samples)?;
            println!(
                "trained {} epochs, final loss {:.4}{}",
                report.epochs_run,
                report.final_loss().unwrap_or(f64::NAN),
                if report.stopped_early { " (target reached)" } else { "" }
            );
            network.save_json(&out)?;

            if let Some(test) = test {
                let held_out = load_samples_json(&test)?;
                println!("accuracy: {:.2}%", network.test(&held_out)? * 100.0);
            }
        }
        Command::Test { model, data } => {
            let network = Network::load_json(&model)?;
            let samples = load_samples_json(&data)?;
            println!("accuracy: {:.2}% on {} samples", network.test(&samples)? * 100.0, samples.len());
        }
        Command::Predict { model, image } => {
            let network = Network::load_json(&model)?;
            let image = GreekSymbolImage::from_png_path(&image)
                .with_context(|| format!("reading image {}", image.display()))?;
            let prediction = network.predict_image(&image)?;
            println!(
                "{} ({:.1}% confidence, {})",
                prediction.letter,
                prediction.confidence * 100.0,
                prediction.model_name
            );
        }
    }

    Ok(())
}
