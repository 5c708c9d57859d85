use std::sync::atomic::{AtomicBool, Ordering};

use crate::data::greek_letter::GreekLetter;
use crate::data::sample::Sample;
use crate::error::Result;
use crate::loss::cross_entropy::{one_hot, CrossEntropyLoss};
use crate::network::network::Network;
use crate::network::parameters::ParameterStore;
use crate::optim::sgd::Sgd;

/// Totals for one pass over the dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EpochOutcome {
    pub total_loss: f64,
    pub skipped: usize,
    pub untargeted: usize,
    /// The stop flag was raised part-way through.
    pub cancelled: bool,
}

/// Runs one epoch of per-sample SGD, visiting `samples` in `order`.
///
/// Samples whose pixel vector does not fit the input layer are skipped and
/// counted rather than aborting the epoch.
pub fn run_epoch(
    network: &mut Network,
    samples: &[Sample],
    order: &[usize],
    sgd: &Sgd,
    stop_flag: Option<&AtomicBool>,
) -> Result<EpochOutcome> {
    let input_size = network.input_size();
    let output_size = network.topology().output_size();
    let mut outcome = EpochOutcome::default();

    for &idx in order {
        if stop_flag.is_some_and(|f| f.load(Ordering::Relaxed)) {
            outcome.cancelled = true;
            break;
        }

        let sample = &samples[idx];
        if sample.pixels.len() != input_size {
            outcome.skipped += 1;
            continue;
        }
        if sample.label.one_hot_index() >= output_size {
            outcome.untargeted += 1;
        }

        outcome.total_loss += train_sample(network, &sample.pixels, sample.label, sgd)?;
    }

    Ok(outcome)
}

/// Forward pass, loss, backpropagation and update for a single sample.
/// Returns the sample's cross-entropy loss.
///
/// A label beyond the output layer gets an all-zero target: it adds no loss
/// and every output is pushed down by its own probability.
pub fn train_sample(network: &mut Network, pixels: &[f64], label: GreekLetter, sgd: &Sgd) -> Result<f64> {
    let activations = network.forward_cached(pixels)?;
    let output = &activations[activations.len() - 1];
    let target = one_hot(label.one_hot_index(), output.len());

    let loss = CrossEntropyLoss::loss(output, &target);
    let error = CrossEntropyLoss::derivative(output, &target);
    backpropagate(network.parameters_mut(), &activations, error, sgd);
    Ok(loss)
}

/// Walks the layers from output to input, updating each in place.
///
/// `activations[i]` is the input of layer `i` (the forward cache).
/// `output_error` is `predicted - target`, the combined softmax and
/// cross-entropy gradient at the logits.
pub fn backpropagate(params: &mut ParameterStore, activations: &[Vec<f64>], output_error: Vec<f64>, sgd: &Sgd) {
    let mut error = output_error;

    for i in (0..params.layers.len()).rev() {
        let input = &activations[i];

        // Error for the layer below is taken from the weights before this
        // layer's update.
        let lower_error = (i > 0).then(|| {
            let lower_activation = params.layers[i - 1].activation;
            params.layers[i].backpropagate(&error, input, lower_activation)
        });

        sgd.step(&mut params.layers[i], input, &error);

        match lower_error {
            Some(e) => error = e,
            None => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::config::NetworkConfig;
    use approx::assert_abs_diff_eq;

    fn network() -> Network {
        Network::new(NetworkConfig {
            input_size: 3,
            hidden_layer_neurons: vec![4],
            training_sample_size: 1,
            epochs: 1,
            output_classes: 2,
            acceptable_error: 0.0,
            learning_rate: 0.1,
        })
        .unwrap()
    }

    /// Numerical loss for the current parameters.
    fn loss_of(net: &Network, pixels: &[f64], label: GreekLetter) -> f64 {
        let out = net.forward(pixels).unwrap();
        CrossEntropyLoss::loss(&out, &one_hot(label.one_hot_index(), out.len()))
    }

    #[test]
    fn single_step_matches_finite_difference_gradient() {
        let pixels = [1.0, 0.0, 1.0];
        let label = GreekLetter::Beta;
        let lr = 1e-3;
        let h = 1e-6;

        let base = network();
        // Probe one first-layer weight and one output bias.
        let probes = [(0usize, true, 2usize), (1, false, 1)];
        let mut expected_updates = Vec::new();
        for &(layer, is_weight, idx) in &probes {
            let mut plus = base.clone();
            let mut minus = base.clone();
            if is_weight {
                plus.parameters_mut().layers[layer].weights.data[idx] += h;
                minus.parameters_mut().layers[layer].weights.data[idx] -= h;
            } else {
                plus.parameters_mut().layers[layer].biases[idx] += h;
                minus.parameters_mut().layers[layer].biases[idx] -= h;
            }
            let grad = (loss_of(&plus, &pixels, label) - loss_of(&minus, &pixels, label)) / (2.0 * h);
            expected_updates.push(-lr * grad);
        }

        let mut trained = base.clone();
        train_sample(&mut trained, &pixels, label, &Sgd::new(lr)).unwrap();

        let before = base.parameters();
        let after = trained.parameters();
        let dw = after.layers[0].weights.data[2] - before.layers[0].weights.data[2];
        let db = after.layers[1].biases[1] - before.layers[1].biases[1];
        assert_abs_diff_eq!(dw, expected_updates[0], epsilon = 1e-8);
        assert_abs_diff_eq!(db, expected_updates[1], epsilon = 1e-8);
    }

    #[test]
    fn step_lowers_loss_on_that_sample() {
        let pixels = [0.0, 1.0, 1.0];
        let mut net = network();
        let before = loss_of(&net, &pixels, GreekLetter::Alpha);
        let reported = train_sample(&mut net, &pixels, GreekLetter::Alpha, &Sgd::new(0.1)).unwrap();
        assert_abs_diff_eq!(reported, before, epsilon = 1e-12);
        assert!(loss_of(&net, &pixels, GreekLetter::Alpha) < before);
    }

    #[test]
    fn epoch_skips_and_counts_malformed_samples() {
        let mut net = network();
        let samples = vec![
            Sample::new(vec![1.0, 0.0, 0.0], GreekLetter::Alpha),
            Sample::new(vec![1.0, 0.0], GreekLetter::Alpha),
            Sample::new(vec![0.0, 0.0, 1.0], GreekLetter::Omega),
        ];
        let outcome = run_epoch(&mut net, &samples, &[0, 1, 2], &Sgd::new(0.1), None).unwrap();
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.untargeted, 1);
        assert!(!outcome.cancelled);
        assert!(outcome.total_loss > 0.0);
    }

    #[test]
    fn raised_stop_flag_leaves_parameters_untouched() {
        let mut net = network();
        let before = net.parameters().clone();
        let samples = vec![Sample::new(vec![1.0, 1.0, 1.0], GreekLetter::Beta)];
        let flag = AtomicBool::new(true);

        let outcome = run_epoch(&mut net, &samples, &[0], &Sgd::new(0.1), Some(&flag)).unwrap();
        assert!(outcome.cancelled);
        assert_eq!(net.parameters(), &before);
    }
}
