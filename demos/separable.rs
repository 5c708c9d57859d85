use greek_nn::{GreekLetter, Network, NetworkConfig, Sample};

fn main() {
    let config = NetworkConfig {
        input_size: 4,
        hidden_layer_neurons: vec![3],
        training_sample_size: 40,
        epochs: 50,
        output_classes: 2,
        acceptable_error: 0.01,
        learning_rate: 0.1,
    };
    let mut network = Network::new(config).expect("valid config");

    let alpha = vec![1.0, 0.0, 0.0, 0.0];
    let beta = vec![0.0, 0.0, 0.0, 1.0];
    let samples: Vec<Sample> = (0..20)
        .flat_map(|_| {
            [
                Sample::new(alpha.clone(), GreekLetter::Alpha),
                Sample::new(beta.clone(), GreekLetter::Beta),
            ]
        })
        .collect();

    let report = network.train(&samples).expect("training");
    for (epoch, loss) in report.epoch_losses.iter().enumerate().step_by(5) {
        println!("Epoch {}: loss = {loss:.6}", epoch + 1);
    }

    for input in [&alpha, &beta] {
        let p = network.predict(input).expect("prediction");
        println!("Input: {:?} -> {} ({:.4})", input, p.letter, p.confidence);
    }
}
