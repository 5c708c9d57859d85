use crate::activation::activation::Activation;
use crate::error::ConfigError;
use crate::network::config::NetworkConfig;

/// Layer widths from input to output: `[input, hidden.., output]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    widths: Vec<usize>,
}

/// One weight layer between two consecutive widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerShape {
    pub input_size: usize,
    pub size: usize,
    pub activation: Activation,
}

impl Topology {
    /// Validates `config`, then lays out its widths. An invalid config never
    /// produces a topology.
    pub fn from_config(config: &NetworkConfig) -> Result<Topology, ConfigError> {
        config.validate()?;
        let mut widths = Vec::with_capacity(config.hidden_layer_neurons.len() + 2);
        widths.push(config.input_size);
        widths.extend_from_slice(&config.hidden_layer_neurons);
        widths.push(config.output_classes);
        Ok(Topology { widths })
    }

    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    pub fn input_size(&self) -> usize {
        self.widths[0]
    }

    pub fn output_size(&self) -> usize {
        self.widths[self.widths.len() - 1]
    }

    /// Number of weight layers (`widths.len() - 1`).
    pub fn layer_count(&self) -> usize {
        self.widths.len() - 1
    }

    /// Shapes of the weight layers in forward order. Every layer but the last
    /// is a tanh hidden layer; the last one is the softmax output.
    pub fn layers(&self) -> impl Iterator<Item = LayerShape> + '_ {
        let last = self.layer_count() - 1;
        self.widths.windows(2).enumerate().map(move |(i, pair)| LayerShape {
            input_size: pair[0],
            size: pair[1],
            activation: if i == last { Activation::Softmax } else { Activation::Tanh },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(hidden: Vec<usize>) -> NetworkConfig {
        NetworkConfig {
            input_size: 784,
            hidden_layer_neurons: hidden,
            output_classes: 24,
            ..NetworkConfig::default()
        }
    }

    #[test]
    fn widths_run_input_hidden_output() {
        for hidden in [vec![], vec![64], vec![128, 64, 32]] {
            let n_hidden = hidden.len();
            let topo = Topology::from_config(&config(hidden)).unwrap();
            assert_eq!(topo.widths().len(), n_hidden + 2);
            assert_eq!(topo.input_size(), 784);
            assert_eq!(topo.output_size(), 24);
        }
    }

    #[test]
    fn only_last_layer_is_softmax() {
        let topo = Topology::from_config(&config(vec![16, 8])).unwrap();
        let shapes: Vec<LayerShape> = topo.layers().collect();
        assert_eq!(shapes.len(), 3);
        assert_eq!(shapes[0].input_size, 784);
        assert_eq!(shapes[0].size, 16);
        assert_eq!(shapes[1].activation, Activation::Tanh);
        assert_eq!(shapes[2].activation, Activation::Softmax);
        assert_eq!(shapes[2].input_size, 8);
    }

    #[test]
    fn without_hidden_layers_the_single_layer_is_softmax() {
        let topo = Topology::from_config(&config(vec![])).unwrap();
        let shapes: Vec<LayerShape> = topo.layers().collect();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].activation, Activation::Softmax);
    }

    #[test]
    fn invalid_config_is_rejected_first() {
        let bad = NetworkConfig { epochs: 0, ..config(vec![4]) };
        assert_eq!(Topology::from_config(&bad).unwrap_err().field, "Epochs");
    }
}
