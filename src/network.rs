use ndarray::Array1;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::{thread_rng, Rng};
use serde::{Deserialize, Serialize};
use std::{error::Error, fs, path::PathBuf, str::FromStr};

use crate::activation::Activation;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Neuron {
    /// One weight per incoming connection, parallel-indexed to `inputs`.
    pub weights: Array1<f64>,
    /// Bias term; enters the net input with a fixed "input" of 1.
    pub threshold: f64,
    /// Activation from the most recent forward pass.
    pub local_output: f64,
    /// Values fed into this neuron during the most recent forward pass.
    pub inputs: Array1<f64>,
}

impl Neuron {
    pub fn new(fan_in: usize) -> Neuron {
        Neuron {
            weights: Array1::zeros(fan_in),
            threshold: 0.,
            local_output: 0.,
            inputs: Array1::zeros(fan_in),
        }
    }

    /// Caches `inputs`, computes the activation, and caches it as
    /// `local_output`.
    pub fn fire(&mut self, inputs: &Array1<f64>, activation: Activation) -> f64 {
        self.inputs = inputs.clone();
        self.local_output = activation.activate(self.weights.dot(inputs) + self.threshold);
        self.local_output
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Layer {
    pub neurons: Vec<Neuron>,
    /// Shared by every neuron in the layer.
    pub activation: Activation,
}

impl Layer {
    pub fn new(fan_in: usize, width: usize, activation: Activation) -> Layer {
        Layer {
            neurons: (0..width).map(|_| Neuron::new(fan_in)).collect(),
            activation,
        }
    }

    pub fn width(&self) -> usize {
        self.neurons.len()
    }

    pub fn forward(&mut self, inputs: &Array1<f64>) -> Array1<f64> {
        let activation = self.activation;
        let outputs = self
            .neurons
            .iter_mut()
            .map(|neuron| neuron.fire(inputs, activation))
            .collect::<Vec<f64>>();

        Array1::from(outputs)
    }
}

/// A feed-forward network: hidden layer(s) followed by one output layer.
/// The input layer is implicit — `d_in` only fixes the first weight fan-in.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Network {
    pub d_in: usize,
    pub layers: Vec<Layer>,
}

impl Network {
    /// Builds a zero-parameter network. `layer_sizes` runs hidden-first and
    /// ends with the output width; `activations` is parallel to it.
    pub fn new(d_in: usize, layer_sizes: &[usize], activations: &[Activation]) -> Network {
        if layer_sizes.is_empty() {
            panic!("(fern) a network needs at least an output layer");
        }
        if layer_sizes.len() != activations.len() {
            panic!("(fern) layer sizes and activations must align");
        }

        let mut layers = Vec::with_capacity(layer_sizes.len());
        let mut fan_in = d_in;

        for (width, activation) in layer_sizes.iter().zip(activations.iter()) {
            layers.push(Layer::new(fan_in, *width, *activation));
            fan_in = *width;
        }

        Network { d_in, layers }
    }

    /// Randomizes every weight and threshold within
    /// `±sqrt(6) / (fan_in + width)` of the owning layer.
    pub fn seed(&mut self) {
        let mut rng = thread_rng();

        for layer in self.layers.iter_mut() {
            let width = layer.width();
            for neuron in layer.neurons.iter_mut() {
                let fan_in = neuron.weights.len();
                let bound = f64::sqrt(6.) / (fan_in + width) as f64;
                neuron.weights = Array1::random(fan_in, Uniform::new(-bound, bound));
                neuron.threshold = rng.gen_range(-bound..bound);
            }
        }
    }

    pub fn d_out(&self) -> usize {
        self.layers[self.layers.len() - 1].width()
    }

    /// Feeds `input` through every layer, caching each neuron's inputs and
    /// activation along the way, and returns the output layer's activations.
    pub fn compute_network_output(&mut self, input: &[f64]) -> Vec<f64> {
        let mut signal = Array1::from(input.to_vec());

        for layer in self.layers.iter_mut() {
            signal = layer.forward(&signal);
        }

        signal.to_vec()
    }

    /// Writes a binary snapshot of the network.
    pub fn dump(&self, path: &str) -> Result<(), Box<dyn Error>> {
        let path = PathBuf::from_str(path)?;
        let bytes = bincode::serialize(&self)?;
        fs::write(path, bytes)?;

        Ok(())
    }

    pub fn load(path: &str) -> Result<Network, Box<dyn Error>> {
        let path = PathBuf::from_str(path)?;
        let bytes = fs::read(path)?;
        let network = bincode::deserialize(&bytes)?;

        Ok(network)
    }
}
