use ndarray::Array1;

use crate::activation::Activation;
use crate::data::Example;
use crate::network::Network;

/// Target average activation for a hidden neuron in the unsupervised
/// (sparse autoencoder) mode.
const RHO: f64 = 0.05;
/// Learning rate for the sparsity threshold correction.
const BETA: f64 = 0.2;

/// Running per-neuron activation estimates for the hidden layers, alive for
/// one `train` call and discarded afterwards.
#[derive(Clone, Debug)]
pub struct Sparsity {
    estimates: Vec<Vec<f64>>,
}

impl Sparsity {
    /// Zeroed estimates, one per neuron of every non-output layer.
    pub fn for_network(network: &Network) -> Sparsity {
        let estimates = network.layers[..network.layers.len() - 1]
            .iter()
            .map(|layer| vec![0.; layer.width()])
            .collect();

        Sparsity { estimates }
    }

    /// Folds one activation into the estimate for neuron `j` of hidden layer
    /// `layer_ix` and returns the estimate's distance from the target.
    pub fn drift(&mut self, layer_ix: usize, j: usize, local_output: f64) -> f64 {
        let estimate = &mut self.estimates[layer_ix][j];
        *estimate = 0.999 * *estimate + 0.001 * local_output;
        *estimate - RHO
    }

    pub fn estimates(&self) -> &[Vec<f64>] {
        &self.estimates
    }
}

/// Gradient-descent trainer: per-example forward pass, then a backward pass
/// that updates weights and thresholds immediately, neuron by neuron.
#[derive(Clone, Debug)]
pub struct Backpropagation {
    pub learning_rate: f64,
    /// Stored for callers that configure it; the current update rule does
    /// not apply momentum.
    pub momentum_coef: f64,
    /// Iterations completed by the most recent `train` call.
    pub iterations: usize,
}

impl Backpropagation {
    pub fn new(learning_rate: f64, momentum_coef: f64) -> Backpropagation {
        Backpropagation {
            learning_rate,
            momentum_coef,
            iterations: 0,
        }
    }

    /// Runs `iterations` full passes over `examples`, mutating `network` in
    /// place. With `unsupervised` set, hidden thresholds additionally track
    /// the sparsity target (callers pair each input with itself to train a
    /// sparse autoencoder).
    ///
    /// Examples whose vector lengths disagree with the network topology are
    /// a fatal misconfiguration and panic mid-pass.
    pub fn train(
        &mut self,
        network: &mut Network,
        examples: &[Example],
        iterations: usize,
        unsupervised: bool,
    ) {
        let mut sparsity = if unsupervised {
            Some(Sparsity::for_network(network))
        } else {
            None
        };

        for _ in 0..iterations {
            for example in examples.iter() {
                network.compute_network_output(&example.input);
                self.backpropagate(network, &example.target, sparsity.as_mut());
            }
        }

        self.iterations = iterations;
    }

    /// One backward pass over a network whose caches were just populated by
    /// a forward pass on the corresponding input.
    fn backpropagate(
        &self,
        network: &mut Network,
        target: &[f64],
        mut sparsity: Option<&mut Sparsity>,
    ) {
        let output_ix = network.layers.len() - 1;

        // deltas and weight vectors of the previously processed (more
        // forward) layer; empty while on the output layer
        let mut next_deltas: Vec<f64> = Vec::new();
        let mut next_weights: Vec<Array1<f64>> = Vec::new();

        for (layer_ix, layer) in network.layers.iter_mut().enumerate().rev() {
            let activation = layer.activation;
            let mut this_deltas = Vec::with_capacity(layer.width());
            let mut this_weights = Vec::with_capacity(layer.width());

            for (j, neuron) in layer.neurons.iter_mut().enumerate() {
                let delta = if layer_ix == output_ix {
                    let error = neuron.local_output - target[j];
                    match activation {
                        // cross-entropy cost times the logistic derivative
                        // collapses to the raw error
                        Activation::Logistic => error,
                        _ => error * activation.derivative(neuron.local_output),
                    }
                } else {
                    // how much this neuron contributed to each forward
                    // neuron's error
                    let downstream = next_weights
                        .iter()
                        .zip(next_deltas.iter())
                        .map(|(weights, delta)| weights[j] * delta)
                        .sum::<f64>();

                    activation.derivative(neuron.local_output) * downstream
                };

                // gradient_ij = delta * input_ij, applied immediately
                neuron
                    .weights
                    .scaled_add(-self.learning_rate * delta, &neuron.inputs);
                // the threshold sees a fixed input of 1
                neuron.threshold -= self.learning_rate * delta;

                if layer_ix != output_ix {
                    if let Some(sparsity) = sparsity.as_deref_mut() {
                        neuron.threshold -= self.learning_rate
                            * BETA
                            * sparsity.drift(layer_ix, j, neuron.local_output);
                    }
                }

                this_deltas.push(delta);
                // recorded post-update: the layer behind this one propagates
                // error through the weights as they now stand
                this_weights.push(neuron.weights.clone());
            }

            next_deltas = this_deltas;
            next_weights = this_weights;
        }
    }
}
