use std::error::Error;
use std::sync::mpsc;
use std::thread;

use crate::data::Example;
use crate::network::Network;
use crate::trainer::Backpropagation;

/// Trains independent copies of `network` concurrently, one worker per
/// contiguous slice of `examples`, then averages every weight and threshold
/// of the original together with all trained copies back into `network`.
///
/// `workers` defaults to the hardware parallelism and is clamped down to the
/// example count so every worker sees at least one example. The calling
/// thread acts as the final worker instead of idling at the barrier; its
/// slice runs to the end of the set, so a remainder that does not divide
/// evenly is absorbed rather than dropped.
///
/// Gradients and sparsity estimates never cross workers — only the final
/// parameters are merged.
pub fn parallel_train(
    network: &mut Network,
    trainer: &Backpropagation,
    examples: &[Example],
    iterations: usize,
    unsupervised: bool,
    workers: Option<usize>,
) -> Result<(), Box<dyn Error>> {
    if examples.is_empty() {
        return Err("(fern) cannot train on an empty example set".into());
    }

    let workers = workers
        .unwrap_or_else(|| thread::available_parallelism().map(|n| n.get()).unwrap_or(1))
        .max(1)
        .min(examples.len());
    let chunk = examples.len() / workers;

    let (result_tx, result_rx) = mpsc::channel::<Network>();
    let mut handles = Vec::with_capacity(workers - 1);

    for w in 0..workers - 1 {
        let result_tx = result_tx.clone();
        let mut worker_network = network.clone();
        let mut worker_trainer = trainer.clone();
        let slice = examples[w * chunk..(w + 1) * chunk].to_vec();

        handles.push(thread::spawn(move || {
            worker_trainer.train(&mut worker_network, &slice, iterations, unsupervised);
            let _ = result_tx.send(worker_network);
        }));
    }

    // only worker clones may hold senders from here on: once a dead worker
    // drops its clone, the blocking recv below disconnects instead of
    // waiting forever
    drop(result_tx);

    // the calling thread trains its own copy on the tail slice; the
    // pre-training parameters stay intact on `network` for the merge
    let mut local_network = network.clone();
    let mut local_trainer = trainer.clone();
    local_trainer.train(
        &mut local_network,
        &examples[(workers - 1) * chunk..],
        iterations,
        unsupervised,
    );

    // blocking collect, no timeout; a dead worker surfaces as a recv error
    let mut trained = Vec::with_capacity(workers);
    for _ in 0..workers - 1 {
        let worker_network = result_rx
            .recv()
            .map_err(|_| "(fern) training worker died before returning its network")?;
        trained.push(worker_network);
    }
    trained.push(local_network);

    for handle in handles {
        if handle.join().is_err() {
            return Err("(fern) training worker panicked".into());
        }
    }

    merge(network, &trained);

    Ok(())
}

/// Position-wise average of the original parameters with every trained
/// copy, written back into `network`.
fn merge(network: &mut Network, trained: &[Network]) {
    let divisor = (trained.len() + 1) as f64;

    for (l, layer) in network.layers.iter_mut().enumerate() {
        for (j, neuron) in layer.neurons.iter_mut().enumerate() {
            for ij in 0..neuron.weights.len() {
                let sum = trained
                    .iter()
                    .map(|n| n.layers[l].neurons[j].weights[ij])
                    .sum::<f64>();
                neuron.weights[ij] = (neuron.weights[ij] + sum) / divisor;
            }

            let sum = trained
                .iter()
                .map(|n| n.layers[l].neurons[j].threshold)
                .sum::<f64>();
            neuron.threshold = (neuron.threshold + sum) / divisor;
        }
    }
}
