use ndarray::Array1;

use fern::activation::Activation;
use fern::data::Example;
use fern::network::Network;
use fern::parallel::parallel_train;
use fern::trainer::Backpropagation;

fn mean_cost(network: &mut Network, examples: &[Example]) -> f64 {
    let activation = network.layers[network.layers.len() - 1].activation;
    let mut total = 0.;

    for example in examples {
        let output = network.compute_network_output(&example.input);
        for (h, y) in output.iter().zip(example.target.iter()) {
            total += activation.cost(*h, *y);
        }
    }

    total / examples.len() as f64
}

#[test]
fn logistic_regression_cost_decreases() {
    let mut network = Network::new(2, &[1], &[Activation::Logistic]);

    let examples = vec![
        Example::new(vec![1.], vec![1., 0.]),
        Example::new(vec![0.], vec![0., 1.]),
        Example::new(vec![1.], vec![0.8, 0.1]),
        Example::new(vec![0.], vec![0.1, 0.9]),
    ];

    let before = mean_cost(&mut network, &examples);

    let mut trainer = Backpropagation::new(0.5, 0.);
    trainer.train(&mut network, &examples, 200, false);

    let after = mean_cost(&mut network, &examples);

    assert!(after < before, "cost went from {} to {}", before, after);
}

#[test]
fn autoencoder_training_stays_finite() {
    let mut network = Network::new(3, &[2, 3], &[Activation::Logistic, Activation::Logistic]);
    network.seed();

    let examples = vec![
        Example::identity(vec![1., 0., 0.]),
        Example::identity(vec![0., 1., 0.]),
        Example::identity(vec![0., 0., 1.]),
    ];

    let mut trainer = Backpropagation::new(0.2, 0.);
    trainer.train(&mut network, &examples, 100, true);

    for layer in network.layers.iter() {
        for neuron in layer.neurons.iter() {
            assert!(neuron.weights.iter().all(|w| w.is_finite()));
            assert!(neuron.threshold.is_finite());
        }
    }

    let output = network.compute_network_output(&[1., 0., 0.]);
    assert!(output.iter().all(|y| *y > 0. && *y < 1.));
}

#[test]
fn parallel_training_changes_the_original_network_in_place() {
    let mut network = Network::new(2, &[2, 1], &[Activation::Logistic, Activation::Logistic]);
    network.layers[0].neurons[0].weights = Array1::from(vec![0.1, 0.2]);
    network.layers[0].neurons[1].weights = Array1::from(vec![-0.3, 0.4]);
    network.layers[1].neurons[0].weights = Array1::from(vec![0.6, -0.5]);
    let before = network.clone();

    let examples = vec![
        Example::new(vec![1.], vec![0., 1.]),
        Example::new(vec![0.], vec![1., 0.]),
        Example::new(vec![1.], vec![0.9, 0.9]),
        Example::new(vec![0.], vec![0.1, 0.2]),
    ];

    let trainer = Backpropagation::new(0.5, 0.);
    parallel_train(&mut network, &trainer, &examples, 10, false, Some(2)).unwrap();

    let mut moved = false;
    for (a, b) in network.layers.iter().zip(before.layers.iter()) {
        for (x, y) in a.neurons.iter().zip(b.neurons.iter()) {
            assert!(x.weights.iter().all(|w| w.is_finite()));
            if x.weights != y.weights || x.threshold != y.threshold {
                moved = true;
            }
        }
    }

    assert!(moved, "parallel training left every parameter untouched");
}

#[test]
fn direct_and_parallel_training_agree_for_one_chunk() {
    // a single worker over the whole set reduces to: train one copy, then
    // average it with the untouched original
    let build = || {
        let mut network = Network::new(2, &[2, 1], &[Activation::Tanh, Activation::Linear]);
        network.layers[0].neurons[0].weights = Array1::from(vec![0.2, -0.1]);
        network.layers[0].neurons[1].weights = Array1::from(vec![0.3, 0.3]);
        network.layers[1].neurons[0].weights = Array1::from(vec![-0.2, 0.5]);
        network
    };

    let examples = vec![
        Example::new(vec![0.5], vec![1., 0.]),
        Example::new(vec![-0.5], vec![0., 1.]),
    ];

    let mut trained = build();
    Backpropagation::new(0.1, 0.).train(&mut trained, &examples, 50, false);

    let mut network = build();
    let trainer = Backpropagation::new(0.1, 0.);
    parallel_train(&mut network, &trainer, &examples, 50, false, Some(1)).unwrap();

    let original = build();
    for (l, layer) in network.layers.iter().enumerate() {
        for (j, neuron) in layer.neurons.iter().enumerate() {
            for ij in 0..neuron.weights.len() {
                let expected = (original.layers[l].neurons[j].weights[ij]
                    + trained.layers[l].neurons[j].weights[ij])
                    / 2.;
                assert!((neuron.weights[ij] - expected).abs() < 1e-12);
            }
            let expected = (original.layers[l].neurons[j].threshold
                + trained.layers[l].neurons[j].threshold)
                / 2.;
            assert!((neuron.threshold - expected).abs() < 1e-12);
        }
    }
}
