extern crate getopts;
use getopts::Options;
use std::{env, process};

use fern::config::Config;
use fern::data;
use fern::network::Network;
use fern::parallel::parallel_train;
use fern::trainer::Backpropagation;

fn parse_args() -> String {
    fn print_usage(program: &str, opts: Options) {
        let brief = format!("Usage: {} FILE [options]", program);
        print!("{}", opts.usage(&brief));
    }

    let args = env::args().collect::<Vec<String>>();
    let program = args[0].clone();
    let mut opts = Options::new();

    opts.optopt(
        "f",
        "file",
        "Training configuration file",
        "/path/to/fern.cfg.json",
    );
    opts.optflag(
        "g",
        "generate-config",
        "Generate a config at your current path.",
    );

    let matches = match opts.parse(&args[1..]) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("{}", e);
            print_usage(&program, opts);
            process::exit(1);
        }
    };

    if matches.opt_present("g") {
        let config = Config::new();
        match config.dump("./fern.cfg.json") {
            Ok(c) => c,
            Err(e) => {
                eprintln!("failed to write config: {}", e);
                process::exit(1)
            }
        };

        process::exit(0);
    }

    let config_path = matches.opt_str("f");

    if let Some(config_path) = config_path {
        return config_path;
    } else {
        print_usage(&program, opts);
        process::exit(0)
    }
}

fn main() {
    let config_path = parse_args();

    let config = match Config::load(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("(fern) failed to load config: {}", e);
            process::exit(1)
        }
    };

    let examples = match data::load_examples(&config.examples_path) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("(fern) failed to load examples: {}", e);
            process::exit(1)
        }
    };

    let mut layer_sizes = config.hidden.clone();
    layer_sizes.push(config.d_out);
    let mut activations = vec![config.hidden_activation; config.hidden.len()];
    activations.push(config.output_activation);

    let mut network = Network::new(config.d_in, &layer_sizes, &activations);
    network.seed();

    let mut trainer = Backpropagation::new(config.learning_rate, config.momentum_coef);

    println!(
        "(fern) training on {} examples for {} iterations",
        examples.len(),
        config.iterations
    );

    if config.workers == 1 {
        trainer.train(&mut network, &examples, config.iterations, config.unsupervised);
    } else {
        let workers = match config.workers {
            0 => None,
            n => Some(n),
        };

        if let Err(e) = parallel_train(
            &mut network,
            &trainer,
            &examples,
            config.iterations,
            config.unsupervised,
            workers,
        ) {
            eprintln!("(fern) training failed: {}", e);
            process::exit(1)
        }
    }

    match network.dump(&config.model_path) {
        Ok(_) => println!("(fern) model written to {}", config.model_path),
        Err(e) => {
            eprintln!("(fern) failed to write model: {}", e);
            process::exit(1)
        }
    }
}
