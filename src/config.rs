use serde::{Deserialize, Serialize};
use std::{error::Error, fs, path::PathBuf, str::FromStr};

use crate::activation::Activation;

#[derive(Serialize, Deserialize, Debug)]
pub struct Config {
    pub examples_path: String,
    pub model_path: String,

    pub d_in: usize,
    pub hidden: Vec<usize>,
    pub d_out: usize,
    pub hidden_activation: Activation,
    pub output_activation: Activation,

    pub learning_rate: f64,
    pub momentum_coef: f64,
    pub iterations: usize,
    /// 0 selects the hardware parallelism; 1 trains on the calling thread.
    pub workers: usize,
    pub unsupervised: bool,
}

impl Config {
    pub fn load(path: &str) -> Result<Config, Box<dyn Error>> {
        let path = PathBuf::from_str(path)?;

        let config_bytes = fs::read(path)?;
        let config = serde_json::from_slice(&config_bytes)?;

        Ok(config)
    }

    pub fn new() -> Config {
        Config {
            examples_path: "./examples.json".into(),
            model_path: "./model.bin".into(),

            d_in: 2,
            hidden: vec![4],
            d_out: 1,
            hidden_activation: Activation::Logistic,
            output_activation: Activation::Logistic,

            learning_rate: 0.1,
            momentum_coef: 0.,
            iterations: 1000,
            workers: 0,
            unsupervised: false,
        }
    }

    pub fn dump(&self, path: &str) -> Result<(), Box<dyn Error>> {
        let path = PathBuf::from_str(path)?;
        let config_str = serde_json::to_string_pretty(&self)?;
        fs::write(path, config_str)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_roundtrip_through_json() {
        let config = Config::new();
        let raw = serde_json::to_string(&config).unwrap();
        let restored: Config = serde_json::from_str(&raw).unwrap();

        assert_eq!(restored.d_in, config.d_in);
        assert_eq!(restored.hidden, config.hidden);
        assert_eq!(restored.hidden_activation, Activation::Logistic);
        assert_eq!(restored.workers, 0);
    }
}
