use serde::{Deserialize, Serialize};
use std::{error::Error, fs, path::PathBuf, str::FromStr};

/// One labelled example: the target output vector, then the input vector.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Example {
    pub target: Vec<f64>,
    pub input: Vec<f64>,
}

impl Example {
    pub fn new(target: Vec<f64>, input: Vec<f64>) -> Example {
        Example { target, input }
    }

    /// Autoencoder example: the input is its own target.
    pub fn identity(input: Vec<f64>) -> Example {
        Example {
            target: input.clone(),
            input,
        }
    }
}

/// Reads an ordered training set from a JSON file.
pub fn load_examples(path: &str) -> Result<Vec<Example>, Box<dyn Error>> {
    let path = PathBuf::from_str(path)?;
    let bytes = fs::read(path)?;
    let examples = serde_json::from_slice(&bytes)?;

    Ok(examples)
}
