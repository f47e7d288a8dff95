use serde::{Deserialize, Serialize};

/// Activation function shared by every neuron in a layer.
///
/// All variants are pure: `derivative` takes the already-activated value
/// `f(x)`, not the pre-activation input.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    Logistic,
    Tanh,
    Linear,
}

impl Activation {
    pub fn activate(&self, x: f64) -> f64 {
        match self {
            // clamped so saturated outputs never reach exactly 0 or 1
            Activation::Logistic => (1. / (1. + (-x).exp())).clamp(1e-13, 1. - 1e-13),
            Activation::Tanh => (x.exp() - (-x).exp()) / (x.exp() + (-x).exp()),
            Activation::Linear => x,
        }
    }

    /// Derivative evaluated at `fx = activate(x)`.
    pub fn derivative(&self, fx: f64) -> f64 {
        match self {
            Activation::Logistic => fx * (1. - fx),
            Activation::Tanh => (1. - fx) * (1. + fx),
            Activation::Linear => 1.,
        }
    }

    /// Recovers the pre-activation value from an activated one.
    pub fn inverse(&self, y: f64) -> f64 {
        match self {
            Activation::Logistic => (y / (1. - y)).ln(),
            Activation::Tanh => y.atanh(),
            Activation::Linear => y,
        }
    }

    /// Per-output cost of hypothesis `h` against target `y`.
    pub fn cost(&self, h: f64, y: f64) -> f64 {
        match self {
            Activation::Logistic => -y * h.ln() - (1. - y) * (1. - h).ln(),
            Activation::Tanh => 0.5 * (h - y).abs().powi(2),
            Activation::Linear => 0.5 * (h - y).powi(2),
        }
    }
}
