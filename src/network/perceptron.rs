use rand::Rng;

use crate::error::NetError;
use crate::math::ops::{dot, sigmoid};

/// A single node in a feed-forward network: one weight per input line, a
/// separate bias weight (the constant-input weight, w0 in the usual notes),
/// and the node's position within its owning layer.
///
/// The index is a structural coordinate, not an identity: hidden-error
/// propagation uses it to select this node's weight column in every unit of
/// the downstream layer, so `Layer::new` insists it matches the node's list
/// position.
#[derive(Debug, Clone)]
pub struct Perceptron {
    weights: Vec<f64>,
    bias: f64,
    index: usize,
}

impl Perceptron {
    pub fn new(weights: Vec<f64>, bias: f64, index: usize) -> Perceptron {
        Perceptron {
            weights,
            bias,
            index,
        }
    }

    /// Creates a perceptron for `inputs` input lines with every weight and
    /// the bias drawn uniformly from `(-scale, scale)`.
    pub fn random<R: Rng + ?Sized>(
        inputs: usize,
        index: usize,
        scale: f64,
        rng: &mut R,
    ) -> Perceptron {
        let weights = (0..inputs).map(|_| rng.gen_range(-scale..scale)).collect();
        let bias = rng.gen_range(-scale..scale);
        Perceptron::new(weights, bias, index)
    }

    /// Number of input lines this perceptron expects.
    pub fn input_size(&self) -> usize {
        self.weights.len()
    }

    /// Position of this perceptron within its owning layer.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Activation level for `inputs`: `sigmoid(weights . inputs + bias)`.
    ///
    /// Pure — reads the current weights, mutates nothing.
    pub fn activation(&self, inputs: &[f64]) -> Result<f64, NetError> {
        Ok(sigmoid(dot(&self.weights, inputs)? + self.bias))
    }

    /// Applies one gradient step in place: every weight moves by
    /// `learning_rate * input * delta`, the bias by `learning_rate * delta`
    /// (its constant input is 1).
    pub fn update(
        &mut self,
        inputs: &[f64],
        delta: f64,
        learning_rate: f64,
    ) -> Result<(), NetError> {
        if inputs.len() != self.weights.len() {
            return Err(NetError::LengthMismatch {
                expected: self.weights.len(),
                actual: inputs.len(),
            });
        }
        for (w, &x) in self.weights.iter_mut().zip(inputs.iter()) {
            *w = update_weight(*w, learning_rate, x, delta);
        }
        self.bias += learning_rate * delta;
        Ok(())
    }
}

/// The scalar weight-update rule: `w + learning_rate * input * delta`.
pub fn update_weight(weight: f64, learning_rate: f64, input: f64, delta: f64) -> f64 {
    weight + learning_rate * input * delta
}
