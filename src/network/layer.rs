use rand::Rng;

use crate::error::NetError;
use crate::network::perceptron::Perceptron;

/// One fully-connected layer: a list of perceptrons that all read the same
/// input vector.
///
/// Construction enforces two structural rules that the rest of the crate
/// relies on. Every perceptron must carry exactly `inputs` weights, and the
/// perceptron stored at position `k` must report index `k`.
#[derive(Debug, Clone)]
pub struct Layer {
    inputs: usize,
    perceptrons: Vec<Perceptron>,
}

impl Layer {
    pub fn new(inputs: usize, perceptrons: Vec<Perceptron>) -> Result<Layer, NetError> {
        for (position, pcpt) in perceptrons.iter().enumerate() {
            if pcpt.input_size() != inputs {
                return Err(NetError::StructuralMismatch {
                    position,
                    reason: format!(
                        "perceptron carries {} weights, layer takes {} inputs",
                        pcpt.input_size(),
                        inputs
                    ),
                });
            }
            if pcpt.index() != position {
                return Err(NetError::StructuralMismatch {
                    position,
                    reason: format!("perceptron reports index {}", pcpt.index()),
                });
            }
        }
        Ok(Layer {
            inputs,
            perceptrons,
        })
    }

    /// Creates a layer of `size` randomly initialised perceptrons over
    /// `inputs` input lines, weights drawn from `(-scale, scale)`.
    pub fn random<R: Rng + ?Sized>(
        inputs: usize,
        size: usize,
        scale: f64,
        rng: &mut R,
    ) -> Layer {
        let perceptrons = (0..size)
            .map(|index| Perceptron::random(inputs, index, scale, rng))
            .collect();
        Layer {
            inputs,
            perceptrons,
        }
    }

    /// Width of the input vector this layer consumes.
    pub fn input_size(&self) -> usize {
        self.inputs
    }

    /// Number of perceptrons, which is also the width of the output vector.
    pub fn output_size(&self) -> usize {
        self.perceptrons.len()
    }

    pub fn perceptrons(&self) -> &[Perceptron] {
        &self.perceptrons
    }

    /// Activation of every perceptron against the same `inputs`, in layer
    /// order. Pure.
    pub fn evaluate(&self, inputs: &[f64]) -> Result<Vec<f64>, NetError> {
        self.perceptrons
            .iter()
            .map(|pcpt| pcpt.activation(inputs))
            .collect()
    }

    /// Applies one gradient step to every perceptron in place, pairing
    /// `deltas[k]` with the perceptron at position `k`. All perceptrons saw
    /// the same `inputs` during the forward pass.
    pub fn update(
        &mut self,
        inputs: &[f64],
        deltas: &[f64],
        learning_rate: f64,
    ) -> Result<(), NetError> {
        if deltas.len() != self.perceptrons.len() {
            return Err(NetError::LengthMismatch {
                expected: self.perceptrons.len(),
                actual: deltas.len(),
            });
        }
        if inputs.len() != self.inputs {
            return Err(NetError::LengthMismatch {
                expected: self.inputs,
                actual: inputs.len(),
            });
        }
        for (pcpt, &delta) in self.perceptrons.iter_mut().zip(deltas.iter()) {
            pcpt.update(inputs, delta, learning_rate)?;
        }
        Ok(())
    }
}
