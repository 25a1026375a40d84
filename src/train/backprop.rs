//! Error propagation and the online training step.
//!
//! Every formula here assumes `output_error`'s sign convention
//! (`target - activation`): flipping it inverts the learning direction in
//! the update rule, so the sign is part of the contract, not a detail.

use crate::data::Instance;
use crate::error::NetError;
use crate::network::{Layer, Network, Perceptron};

/// Error term of a single output unit: `target - activation`.
pub fn output_error(activation: f64, target: f64) -> f64 {
    target - activation
}

/// Output-layer errors, pairing activations and targets by position.
pub fn output_errors(activations: &[f64], targets: &[f64]) -> Result<Vec<f64>, NetError> {
    if activations.len() != targets.len() {
        return Err(NetError::LengthMismatch {
            expected: activations.len(),
            actual: targets.len(),
        });
    }
    Ok(activations
        .iter()
        .zip(targets.iter())
        .map(|(&a, &t)| output_error(a, t))
        .collect())
}

/// Sigmoid-derivative-weighted error: `error * activation * (1 - activation)`.
///
/// Used identically for output and hidden units once the unit's own error is
/// known.
pub fn delta(activation: f64, error: f64) -> f64 {
    error * activation * (1.0 - activation)
}

/// Deltas for a whole layer from its activations and per-unit errors.
pub fn layer_deltas(activations: &[f64], errors: &[f64]) -> Result<Vec<f64>, NetError> {
    if activations.len() != errors.len() {
        return Err(NetError::LengthMismatch {
            expected: activations.len(),
            actual: errors.len(),
        });
    }
    Ok(activations
        .iter()
        .zip(errors.iter())
        .map(|(&a, &e)| delta(a, e))
        .collect())
}

/// Backpropagated error for a hidden unit: for every unit `k` downstream,
/// the weight `k` assigns to this unit's output line, times `k`'s delta,
/// summed over `k`.
///
/// The unit's stored index picks the weight column; layer construction
/// guarantees it equals the unit's position, which by full connection equals
/// the input line its activation feeds downstream.
pub fn hidden_error(
    unit: &Perceptron,
    downstream: &Layer,
    downstream_deltas: &[f64],
) -> Result<f64, NetError> {
    if downstream_deltas.len() != downstream.output_size() {
        return Err(NetError::LengthMismatch {
            expected: downstream.output_size(),
            actual: downstream_deltas.len(),
        });
    }
    if unit.index() >= downstream.input_size() {
        return Err(NetError::StructuralMismatch {
            position: unit.index(),
            reason: format!(
                "no weight column for output line {} in a layer reading {} inputs",
                unit.index(),
                downstream.input_size()
            ),
        });
    }
    Ok(downstream
        .perceptrons()
        .iter()
        .zip(downstream_deltas.iter())
        .map(|(pcpt, &delta)| delta * pcpt.weights()[unit.index()])
        .sum())
}

/// [`hidden_error`] for every unit of `layer`, in unit order.
pub fn hidden_layer_errors(
    layer: &Layer,
    downstream: &Layer,
    downstream_deltas: &[f64],
) -> Result<Vec<f64>, NetError> {
    layer
        .perceptrons()
        .iter()
        .map(|unit| hidden_error(unit, downstream, downstream_deltas))
        .collect()
}

/// One online training step: forward pass, backward error propagation, then
/// an in-place weight update, returning the pre-update output vector for the
/// caller's accuracy bookkeeping.
///
/// The step runs in two phases. The backward phase computes every layer's
/// deltas against the current weights, output layer first, reading the
/// forward trace; the update phase then walks the layers applying each one's
/// delta with the input it actually saw. Nothing is written until the whole
/// backward phase has succeeded, so a failed call leaves the network exactly
/// as it was.
pub fn train_instance(
    network: &mut Network,
    instance: &Instance,
    learning_rate: f64,
    targets: &[f64],
) -> Result<Vec<f64>, NetError> {
    if targets.len() != network.output_size() {
        return Err(NetError::LengthMismatch {
            expected: network.output_size(),
            actual: targets.len(),
        });
    }
    let trace = network.forward_trace(&instance.features)?;
    let output = trace.output().to_vec();
    if network.layers().is_empty() {
        return Ok(output);
    }

    let last = network.layers().len() - 1;
    let mut deltas = vec![Vec::new(); network.layers().len()];
    let errors = output_errors(&trace.layer_outputs()[last], targets)?;
    deltas[last] = layer_deltas(&trace.layer_outputs()[last], &errors)?;
    for position in (0..last).rev() {
        let errors = hidden_layer_errors(
            &network.layers()[position],
            &network.layers()[position + 1],
            &deltas[position + 1],
        )?;
        deltas[position] = layer_deltas(&trace.layer_outputs()[position], &errors)?;
    }

    for (position, layer) in network.layers_mut().iter_mut().enumerate() {
        layer.update(&trace.layer_inputs()[position], &deltas[position], learning_rate)?;
    }
    Ok(output)
}
