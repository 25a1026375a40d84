use rand::Rng;

use crate::error::NetError;
use crate::network::layer::Layer;
use crate::network::trace::ForwardTrace;

/// A fully-connected feed-forward network: an ordered chain of layers whose
/// widths line up, plus the declared width of the input vector.
///
/// A network with zero layers is legal and acts as an identity pass-through
/// (input layer = output layer, no units).
#[derive(Debug, Clone)]
pub struct Network {
    inputs: usize,
    layers: Vec<Layer>,
}

impl Network {
    /// Chains `layers` behind an input vector of width `inputs`, verifying
    /// that every layer's input width matches the width feeding it.
    pub fn new(inputs: usize, layers: Vec<Layer>) -> Result<Network, NetError> {
        let mut feeding = inputs;
        for (position, layer) in layers.iter().enumerate() {
            if layer.input_size() != feeding {
                return Err(NetError::LayerChainMismatch {
                    layer: position,
                    expected: layer.input_size(),
                    actual: feeding,
                });
            }
            feeding = layer.output_size();
        }
        Ok(Network { inputs, layers })
    }

    /// Builds a randomly initialised network from a width list
    /// `[inputs, hidden_1, .., hidden_k, outputs]`, drawing every weight and
    /// bias uniformly from `(-scale, scale)`.
    ///
    /// A two-element width list yields the zero-layer network; callers that
    /// need a trainable classifier must pass at least three widths.
    pub fn build(widths: &[usize], scale: f64) -> Result<Network, NetError> {
        Network::build_with_rng(widths, scale, &mut rand::thread_rng())
    }

    /// Same as [`Network::build`] but drawing from a caller-supplied source,
    /// so initialisation can be made reproducible.
    pub fn build_with_rng<R: Rng + ?Sized>(
        widths: &[usize],
        scale: f64,
        rng: &mut R,
    ) -> Result<Network, NetError> {
        if widths.len() < 2 {
            return Err(NetError::InvalidParameter(format!(
                "need an input and an output width, got {} widths",
                widths.len()
            )));
        }
        if let Some(position) = widths.iter().position(|&w| w == 0) {
            return Err(NetError::InvalidParameter(format!(
                "layer width at position {position} is zero"
            )));
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(NetError::InvalidParameter(format!(
                "weight scale must be positive and finite, got {scale}"
            )));
        }
        let layers = if widths.len() == 2 {
            Vec::new()
        } else {
            widths
                .windows(2)
                .map(|pair| Layer::random(pair[0], pair[1], scale, rng))
                .collect()
        };
        Network::new(widths[0], layers)
    }

    /// Width of the input vector the network consumes.
    pub fn input_size(&self) -> usize {
        self.inputs
    }

    /// Width of the output vector, which is the input width when the network
    /// has no layers.
    pub fn output_size(&self) -> usize {
        self.layers
            .last()
            .map(Layer::output_size)
            .unwrap_or(self.inputs)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub(crate) fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    /// Runs `input` through every layer in order. Pure: calling this twice
    /// on the same network and input yields identical vectors.
    pub fn feed_forward(&self, input: &[f64]) -> Result<Vec<f64>, NetError> {
        if input.len() != self.inputs {
            return Err(NetError::LengthMismatch {
                expected: self.inputs,
                actual: input.len(),
            });
        }
        let mut current = input.to_vec();
        for layer in &self.layers {
            current = layer.evaluate(&current)?;
        }
        Ok(current)
    }

    /// Forward pass that records what every layer consumed and produced, for
    /// the backward pass to replay. Pure, like [`Network::feed_forward`].
    pub fn forward_trace(&self, input: &[f64]) -> Result<ForwardTrace, NetError> {
        if input.len() != self.inputs {
            return Err(NetError::LengthMismatch {
                expected: self.inputs,
                actual: input.len(),
            });
        }
        let mut layer_inputs = Vec::with_capacity(self.layers.len());
        let mut layer_outputs = Vec::with_capacity(self.layers.len());
        let mut current = input.to_vec();
        for layer in &self.layers {
            let output = layer.evaluate(&current)?;
            layer_inputs.push(current);
            layer_outputs.push(output.clone());
            current = output;
        }
        Ok(ForwardTrace::new(input.to_vec(), layer_inputs, layer_outputs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::perceptron::Perceptron;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rejects_first_layer_not_matching_input_width() {
        let layer = Layer::new(3, vec![Perceptron::new(vec![0.0; 3], 0.0, 0)]).unwrap();
        let err = Network::new(2, vec![layer]).unwrap_err();
        assert_eq!(
            err,
            NetError::LayerChainMismatch {
                layer: 0,
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn rejects_disagreeing_adjacent_widths() {
        let first = Layer::new(
            2,
            vec![
                Perceptron::new(vec![0.0; 2], 0.0, 0),
                Perceptron::new(vec![0.0; 2], 0.0, 1),
            ],
        )
        .unwrap();
        let second = Layer::new(3, vec![Perceptron::new(vec![0.0; 3], 0.0, 0)]).unwrap();
        let err = Network::new(2, vec![first, second]).unwrap_err();
        assert_eq!(
            err,
            NetError::LayerChainMismatch {
                layer: 1,
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn zero_layer_network_is_identity() {
        let mut rng = StdRng::seed_from_u64(1);
        let net = Network::build_with_rng(&[3, 3], 0.5, &mut rng).unwrap();
        assert!(net.layers().is_empty());
        assert_eq!(net.input_size(), 3);
        assert_eq!(net.output_size(), 3);
        let out = net.feed_forward(&[0.25, -1.0, 2.0]).unwrap();
        assert_eq!(out, vec![0.25, -1.0, 2.0]);
        let trace = net.forward_trace(&[0.25, -1.0, 2.0]).unwrap();
        assert_eq!(trace.output(), &[0.25, -1.0, 2.0]);
    }

    #[test]
    fn build_produces_requested_shape() {
        let mut rng = StdRng::seed_from_u64(2);
        let net = Network::build_with_rng(&[4, 3, 2], 0.5, &mut rng).unwrap();
        assert_eq!(net.input_size(), 4);
        assert_eq!(net.output_size(), 2);
        assert_eq!(net.layers().len(), 2);
        assert_eq!(net.layers()[0].input_size(), 4);
        assert_eq!(net.layers()[0].output_size(), 3);
        assert_eq!(net.layers()[1].input_size(), 3);
        assert_eq!(net.layers()[1].output_size(), 2);
        for layer in net.layers() {
            for pcpt in layer.perceptrons() {
                assert!(pcpt.weights().iter().all(|w| w.abs() < 0.5));
                assert!(pcpt.bias().abs() < 0.5);
            }
        }
    }

    #[test]
    fn build_is_reproducible_for_a_fixed_seed() {
        let mut first_rng = StdRng::seed_from_u64(42);
        let mut second_rng = StdRng::seed_from_u64(42);
        let first = Network::build_with_rng(&[3, 2, 1], 0.1, &mut first_rng).unwrap();
        let second = Network::build_with_rng(&[3, 2, 1], 0.1, &mut second_rng).unwrap();
        for (a, b) in first.layers().iter().zip(second.layers()) {
            for (pa, pb) in a.perceptrons().iter().zip(b.perceptrons()) {
                assert_eq!(pa.weights(), pb.weights());
                assert_eq!(pa.bias(), pb.bias());
            }
        }
    }

    #[test]
    fn build_rejects_bad_parameters() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(matches!(
            Network::build_with_rng(&[4], 0.5, &mut rng),
            Err(NetError::InvalidParameter(_))
        ));
        assert!(matches!(
            Network::build_with_rng(&[4, 0, 2], 0.5, &mut rng),
            Err(NetError::InvalidParameter(_))
        ));
        assert!(matches!(
            Network::build_with_rng(&[4, 3, 2], 0.0, &mut rng),
            Err(NetError::InvalidParameter(_))
        ));
        assert!(matches!(
            Network::build_with_rng(&[4, 3, 2], f64::NAN, &mut rng),
            Err(NetError::InvalidParameter(_))
        ));
    }

    #[test]
    fn forward_pass_through_a_hand_built_layer() {
        let layer = Layer::new(
            2,
            vec![
                Perceptron::new(vec![-1.0, 2.0], 0.0, 0),
                Perceptron::new(vec![-2.0, 4.0], 0.0, 1),
            ],
        )
        .unwrap();
        let net = Network::new(2, vec![layer]).unwrap();
        assert_eq!(net.feed_forward(&[0.5, 0.25]), Ok(vec![0.5, 0.5]));
    }

    #[test]
    fn feed_forward_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(4);
        let net = Network::build_with_rng(&[5, 4, 3], 0.3, &mut rng).unwrap();
        let input = [0.1, 0.2, 0.3, 0.4, 0.5];
        assert_eq!(net.feed_forward(&input), net.feed_forward(&input));
    }

    #[test]
    fn feed_forward_rejects_wrong_input_width() {
        let mut rng = StdRng::seed_from_u64(5);
        let net = Network::build_with_rng(&[3, 2, 1], 0.5, &mut rng).unwrap();
        assert_eq!(
            net.feed_forward(&[1.0, 2.0]),
            Err(NetError::LengthMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn trace_records_every_layer_boundary() {
        let mut rng = StdRng::seed_from_u64(6);
        let net = Network::build_with_rng(&[2, 3, 1], 0.5, &mut rng).unwrap();
        let trace = net.forward_trace(&[0.5, -0.5]).unwrap();
        assert_eq!(trace.layer_inputs().len(), 2);
        assert_eq!(trace.layer_outputs().len(), 2);
        assert_eq!(trace.layer_inputs()[0], vec![0.5, -0.5]);
        assert_eq!(trace.layer_inputs()[1], trace.layer_outputs()[0]);
        assert_eq!(trace.output(), &trace.layer_outputs()[1][..]);
    }
}
