/// Record of one forward pass: the vector each layer consumed and the vector
/// it produced, in layer order.
///
/// Training needs both sides. Deltas are computed from the outputs, and each
/// layer's weight step multiplies its delta by the inputs the layer actually
/// saw, so the trace pins those down once instead of re-running the network.
#[derive(Debug, Clone)]
pub struct ForwardTrace {
    input: Vec<f64>,
    layer_inputs: Vec<Vec<f64>>,
    layer_outputs: Vec<Vec<f64>>,
}

impl ForwardTrace {
    pub(crate) fn new(
        input: Vec<f64>,
        layer_inputs: Vec<Vec<f64>>,
        layer_outputs: Vec<Vec<f64>>,
    ) -> ForwardTrace {
        ForwardTrace {
            input,
            layer_inputs,
            layer_outputs,
        }
    }

    /// Input vector each layer consumed, by layer position.
    pub fn layer_inputs(&self) -> &[Vec<f64>] {
        &self.layer_inputs
    }

    /// Output vector each layer produced, by layer position.
    pub fn layer_outputs(&self) -> &[Vec<f64>] {
        &self.layer_outputs
    }

    /// The network's final output. With no layers this is the original input,
    /// untouched.
    pub fn output(&self) -> &[f64] {
        self.layer_outputs.last().unwrap_or(&self.input)
    }
}
