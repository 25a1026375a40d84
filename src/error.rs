use thiserror::Error;

/// Errors surfaced by network construction and the forward/backward engines.
///
/// Every variant is detected eagerly — at construction or at call time — and
/// reported to the immediate caller. A failed operation never leaves a
/// network partially updated: the weight-update phase of a training step only
/// starts once the whole backward phase has succeeded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetError {
    /// An operation received a vector whose length disagrees with the width
    /// it expected.
    #[error("length mismatch: expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A perceptron does not fit the layer position it occupies: wrong weight
    /// count for the layer's input width, or a stored index that disagrees
    /// with its structural position.
    #[error("structural mismatch at position {position}: {reason}")]
    StructuralMismatch { position: usize, reason: String },

    /// Adjacent layers (or the network's declared input width and its first
    /// layer) disagree about how many values flow between them.
    #[error("layer chain mismatch at layer {layer}: expects {expected} inputs, receives {actual}")]
    LayerChainMismatch {
        layer: usize,
        expected: usize,
        actual: usize,
    },

    /// A width list or weight scale that cannot describe a network.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
