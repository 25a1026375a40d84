//! Distributed (one-high) label encoding: one output line per class.

/// Target vector of `classes` entries, 0.95 at the label's index and 0.05
/// everywhere else.
///
/// # Panics
/// Panics if `label` is not below `classes`; callers validate their datasets
/// against the class count before encoding.
pub fn encode(label: usize, classes: usize) -> Vec<f64> {
    assert!(label < classes, "label {label} outside 0..{classes}");
    let mut targets = vec![0.05; classes];
    targets[label] = 0.95;
    targets
}

/// Predicted label: the index of the strongest output.
pub fn decode(output: &[f64]) -> usize {
    argmax(output)
}

/// Index of the maximum element in a slice.
fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}
