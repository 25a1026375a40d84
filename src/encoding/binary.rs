//! Binary label encoding: one output line per bit of the label.
//!
//! Little-endian: position `i` carries bit `i`, so the first output is the
//! least significant bit. The choice is arbitrary but both sides of the codec
//! depend on it.

/// Target vector of `bits` entries: 0.95 where the label has a one-bit, 0.05
/// where it has a zero-bit. Bits of `label` beyond `bits` are not
/// represented; callers size the width from the class count.
pub fn encode(label: usize, bits: usize) -> Vec<f64> {
    (0..bits)
        .map(|i| if (label >> i) & 1 == 1 { 0.95 } else { 0.05 })
        .collect()
}

/// Predicted label: the sum of `2^i` over positions whose output is at least
/// 0.5.
pub fn decode(output: &[f64]) -> usize {
    output
        .iter()
        .enumerate()
        .filter(|(_, &value)| value >= 0.5)
        .map(|(i, _)| 1usize << i)
        .sum()
}
