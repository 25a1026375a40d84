//! Synthetic glyph classification example for glyphnet.
//!
//! Architecture: 16 → 12 → 4, sigmoid units throughout
//! Encoding:     distributed (one output per class)
//! Data:         noisy 4×4 bitmaps of the letters C, I, L and T
//!
//! Run with:
//!   cargo run --example glyphs

use rand::Rng;

use glyphnet::{
    num_correct, train_rounds, Instance, LabelCodec, LabelEncoding, Network, TrainConfig,
};

// ---------------------------------------------------------------------------
// Synthetic data
// ---------------------------------------------------------------------------

/// 4×4 prototype bitmaps, one per class: C, I, L, T.
#[rustfmt::skip]
const PROTOTYPES: [[u8; 16]; 4] = [
    [1, 1, 1, 1,
     1, 0, 0, 0,
     1, 0, 0, 0,
     1, 1, 1, 1],
    [0, 1, 1, 0,
     0, 1, 1, 0,
     0, 1, 1, 0,
     0, 1, 1, 0],
    [1, 0, 0, 0,
     1, 0, 0, 0,
     1, 0, 0, 0,
     1, 1, 1, 1],
    [1, 1, 1, 1,
     0, 1, 1, 0,
     0, 1, 1, 0,
     0, 1, 1, 0],
];

/// One noisy rendering of a prototype: on-pixels near intensity 16,
/// off-pixels near 0, everything jittered and rescaled to [0, 1].
fn noisy_instance<R: Rng>(label: usize, rng: &mut R) -> Instance {
    let features = PROTOTYPES[label]
        .iter()
        .map(|&pixel| {
            let base: f64 = if pixel == 1 { 16.0 } else { 0.0 };
            let jitter = rng.gen_range(-2.0..2.0);
            ((base + jitter) / 16.0).clamp(0.0, 1.0)
        })
        .collect();
    Instance::new(label, features)
}

/// `per_class` noisy instances of every class, interleaved so the online
/// pass never sees one class for long stretches.
fn dataset<R: Rng>(per_class: usize, rng: &mut R) -> Vec<Instance> {
    let mut instances = Vec::with_capacity(per_class * PROTOTYPES.len());
    for _ in 0..per_class {
        for label in 0..PROTOTYPES.len() {
            instances.push(noisy_instance(label, rng));
        }
    }
    instances
}

fn main() {
    let mut rng = rand::thread_rng();
    let train = dataset(40, &mut rng);
    let validation = dataset(10, &mut rng);
    let test = dataset(10, &mut rng);

    let codec = LabelCodec::new(LabelEncoding::Distributed, PROTOTYPES.len());
    let mut network = Network::build(&[16, 12, codec.target_width()], 0.1).expect("network");

    let config = TrainConfig::new(30, 1.0).with_early_stopping(5);
    let stats = train_rounds(
        &mut network,
        &train,
        Some(validation.as_slice()),
        &codec,
        &config,
    )
    .expect("training");

    for round in &stats {
        println!(
            "Round {}/{}: train {:.3}, validation {:.3}",
            round.round,
            round.total_rounds,
            round.train_accuracy,
            round.val_accuracy.unwrap_or(0.0)
        );
    }

    let correct = num_correct(&network, &test, &codec).expect("evaluation");
    println!("test: {correct} correct out of {}", test.len());
}
