use std::time::Instant;

use tracing::{debug, info};

use crate::data::Instance;
use crate::encoding::LabelCodec;
use crate::error::NetError;
use crate::network::Network;
use crate::train::backprop::train_instance;
use crate::train::round_stats::RoundStats;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` for up to `config.rounds` rounds and returns the stats of
/// every completed round.
///
/// # Arguments
/// - `network`    — mutable reference to the network; updated in place
/// - `train`      — training instances, visited in order once per round
/// - `validation` — optional held-out instances scored after every round
/// - `codec`      — label codec shared by target encoding and decoding
/// - `config`     — rounds, learning rate, optional early stopping
///
/// Training accuracy counts an instance as a hit when decoding its
/// *pre-update* output matches its label, i.e. the network is scored on the
/// same output the online update was computed from.
///
/// # Early termination
/// With `config.early_stopping` set and a non-empty validation set, the loop
/// stops once `patience` consecutive rounds fail to beat the best validation
/// accuracy seen so far. Without a validation set the rule is ignored.
pub fn train_rounds(
    network: &mut Network,
    train: &[Instance],
    validation: Option<&[Instance]>,
    codec: &LabelCodec,
    config: &TrainConfig,
) -> Result<Vec<RoundStats>, NetError> {
    let mut history = Vec::with_capacity(config.rounds);
    let mut best_val = f64::NEG_INFINITY;
    let mut rounds_since_best = 0usize;

    for round in 1..=config.rounds {
        let t_start = Instant::now();

        // ── One full online pass over the training data ─────────────────────
        let mut hits = 0usize;
        for instance in train {
            let targets = codec.encode(instance.label);
            let output = train_instance(network, instance, config.learning_rate, &targets)?;
            if codec.decode(&output) == instance.label {
                hits += 1;
            }
        }
        let train_accuracy = if train.is_empty() {
            0.0
        } else {
            hits as f64 / train.len() as f64
        };

        // ── Validation ──────────────────────────────────────────────────────
        let val_accuracy = match validation {
            Some(instances) if !instances.is_empty() => {
                Some(num_correct(network, instances, codec)? as f64 / instances.len() as f64)
            }
            _ => None,
        };

        let elapsed_ms = t_start.elapsed().as_millis() as u64;
        info!(
            round,
            total_rounds = config.rounds,
            train_accuracy,
            val_accuracy = ?val_accuracy,
            elapsed_ms,
            "round complete"
        );

        history.push(RoundStats {
            round,
            total_rounds: config.rounds,
            train_accuracy,
            val_accuracy,
            elapsed_ms,
        });

        // ── Early stopping ──────────────────────────────────────────────────
        if let (Some(stopping), Some(accuracy)) = (config.early_stopping, val_accuracy) {
            if accuracy > best_val {
                best_val = accuracy;
                rounds_since_best = 0;
            } else {
                rounds_since_best += 1;
                if rounds_since_best >= stopping.patience {
                    debug!(
                        round,
                        patience = stopping.patience,
                        best_val,
                        "validation accuracy stopped improving"
                    );
                    break;
                }
            }
        }
    }

    Ok(history)
}

/// Number of instances whose decoded network output matches their label.
pub fn num_correct(
    network: &Network,
    instances: &[Instance],
    codec: &LabelCodec,
) -> Result<usize, NetError> {
    let mut correct = 0;
    for instance in instances {
        let output = network.feed_forward(&instance.features)?;
        if codec.decode(&output) == instance.label {
            correct += 1;
        }
    }
    Ok(correct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::LabelEncoding;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn toy_instances() -> Vec<Instance> {
        vec![
            Instance::new(0, vec![1.0, 0.0]),
            Instance::new(0, vec![0.9, 0.1]),
            Instance::new(1, vec![0.0, 1.0]),
            Instance::new(1, vec![0.1, 0.9]),
        ]
    }

    #[test]
    fn one_stats_entry_per_round() {
        let instances = toy_instances();
        let codec = LabelCodec::new(LabelEncoding::Distributed, 2);
        let mut rng = StdRng::seed_from_u64(21);
        let mut net = Network::build_with_rng(&[2, 3, 2], 0.5, &mut rng).unwrap();
        let stats =
            train_rounds(&mut net, &instances, None, &codec, &TrainConfig::new(3, 1.0)).unwrap();
        assert_eq!(stats.len(), 3);
        for (position, round_stats) in stats.iter().enumerate() {
            assert_eq!(round_stats.round, position + 1);
            assert_eq!(round_stats.total_rounds, 3);
            assert!((0.0..=1.0).contains(&round_stats.train_accuracy));
            assert_eq!(round_stats.val_accuracy, None);
        }
    }

    #[test]
    fn learns_a_separable_toy_set() {
        let instances = toy_instances();
        let codec = LabelCodec::new(LabelEncoding::Distributed, 2);
        let learned = (0..5).any(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut net = Network::build_with_rng(&[2, 3, 2], 0.5, &mut rng).unwrap();
            let config = TrainConfig::new(300, 1.0);
            train_rounds(&mut net, &instances, None, &codec, &config).unwrap();
            num_correct(&net, &instances, &codec).unwrap() == instances.len()
        });
        assert!(learned, "no seed reached 4/4 on a separable set");
    }

    #[test]
    fn early_stopping_halts_when_validation_plateaus() {
        let instances = toy_instances();
        let codec = LabelCodec::new(LabelEncoding::Distributed, 2);
        let mut rng = StdRng::seed_from_u64(22);
        let mut net = Network::build_with_rng(&[2, 3, 2], 0.5, &mut rng).unwrap();
        // Learning rate 0 freezes the weights, so validation accuracy can
        // never beat round 1.
        let config = TrainConfig::new(10, 0.0).with_early_stopping(1);
        let stats =
            train_rounds(&mut net, &instances, Some(instances.as_slice()), &codec, &config)
                .unwrap();
        assert_eq!(stats.len(), 2);
        assert!(stats.iter().all(|s| s.val_accuracy.is_some()));
    }

    #[test]
    fn early_stopping_is_ignored_without_validation() {
        let instances = toy_instances();
        let codec = LabelCodec::new(LabelEncoding::Distributed, 2);
        let mut rng = StdRng::seed_from_u64(23);
        let mut net = Network::build_with_rng(&[2, 3, 2], 0.5, &mut rng).unwrap();
        let config = TrainConfig::new(4, 0.0).with_early_stopping(1);
        let stats = train_rounds(&mut net, &instances, None, &codec, &config).unwrap();
        assert_eq!(stats.len(), 4);
    }

    #[test]
    fn num_correct_counts_decoded_matches() {
        // A zero-layer network passes features straight through, so the
        // arg-max of the features is the prediction.
        let mut rng = StdRng::seed_from_u64(24);
        let net = Network::build_with_rng(&[2, 2], 0.5, &mut rng).unwrap();
        let codec = LabelCodec::new(LabelEncoding::Distributed, 2);
        let instances = vec![
            Instance::new(0, vec![0.9, 0.1]),
            Instance::new(1, vec![0.2, 0.8]),
            Instance::new(1, vec![0.8, 0.2]),
        ];
        assert_eq!(num_correct(&net, &instances, &codec), Ok(2));
    }
}
