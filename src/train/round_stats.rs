use serde::{Deserialize, Serialize};

/// Per-round training statistics emitted by `train_rounds`.
///
/// One value is produced at the end of every completed round (a full online
/// pass over the training set); `--stats-out` serializes the collected list
/// so runs can be compared offline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundStats {
    /// 1-based round number.
    pub round: usize,
    /// Total rounds requested for this run.
    pub total_rounds: usize,
    /// Training accuracy as a fraction in [0, 1], counted against each
    /// instance's pre-update output.
    pub train_accuracy: f64,
    /// Validation accuracy as a fraction in [0, 1], if a validation set was
    /// provided.
    pub val_accuracy: Option<f64>,
    /// Wall-clock duration of this single round in milliseconds.
    pub elapsed_ms: u64,
}
