/// Configuration for a `train_rounds` run.
///
/// # Fields
/// - `rounds`         — total number of full online passes over the training
///                      data
/// - `learning_rate`  — step size applied to every weight update
/// - `early_stopping` — optional stop rule; when set and a validation set is
///                      available, training halts once validation accuracy
///                      stops improving (see [`EarlyStopping`])
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub rounds: usize,
    pub learning_rate: f64,
    pub early_stopping: Option<EarlyStopping>,
}

impl TrainConfig {
    /// Creates a `TrainConfig` that always runs the full number of rounds.
    pub fn new(rounds: usize, learning_rate: f64) -> Self {
        TrainConfig {
            rounds,
            learning_rate,
            early_stopping: None,
        }
    }

    pub fn with_early_stopping(mut self, patience: usize) -> Self {
        self.early_stopping = Some(EarlyStopping { patience });
        self
    }
}

/// Stop once validation accuracy has gone `patience` consecutive rounds
/// without setting a new best. Ignored when no validation set is supplied.
#[derive(Debug, Clone, Copy)]
pub struct EarlyStopping {
    pub patience: usize,
}
