pub mod backprop;
pub mod round_stats;
pub mod train_config;
pub mod trainer;

pub use backprop::{
    delta, hidden_error, hidden_layer_errors, layer_deltas, output_error, output_errors,
    train_instance,
};
pub use round_stats::RoundStats;
pub use train_config::{EarlyStopping, TrainConfig};
pub use trainer::{num_correct, train_rounds};
