pub mod data;
pub mod encoding;
pub mod error;
pub mod math;
pub mod network;
pub mod train;

// Convenience re-exports
pub use data::instance::Instance;
pub use encoding::{LabelCodec, LabelEncoding};
pub use error::NetError;
pub use network::layer::Layer;
pub use network::network::Network;
pub use network::perceptron::Perceptron;
pub use network::trace::ForwardTrace;
pub use train::backprop::train_instance;
pub use train::round_stats::RoundStats;
pub use train::train_config::{EarlyStopping, TrainConfig};
pub use train::trainer::{num_correct, train_rounds};
