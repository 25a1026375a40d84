pub mod layer;
pub mod network;
pub mod perceptron;
pub mod trace;

pub use layer::Layer;
pub use network::Network;
pub use perceptron::{update_weight, Perceptron};
pub use trace::ForwardTrace;
