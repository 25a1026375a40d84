pub mod ops;

pub use ops::{dot, sigmoid};
