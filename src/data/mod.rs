pub mod instance;
pub mod loader;

pub use instance::Instance;
pub use loader::{load_file, load_instances, DataError};
