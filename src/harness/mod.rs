mod directory;
pub use directory::*;

mod partition;
pub use partition::{ExecutionStrategy, FOREIGN_RESULTS_DIR, NATIVE_RESULTS_DIR};

pub mod registry;
pub mod suite;
