pub mod blackboard;
pub mod config;
pub mod error;
pub mod storage;
pub mod sync;
pub mod user;

// Re-export common types
pub use blackboard::{BlackboardState, BlackboardStore, StackAction, StackOutcome};
pub use error::BlackboardError;
