//! Blackboard domain module.
//!
//! This module contains the per-context draft/history stack and the store
//! that persists and synchronizes it.
//!
//! # Module Structure
//!
//! - `model`: The stack state machine (`BlackboardState`)
//! - `outcome`: Push/pull results (`StackAction`, `StackOutcome`)
//! - `store`: Persistence and sync orchestration (`BlackboardStore`)
//!
//! # Usage
//!
//! ```ignore
//! use blackboard_core::blackboard::{BlackboardStore, BlackboardState, StackAction};
//! ```

mod model;
mod outcome;
mod store;

// Re-export public API
pub use model::{BlackboardState, HISTORY_CAPACITY};
pub use outcome::{StackAction, StackOutcome};
pub use store::BlackboardStore;
