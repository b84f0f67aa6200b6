//! User domain module.
//!
//! This module contains the login session persisted next to the blackboards.
//!
//! # Usage
//!
//! ```ignore
//! use blackboard_core::user::UserSession;
//! ```

mod model;

// Re-export public API
pub use model::UserSession;
