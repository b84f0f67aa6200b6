//! Remote transports for blackboard sync.
//!
//! Holds the HTTP implementation of [`blackboard_core::sync::SyncTransport`]
//! used to reach the auth and sync endpoints.

pub mod http_transport;

pub use http_transport::HttpSyncTransport;
