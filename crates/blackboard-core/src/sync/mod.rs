//! Remote synchronization module.
//!
//! This module provides the transport trait the store talks to the backend
//! through, and the request/response types carried over it.
//!
//! # Module Structure
//!
//! - `wire`: JSON request and response payloads
//!
//! # Usage
//!
//! ```ignore
//! use blackboard_core::sync::{SyncTransport, Endpoint, SyncRequest, RemoteResponse};
//! ```

mod wire;

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

use crate::error::{BlackboardError, Result};

pub use wire::{
    CONNECTION_ERROR, NOT_LOGGED_IN, RemoteResponse, RemoteSnapshot, SlotData, SyncRequest,
    SyncResult,
};

/// Backend endpoints, relative to the configured API base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Liveness, registration and login.
    Auth,
    /// Commit and checkout of blackboard slots.
    Sync,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Auth => "auth.php",
            Endpoint::Sync => "sync.php",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Transport for JSON POST requests to the backend.
///
/// Implementations report network failures, non-success HTTP statuses and
/// undecodable bodies as `Err`. The store turns every such error into a
/// `Connection Error` result, so nothing raised here reaches the front end.
#[async_trait]
pub trait SyncTransport: Send + Sync {
    /// Posts `payload` to `endpoint` and returns the decoded JSON response.
    async fn post(&self, endpoint: Endpoint, payload: Value) -> Result<Value>;
}

/// A transport for when no backend is configured. Every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineTransport;

#[async_trait]
impl SyncTransport for OfflineTransport {
    async fn post(&self, endpoint: Endpoint, _payload: Value) -> Result<Value> {
        Err(BlackboardError::transport(format!(
            "no remote configured for {}",
            endpoint
        )))
    }
}
