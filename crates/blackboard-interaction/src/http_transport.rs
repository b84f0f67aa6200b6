//! HttpSyncTransport - JSON-over-HTTP transport for the blackboard backend.
//!
//! Posts request bodies to `<api_base><endpoint>` and decodes the JSON reply.
//! Configuration priority: config.toml `[remote]` > environment variables

use async_trait::async_trait;
use blackboard_core::config::RemoteConfig;
use blackboard_core::error::{BlackboardError, Result};
use blackboard_core::sync::{Endpoint, SyncTransport};
use reqwest::Client;
use serde_json::Value;
use std::env;
use std::time::Duration;

/// Transport that talks to the auth/sync endpoints over HTTP.
#[derive(Clone)]
pub struct HttpSyncTransport {
    client: Client,
    api_base: String,
    timeout: Duration,
}

impl HttpSyncTransport {
    /// Creates a transport for the given base URL.
    ///
    /// A trailing slash is added when missing so endpoint paths append
    /// cleanly.
    pub fn new(api_base: impl Into<String>, timeout: Duration) -> Self {
        let mut api_base = api_base.into();
        if !api_base.ends_with('/') {
            api_base.push('/');
        }
        Self {
            client: Client::new(),
            api_base,
            timeout,
        }
    }

    /// Builds a transport from `[remote]`, or from `BLACKBOARD_API_BASE` when
    /// the config names no base URL.
    ///
    /// Returns `None` when neither is set.
    pub fn from_config(config: &RemoteConfig) -> Option<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);

        if let Some(api_base) = config.api_base.as_deref().filter(|s| !s.trim().is_empty()) {
            tracing::debug!("[HttpSyncTransport] Using api_base from config: {}", api_base);
            return Some(Self::new(api_base, timeout));
        }

        match env::var("BLACKBOARD_API_BASE") {
            Ok(api_base) if !api_base.trim().is_empty() => {
                tracing::debug!("[HttpSyncTransport] Using BLACKBOARD_API_BASE: {}", api_base);
                Some(Self::new(api_base, timeout))
            }
            _ => {
                tracing::debug!("[HttpSyncTransport] No api_base configured");
                None
            }
        }
    }

    /// Full URL for `endpoint`.
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.api_base, endpoint.path())
    }
}

#[async_trait]
impl SyncTransport for HttpSyncTransport {
    async fn post(&self, endpoint: Endpoint, payload: Value) -> Result<Value> {
        let url = self.url(endpoint);

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| BlackboardError::transport(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!("[HttpSyncTransport] {} returned {}: {}", url, status, error_text);
            return Err(BlackboardError::transport(format!(
                "{} returned {}",
                url, status
            )));
        }

        response.json::<Value>().await.map_err(|e| {
            BlackboardError::transport(format!("Invalid JSON from {}: {}", url, e))
        })
    }
}
