//! UserSession domain model.
//!
//! Represents who is logged in against the remote store, if anyone.

use serde::{Deserialize, Serialize};

/// Login session for remote sync.
///
/// Serialized as `{username, level, isLoggedIn}`. A guest has no username
/// and level 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub level: i64,
    #[serde(rename = "isLoggedIn", default)]
    pub is_logged_in: bool,
}

impl UserSession {
    /// A logged-out session.
    pub fn guest() -> Self {
        Self {
            username: None,
            level: 0,
            is_logged_in: false,
        }
    }

    /// A session for a user the remote store has just authenticated.
    pub fn logged_in(username: impl Into<String>, level: i64) -> Self {
        Self {
            username: Some(username.into()),
            level,
            is_logged_in: true,
        }
    }

    /// The username to act as, if the session is authenticated.
    pub fn active_username(&self) -> Option<&str> {
        if self.is_logged_in {
            self.username.as_deref()
        } else {
            None
        }
    }
}

impl Default for UserSession {
    fn default() -> Self {
        Self::guest()
    }
}
