//! JSON payloads exchanged with the remote auth and sync endpoints.

use serde::{Deserialize, Deserializer, Serialize};

use super::Endpoint;

/// Message returned when a remote operation is attempted without a session.
pub const NOT_LOGGED_IN: &str = "Not logged in";

/// Message returned for any transport-level failure.
pub const CONNECTION_ERROR: &str = "Connection Error";

/// The draft and history of one context as sent by `commit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotData {
    pub current_draft: String,
    pub history: Vec<String>,
}

/// A request body. The variant name becomes the `action` field.
#[derive(Clone, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum SyncRequest {
    Ping,
    Register {
        username: String,
        password: String,
    },
    Login {
        username: String,
        password: String,
    },
    Commit {
        username: String,
        slot_type: String,
        data: SlotData,
    },
    Checkout {
        username: String,
        slot_type: String,
    },
}

impl SyncRequest {
    /// The endpoint that serves this action.
    pub fn endpoint(&self) -> Endpoint {
        match self {
            SyncRequest::Ping | SyncRequest::Register { .. } | SyncRequest::Login { .. } => {
                Endpoint::Auth
            }
            SyncRequest::Commit { .. } | SyncRequest::Checkout { .. } => Endpoint::Sync,
        }
    }

    /// The `action` tag, for logging without leaking credentials.
    pub fn action(&self) -> &'static str {
        match self {
            SyncRequest::Ping => "ping",
            SyncRequest::Register { .. } => "register",
            SyncRequest::Login { .. } => "login",
            SyncRequest::Commit { .. } => "commit",
            SyncRequest::Checkout { .. } => "checkout",
        }
    }
}

/// Snapshot returned by a successful checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSnapshot {
    #[serde(default)]
    pub current_draft: String,
    #[serde(default)]
    pub history: Vec<String>,
    #[serde(default)]
    pub view_index: usize,
}

/// A response body from either endpoint.
///
/// Every endpoint answers with `success` and usually `message`; login and
/// register add `level`, checkout adds `data`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_level",
        skip_serializing_if = "Option::is_none"
    )]
    pub level: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<RemoteSnapshot>,
}

impl RemoteResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn connection_error() -> Self {
        Self::failure(CONNECTION_ERROR)
    }

    pub fn not_logged_in() -> Self {
        Self::failure(NOT_LOGGED_IN)
    }

    pub fn with_level(mut self, level: i64) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_data(mut self, data: RemoteSnapshot) -> Self {
        self.data = Some(data);
        self
    }
}

/// Accepts `level` as a JSON number or a numeric string; database drivers on
/// the server side hand integer columns back either way.
fn deserialize_level<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Level {
        Number(i64),
        Text(String),
    }

    Ok(match Option::<Level>::deserialize(deserializer)? {
        Some(Level::Number(n)) => Some(n),
        Some(Level::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

/// Outcome of `commit` or `checkout` as seen by the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Display content after a successful checkout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl SyncResult {
    pub fn not_logged_in() -> Self {
        RemoteResponse::not_logged_in().into()
    }

    pub fn connection_error() -> Self {
        RemoteResponse::connection_error().into()
    }

    pub fn checked_out(content: impl Into<String>) -> Self {
        Self {
            success: true,
            message: None,
            content: Some(content.into()),
        }
    }
}

impl From<RemoteResponse> for SyncResult {
    fn from(response: RemoteResponse) -> Self {
        Self {
            success: response.success,
            message: response.message,
            content: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_action_tags() {
        let commit = SyncRequest::Commit {
            username: "ada".to_string(),
            slot_type: "todo".to_string(),
            data: SlotData {
                current_draft: "d".to_string(),
                history: vec!["h0".to_string(), "h1".to_string()],
            },
        };
        assert_eq!(
            serde_json::to_value(&commit).unwrap(),
            json!({
                "action": "commit",
                "username": "ada",
                "slot_type": "todo",
                "data": {"current_draft": "d", "history": ["h0", "h1"]}
            })
        );
        assert_eq!(commit.endpoint(), Endpoint::Sync);

        let ping = SyncRequest::Ping;
        assert_eq!(serde_json::to_value(&ping).unwrap(), json!({"action": "ping"}));
        assert_eq!(ping.endpoint(), Endpoint::Auth);
    }

    #[test]
    fn test_response_level_accepts_string_or_number() {
        let r: RemoteResponse =
            serde_json::from_value(json!({"success": true, "message": "ok", "level": "4"}))
                .unwrap();
        assert_eq!(r.level, Some(4));

        let r: RemoteResponse =
            serde_json::from_value(json!({"success": true, "level": 2})).unwrap();
        assert_eq!(r.level, Some(2));

        let r: RemoteResponse = serde_json::from_value(json!({"success": false})).unwrap();
        assert_eq!(r.level, None);
        assert!(r.message.is_none());
    }

    #[test]
    fn test_checkout_response_data() {
        let r: RemoteResponse = serde_json::from_value(json!({
            "success": true,
            "data": {"current_draft": "A", "history": ["B", "C"], "view_index": 0}
        }))
        .unwrap();
        let data = r.data.unwrap();
        assert_eq!(data.current_draft, "A");
        assert_eq!(data.history, vec!["B", "C"]);
    }

    #[test]
    fn test_sync_result_from_response_is_verbatim() {
        let result: SyncResult = RemoteResponse::failure("There have no commitment").into();
        assert!(!result.success);
        assert_eq!(result.message.as_deref(), Some("There have no commitment"));
        assert!(result.content.is_none());
    }
}
