//! Results of stack navigation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a push or pull did to the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackAction {
    /// The draft was pushed onto the history.
    New,
    /// The cursor moved.
    Nav,
    /// A blank draft push was rejected.
    Ignore,
    /// A pull hit the oldest entry.
    Stop,
}

impl StackAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            StackAction::New => "new",
            StackAction::Nav => "nav",
            StackAction::Ignore => "ignore",
            StackAction::Stop => "stop",
        }
    }

    /// Whether the front end should flash a rejection indicator.
    pub fn is_rejected(&self) -> bool {
        matches!(self, StackAction::Ignore | StackAction::Stop)
    }
}

impl fmt::Display for StackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The action taken plus the content the front end should now display.
///
/// `content` is `None` only for [`StackAction::Stop`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackOutcome {
    pub action: StackAction,
    pub content: Option<String>,
}

impl StackOutcome {
    pub fn new(action: StackAction, content: Option<String>) -> Self {
        Self { action, content }
    }

    pub fn nav(content: impl Into<String>) -> Self {
        Self::new(StackAction::Nav, Some(content.into()))
    }

    pub fn stop() -> Self {
        Self::new(StackAction::Stop, None)
    }
}
