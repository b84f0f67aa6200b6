//! Blackboard domain model.
//!
//! A blackboard is a draft plus a bounded, newest-first history stack. The
//! `view_index` cursor selects which of them is displayed and edited:
//! `0` is the draft, `k >= 1` is `history[k - 1]`.

use serde::{Deserialize, Serialize};

use super::outcome::{StackAction, StackOutcome};

/// Maximum number of entries kept in a blackboard history.
pub const HISTORY_CAPACITY: usize = 10;

/// The state of a single blackboard context.
///
/// Field names match the persisted and wire representation
/// (`{current_draft, history, view_index}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlackboardState {
    /// Free text being edited at the top of the stack.
    #[serde(default)]
    pub current_draft: String,
    /// Previously pushed entries, newest first.
    #[serde(default)]
    pub history: Vec<String>,
    /// 0 = draft, k = history[k - 1].
    #[serde(default)]
    pub view_index: usize,
}

impl BlackboardState {
    /// Creates an empty blackboard viewing its draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a blackboard from a draft and history, landing on the most
    /// recent history entry when there is one.
    pub fn restored(current_draft: String, history: Vec<String>) -> Self {
        let view_index = if history.is_empty() { 0 } else { 1 };
        Self {
            current_draft,
            history,
            view_index,
        }
        .normalized()
    }

    /// Returns the state with history truncated to capacity and the cursor
    /// clamped into `0..=history.len()`.
    pub fn normalized(mut self) -> Self {
        self.history.truncate(HISTORY_CAPACITY);
        self.view_index = self.view_index.min(self.history.len());
        self
    }

    /// Whether the cursor is on the draft.
    pub fn is_viewing_draft(&self) -> bool {
        self.view_index == 0
    }

    /// The text in the currently viewed slot.
    ///
    /// Returns an empty string if the cursor points past the history.
    pub fn display_content(&self) -> &str {
        match self.view_index {
            0 => &self.current_draft,
            k => self.history.get(k - 1).map(String::as_str).unwrap_or(""),
        }
    }

    /// Overwrites the currently viewed slot.
    ///
    /// At the draft this replaces the draft; inside the history it edits that
    /// entry in place and leaves the draft alone.
    pub fn update_content(&mut self, text: impl Into<String>) {
        let text = text.into();
        match self.view_index {
            0 => self.current_draft = text,
            k => {
                if let Some(slot) = self.history.get_mut(k - 1) {
                    *slot = text;
                }
            }
        }
    }

    /// `"<len>"` at the draft, `"<view_index>/<len>"` inside the history.
    pub fn stack_status(&self) -> String {
        if self.is_viewing_draft() {
            self.history.len().to_string()
        } else {
            format!("{}/{}", self.view_index, self.history.len())
        }
    }

    /// Steps toward the draft, or pushes the draft onto the history.
    ///
    /// A blank draft is rejected with [`StackAction::Ignore`] and nothing
    /// changes. Pushing past [`HISTORY_CAPACITY`] drops the oldest entry.
    pub fn push(&mut self) -> StackOutcome {
        if self.view_index > 0 {
            self.view_index -= 1;
            return StackOutcome::nav(self.display_content());
        }

        if self.current_draft.trim().is_empty() {
            return StackOutcome::new(StackAction::Ignore, Some(self.current_draft.clone()));
        }

        let draft = std::mem::take(&mut self.current_draft);
        self.history.insert(0, draft);
        self.history.truncate(HISTORY_CAPACITY);
        StackOutcome::new(StackAction::New, Some(String::new()))
    }

    /// Steps one entry deeper into the history.
    ///
    /// At the oldest entry this is a no-op reported as [`StackAction::Stop`].
    pub fn pull(&mut self) -> StackOutcome {
        match self.history.get(self.view_index) {
            Some(entry) => {
                let content = entry.clone();
                self.view_index += 1;
                StackOutcome::nav(content)
            }
            None => StackOutcome::stop(),
        }
    }

    /// Resets the blackboard to an empty draft with no history.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
