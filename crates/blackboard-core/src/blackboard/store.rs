//! Blackboard store.
//!
//! Owns one [`BlackboardState`] per context plus the user session, persists
//! them through an injected [`KeyValueStore`] after every mutation, and talks
//! to the backend through an injected [`SyncTransport`].

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::blackboard::model::BlackboardState;
use crate::blackboard::outcome::{StackAction, StackOutcome};
use crate::config::{PRIMARY_CONTEXT, StorageConfig};
use crate::error::{BlackboardError, Result};
use crate::storage::KeyValueStore;
use crate::sync::{RemoteResponse, SlotData, SyncRequest, SyncResult, SyncTransport};
use crate::user::UserSession;

/// The blackboard store.
///
/// Construct one per process and hand it to the front end by reference. All
/// local operations are total: persistence failures are logged and the
/// in-memory state stays authoritative. Remote operations await exactly one
/// transport round trip and fold every transport failure into a
/// `Connection Error` result.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use blackboard_core::blackboard::{BlackboardStore, StackAction};
/// use blackboard_core::config::StorageConfig;
/// use blackboard_core::storage::InMemoryKeyValueStore;
/// use blackboard_core::sync::OfflineTransport;
///
/// let mut store = BlackboardStore::new(
///     StorageConfig::default(),
///     Arc::new(InMemoryKeyValueStore::new()),
///     Arc::new(OfflineTransport),
/// );
/// store.update_content("log", "remember the milk");
/// assert_eq!(store.push("log").action, StackAction::New);
/// assert_eq!(store.stack_status("log"), "1");
/// ```
pub struct BlackboardStore {
    config: StorageConfig,
    storage: Arc<dyn KeyValueStore>,
    transport: Arc<dyn SyncTransport>,
    session: UserSession,
    boards: BTreeMap<String, BlackboardState>,
}

impl BlackboardStore {
    /// Creates the store, loading the session and every configured context.
    pub fn new(
        config: StorageConfig,
        storage: Arc<dyn KeyValueStore>,
        transport: Arc<dyn SyncTransport>,
    ) -> Self {
        let session = read_json::<UserSession>(storage.as_ref(), &config.session_key())
            .unwrap_or_default();

        let mut store = Self {
            config,
            storage,
            transport,
            session,
            boards: BTreeMap::new(),
        };

        for context in store.config.contexts.clone() {
            store.board_mut(&context);
        }

        tracing::debug!(
            "[BlackboardStore] Loaded {} context(s), logged in: {}",
            store.boards.len(),
            store.session.is_logged_in
        );

        store
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    /// The current user session.
    pub fn session(&self) -> &UserSession {
        &self.session
    }

    /// Contexts loaded so far, in name order.
    pub fn contexts(&self) -> Vec<&str> {
        self.boards.keys().map(String::as_str).collect()
    }

    /// The state of `context`.
    ///
    /// Contexts not loaded yet are read from storage without being cached.
    pub fn state(&self, context: &str) -> Cow<'_, BlackboardState> {
        match self.boards.get(context) {
            Some(board) => Cow::Borrowed(board),
            None => Cow::Owned(self.peek_board(context)),
        }
    }

    // ============================================================================
    // Local blackboard operations
    // ============================================================================

    /// Text of the currently viewed slot of `context`.
    pub fn display_content(&self, context: &str) -> String {
        self.state(context).display_content().to_string()
    }

    /// Overwrites the currently viewed slot of `context`.
    pub fn update_content(&mut self, context: &str, text: impl Into<String>) -> bool {
        self.board_mut(context).update_content(text);
        self.persist_board(context);
        true
    }

    /// `"3"` at the draft, `"2/3"` inside the history.
    pub fn stack_status(&self, context: &str) -> String {
        self.state(context).stack_status()
    }

    /// Pushes the draft onto the history, or steps toward the draft.
    pub fn push(&mut self, context: &str) -> StackOutcome {
        let outcome = self.board_mut(context).push();
        tracing::debug!("[BlackboardStore] push({}) -> {}", context, outcome.action);
        if outcome.action != StackAction::Ignore {
            self.persist_board(context);
        }
        outcome
    }

    /// Steps one entry deeper into the history.
    pub fn pull(&mut self, context: &str) -> StackOutcome {
        let outcome = self.board_mut(context).pull();
        tracing::debug!("[BlackboardStore] pull({}) -> {}", context, outcome.action);
        if outcome.action != StackAction::Stop {
            self.persist_board(context);
        }
        outcome
    }

    /// Resets `context` to an empty draft with no history.
    pub fn clear(&mut self, context: &str) -> bool {
        self.board_mut(context).clear();
        self.persist_board(context);
        true
    }

    /// Clears every known context.
    pub fn clear_all(&mut self) -> bool {
        let contexts: Vec<String> = self.boards.keys().cloned().collect();
        for context in &contexts {
            self.clear(context);
        }
        tracing::info!("[BlackboardStore] Wiped {} context(s)", contexts.len());
        true
    }

    // ============================================================================
    // Authentication
    // ============================================================================

    /// Pings the auth endpoint.
    pub async fn check_connection(&self) -> bool {
        self.request(&SyncRequest::Ping).await.success
    }

    /// Creates an account. Does not log in.
    pub async fn register(&self, username: &str, password: &str) -> RemoteResponse {
        self.request(&SyncRequest::Register {
            username: username.to_string(),
            password: password.to_string(),
        })
        .await
    }

    /// Logs in and, on success, persists the new session.
    pub async fn login(&mut self, username: &str, password: &str) -> RemoteResponse {
        let response = self
            .request(&SyncRequest::Login {
                username: username.to_string(),
                password: password.to_string(),
            })
            .await;

        if response.success {
            let level = response.level.unwrap_or(1);
            self.session = UserSession::logged_in(username, level);
            self.persist_session();
            tracing::info!("[BlackboardStore] Logged in as {} (Lv{})", username, level);
        }

        response
    }

    /// Drops the session back to guest.
    pub fn logout(&mut self) {
        self.session = UserSession::guest();
        self.persist_session();
        tracing::info!("[BlackboardStore] Logged out");
    }

    // ============================================================================
    // Remote sync
    // ============================================================================

    /// Uploads the draft and history of `context`, replacing the remote copy.
    ///
    /// Local state is not touched.
    pub async fn commit(&self, context: &str) -> SyncResult {
        let Some(username) = self.session.active_username() else {
            return SyncResult::not_logged_in();
        };

        let data = {
            let board = self.state(context);
            SlotData {
                current_draft: board.current_draft.clone(),
                history: board.history.clone(),
            }
        };

        self.request(&SyncRequest::Commit {
            username: username.to_string(),
            slot_type: context.to_string(),
            data,
        })
        .await
        .into()
    }

    /// Replaces the local draft and history of `context` with the remote copy.
    ///
    /// On success the view lands on the newest history entry when there is
    /// one. On failure local state is left untouched.
    pub async fn checkout(&mut self, context: &str) -> SyncResult {
        let Some(username) = self.session.active_username() else {
            return SyncResult::not_logged_in();
        };

        let response = self
            .request(&SyncRequest::Checkout {
                username: username.to_string(),
                slot_type: context.to_string(),
            })
            .await;

        if !response.success {
            return response.into();
        }

        let Some(snapshot) = response.data else {
            tracing::warn!(
                "[BlackboardStore] checkout({}) succeeded without data",
                context
            );
            return SyncResult::connection_error();
        };

        let board = self.board_mut(context);
        *board = BlackboardState::restored(snapshot.current_draft, snapshot.history);
        let content = board.display_content().to_string();
        self.persist_board(context);

        tracing::info!(
            "[BlackboardStore] Checked out {} ({} history entries)",
            context,
            self.state(context).history.len()
        );

        SyncResult::checked_out(content)
    }

    // ============================================================================
    // Internals
    // ============================================================================

    /// Sends one request and normalizes every transport failure.
    async fn request(&self, request: &SyncRequest) -> RemoteResponse {
        let action = request.action();
        let payload = match serde_json::to_value(request) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!("[BlackboardStore] Failed to encode {}: {}", action, e);
                return RemoteResponse::connection_error();
            }
        };

        tracing::debug!("[BlackboardStore] -> {} ({})", action, request.endpoint());

        match self.transport.post(request.endpoint(), payload).await {
            Ok(body) => match serde_json::from_value::<RemoteResponse>(body) {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!("[BlackboardStore] Malformed {} response: {}", action, e);
                    RemoteResponse::connection_error()
                }
            },
            Err(e) => {
                tracing::warn!("[BlackboardStore] {} failed: {}", action, e);
                RemoteResponse::connection_error()
            }
        }
    }

    /// Returns the board of `context`, loading it on first access.
    fn board_mut(&mut self, context: &str) -> &mut BlackboardState {
        if !self.boards.contains_key(context) {
            self.migrate_legacy(context);
            let board = self.peek_board(context);
            self.boards.insert(context.to_string(), board);
        }
        self.boards.entry(context.to_string()).or_default()
    }

    /// Reads the persisted board of `context`, or a default one.
    ///
    /// The primary context falls back to the legacy key until it has been
    /// migrated.
    fn peek_board(&self, context: &str) -> BlackboardState {
        let key = self.config.blackboard_key(context);
        let stored = match self.storage.get(&key) {
            Ok(Some(_)) => read_json::<BlackboardState>(self.storage.as_ref(), &key),
            Ok(None) if context == PRIMARY_CONTEXT => {
                read_json::<BlackboardState>(self.storage.as_ref(), &self.config.legacy_key())
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("[BlackboardStore] Failed to read {}: {}", key, e);
                None
            }
        };
        stored.map(BlackboardState::normalized).unwrap_or_default()
    }

    /// Moves the pre-context blackboard to the primary context's key when
    /// the new key does not exist yet.
    fn migrate_legacy(&self, context: &str) {
        if context != PRIMARY_CONTEXT {
            return;
        }
        if let Err(e) = self.try_migrate_legacy(context) {
            tracing::warn!("[BlackboardStore] Legacy migration failed: {}", e);
        }
    }

    fn try_migrate_legacy(&self, context: &str) -> Result<()> {
        let legacy_key = self.config.legacy_key();
        let new_key = self.config.blackboard_key(context);

        let Some(legacy) = self.storage.get(&legacy_key)? else {
            return Ok(());
        };
        if self.storage.get(&new_key)?.is_some() {
            return Ok(());
        }

        self.storage.set(&new_key, &legacy)?;
        self.storage.remove(&legacy_key)?;
        tracing::info!("[BlackboardStore] Migrated {} to {}", legacy_key, new_key);
        Ok(())
    }

    fn persist_board(&self, context: &str) {
        if let Some(board) = self.boards.get(context) {
            self.write_json(&self.config.blackboard_key(context), board);
        }
    }

    fn persist_session(&self) {
        self.write_json(&self.config.session_key(), &self.session);
    }

    fn write_json<T: Serialize>(&self, key: &str, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(BlackboardError::from)
            .and_then(|json| self.storage.set(key, &json));
        if let Err(e) = result {
            tracing::warn!("[BlackboardStore] Failed to persist {}: {}", key, e);
        }
    }
}

/// Reads and decodes a JSON value, logging and discarding anything unreadable.
fn read_json<T: DeserializeOwned>(storage: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match storage.get(key) {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::warn!("[BlackboardStore] Failed to read {}: {}", key, e);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("[BlackboardStore] Discarding corrupt {}: {}", key, e);
            None
        }
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
