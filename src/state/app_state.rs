//! Application state and transitions.
//!
//! [`AppState`] is the root state type: it owns the entity store, the
//! memoized view caches, the composer, and all UI selection state. It is
//! explicitly constructed and passed by reference to whatever needs it -
//! no ambient or global singleton. All transitions are synchronous
//! methods applied on the single UI event timeline.

use crate::config::Config;
use crate::engine::{
    ConversationFilter, ConversationSortField, ConversationViewParams, DashboardStats, UserFilter,
    UserSortField, UserViewParams, ViewCache, ViewRow,
};
use crate::model::{ComposeError, Conversation, ConversationId, MessageId, User, UserId};
use crate::state::composer::{Composer, PendingReply};
use crate::store::EntityStore;
use std::time::Duration;
use tracing::{debug, warn};

// ===== ActiveTab =====

/// Top-level navigation position. Sum type - exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveTab {
    /// Stats overview.
    #[default]
    Dashboard,
    /// User directory.
    Users,
    /// Conversations and thread view.
    Messages,
    /// Settings page (presentation-only; no state here).
    Settings,
}

// ===== AppState =====

/// Root state: domain data plus UI selection state.
///
/// # Focus model
///
/// Two independent pieces of focus state:
///
/// - the *directory* focus (`focused_user` + panel visibility), set by
///   [`AppState::select_user`], which also focuses that user's
///   conversation when one exists;
/// - the *messages* focus (`focused_conversation`), set directly by
///   [`AppState::select_conversation`].
///
/// Selecting a user does not require a conversation to exist, and
/// closing the panel keeps the focused user so the panel can reopen
/// without re-selecting.
#[derive(Debug)]
pub struct AppState {
    store: EntityStore,
    cache: ViewCache,
    composer: Composer,

    /// Current navigation tab.
    pub active_tab: ActiveTab,

    focused_user: Option<UserId>,
    focused_conversation: Option<ConversationId>,
    panel_open: bool,

    conversation_params: ConversationViewParams,
    user_params: UserViewParams,
}

impl AppState {
    /// State over a store, with default configuration.
    pub fn new(store: EntityStore) -> Self {
        Self::with_config(store, &Config::default())
    }

    /// State over a store, honoring the resolved configuration.
    pub fn with_config(store: EntityStore, config: &Config) -> Self {
        Self {
            store,
            cache: ViewCache::new(config.view_cache_capacity),
            composer: Composer::with_reply_delay(Duration::from_millis(config.reply_delay_ms)),
            active_tab: ActiveTab::default(),
            focused_user: None,
            focused_conversation: None,
            panel_open: false,
            conversation_params: ConversationViewParams::default(),
            user_params: UserViewParams::default(),
        }
    }

    /// Immutable view of the entity store.
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// The composer (pending-reply ledger and delay).
    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    // ===== Selection =====

    /// Focus a user from the directory, open the detail panel, and focus
    /// the user's conversation when one exists (first match). Unknown
    /// ids are ignored.
    pub fn select_user(&mut self, id: &UserId) {
        if self.store.user(id).is_none() {
            warn!(user_id = %id, "select_user ignored: unknown user");
            return;
        }
        self.focused_user = Some(id.clone());
        self.panel_open = true;
        self.focused_conversation = self
            .store
            .conversation_for_user(id)
            .map(|conv| conv.id().clone());
        debug!(user_id = %id, conversation = ?self.focused_conversation, "user selected");
    }

    /// Hide the detail panel. The focused user is retained so the panel
    /// can reopen without re-selecting.
    pub fn close_panel(&mut self) {
        self.panel_open = false;
    }

    /// Focus a conversation in the Messages view, independent of the
    /// directory focus. `None` clears the focus; unknown ids are
    /// ignored.
    pub fn select_conversation(&mut self, id: Option<&ConversationId>) {
        match id {
            None => self.focused_conversation = None,
            Some(id) if self.store.conversation(id).is_some() => {
                self.focused_conversation = Some(id.clone());
            }
            Some(id) => warn!(conversation_id = %id, "select_conversation ignored: unknown id"),
        }
    }

    /// The user currently focused for detail display.
    pub fn focused_user(&self) -> Option<&User> {
        self.focused_user.as_ref().and_then(|id| self.store.user(id))
    }

    /// The conversation currently open in the Messages view.
    pub fn focused_conversation(&self) -> Option<&Conversation> {
        self.focused_conversation
            .as_ref()
            .and_then(|id| self.store.conversation(id))
    }

    /// Whether the detail panel is visible.
    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    /// Switch the top-level navigation tab.
    pub fn activate_tab(&mut self, tab: ActiveTab) {
        self.active_tab = tab;
    }

    // ===== View parameters =====

    /// Current conversations-table parameters.
    pub fn conversation_params(&self) -> &ConversationViewParams {
        &self.conversation_params
    }

    /// Replace the conversations-table search query.
    pub fn set_conversation_search(&mut self, query: impl Into<String>) {
        self.conversation_params.search = query.into();
    }

    /// Replace the conversations-table status filter.
    pub fn set_conversation_filter(&mut self, filter: ConversationFilter) {
        self.conversation_params.filter = filter;
    }

    /// Header-click sort toggle for the conversations table.
    pub fn toggle_conversation_sort(&mut self, field: ConversationSortField) {
        self.conversation_params.toggle_sort(field);
    }

    /// Current user-directory parameters.
    pub fn user_params(&self) -> &UserViewParams {
        &self.user_params
    }

    /// Replace the user-directory search query.
    pub fn set_user_search(&mut self, query: impl Into<String>) {
        self.user_params.search = query.into();
    }

    /// Replace the user-directory presence filter.
    pub fn set_user_filter(&mut self, filter: UserFilter) {
        self.user_params.filter = filter;
    }

    /// Header-click sort toggle for the user directory.
    pub fn toggle_user_sort(&mut self, field: UserSortField) {
        self.user_params.toggle_sort(field);
    }

    // ===== Derived views =====

    /// The conversations table for the current parameters, memoized.
    pub fn conversation_rows(&mut self) -> Vec<ViewRow<'_>> {
        self.cache
            .conversation_rows(&self.store, &self.conversation_params)
    }

    /// The user directory for the current parameters, memoized.
    pub fn directory_rows(&mut self) -> Vec<&User> {
        self.cache.user_rows(&self.store, &self.user_params)
    }

    /// Headline aggregates for the dashboard tab.
    pub fn dashboard_stats(&self) -> DashboardStats {
        DashboardStats::collect(&self.store)
    }

    // ===== Mutations =====

    /// Operator marked a conversation read. Returns `false` for unknown
    /// ids.
    pub fn mark_read(&mut self, id: &ConversationId) -> bool {
        self.store.mark_read(id)
    }

    /// Send desk-side content to the focused conversation.
    pub fn send_to_focused(&mut self, content: &str) -> Result<MessageId, ComposeError> {
        let Some(id) = self.focused_conversation.clone() else {
            return Err(ComposeError::UnknownConversation);
        };
        self.composer.send(&mut self.store, &id, content, false)
    }

    /// Request an automated reply for the focused conversation.
    pub fn request_reply_for_focused(&mut self) -> Result<PendingReply, ComposeError> {
        let Some(id) = self.focused_conversation.clone() else {
            return Err(ComposeError::UnknownConversation);
        };
        self.composer.request_reply(&self.store, &id)
    }

    /// Deliver the external responder's text for a pending reply.
    pub fn resolve_reply(
        &mut self,
        id: &ConversationId,
        content: &str,
    ) -> Result<MessageId, ComposeError> {
        self.composer.resolve_reply(&mut self.store, id, content)
    }

    /// Whether an automated reply is in flight for this conversation.
    pub fn is_generating(&self, id: &ConversationId) -> bool {
        self.composer.is_reply_pending(id)
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
