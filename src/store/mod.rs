//! Entity store: the two seed collections plus lookup indexes.
//!
//! The store is the single owner of all Users and Conversations. Reads go
//! through id-keyed indexes built once at construction; the only
//! mutations are message appends and mark-read, both of which advance a
//! generation counter that derived-view caches use as their fingerprint.

pub mod seed;

use crate::model::{Conversation, ConversationId, Message, User, UserId};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Owning collection of users and conversations with lookup indexes.
///
/// # Index semantics
///
/// `conversation_by_user` is a one-to-one-or-absent mapping built once at
/// construction. When seed data carries several conversations for the
/// same user, the first one in collection order wins and later ones are
/// logged and left out of the index (they remain reachable by id and
/// appear in derived views).
///
/// # Generation counter
///
/// Every successful mutation advances `generation`. View caches key on
/// it, so stale derived rows can never be served after an append or a
/// mark-read.
#[derive(Debug, Clone)]
pub struct EntityStore {
    users: Vec<User>,
    conversations: Vec<Conversation>,
    user_index: HashMap<UserId, usize>,
    conversation_index: HashMap<ConversationId, usize>,
    conversation_by_user: HashMap<UserId, ConversationId>,
    generation: u64,
}

impl EntityStore {
    /// Build a store from the two collections, constructing all indexes.
    ///
    /// Duplicate ids and dangling user references are tolerated: they are
    /// logged and resolved by first-wins / later exclusion, never
    /// rejected.
    pub fn new(users: Vec<User>, conversations: Vec<Conversation>) -> Self {
        let mut user_index = HashMap::with_capacity(users.len());
        for (i, user) in users.iter().enumerate() {
            if user_index.insert(user.id().clone(), i).is_some() {
                warn!(user_id = %user.id(), "duplicate user id in store; later record shadows earlier in index");
            }
        }

        let mut conversation_index = HashMap::with_capacity(conversations.len());
        let mut conversation_by_user = HashMap::new();
        for (i, conv) in conversations.iter().enumerate() {
            if conversation_index.insert(conv.id().clone(), i).is_some() {
                warn!(conversation_id = %conv.id(), "duplicate conversation id in store");
            }
            if !user_index.contains_key(conv.user_id()) {
                debug!(
                    conversation_id = %conv.id(),
                    user_id = %conv.user_id(),
                    "conversation references a missing user; it will be excluded from joined views"
                );
            }
            // First conversation per user wins, matching first-match
            // selection semantics.
            if let Some(existing) = conversation_by_user.get(conv.user_id()) {
                debug!(
                    user_id = %conv.user_id(),
                    kept = %existing,
                    skipped = %conv.id(),
                    "user already mapped to a conversation; keeping the first"
                );
            } else {
                conversation_by_user.insert(conv.user_id().clone(), conv.id().clone());
            }
        }

        Self {
            users,
            conversations,
            user_index,
            conversation_index,
            conversation_by_user,
            generation: 0,
        }
    }

    /// All users, in seed order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// All conversations, in seed order.
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    /// Look up a user by id.
    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.user_index.get(id).map(|&i| &self.users[i])
    }

    /// Look up a conversation by id.
    pub fn conversation(&self, id: &ConversationId) -> Option<&Conversation> {
        self.conversation_index.get(id).map(|&i| &self.conversations[i])
    }

    /// The user's conversation, if one exists (first match in seed order).
    pub fn conversation_for_user(&self, id: &UserId) -> Option<&Conversation> {
        self.conversation_by_user
            .get(id)
            .and_then(|cid| self.conversation(cid))
    }

    /// Current mutation generation. Advances on every successful append
    /// or mark-read; derived-view caches key on it.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Append a message to a conversation, syncing its summary fields.
    ///
    /// Returns the updated conversation, or `None` when the id is
    /// unknown. The generation advances only on success.
    pub fn append_message(
        &mut self,
        id: &ConversationId,
        message: Message,
    ) -> Option<&Conversation> {
        let &index = self.conversation_index.get(id)?;
        self.conversations[index].push_message(message);
        self.generation += 1;
        Some(&self.conversations[index])
    }

    /// Reset a conversation's unread counter (explicit operator action).
    ///
    /// Returns `false` when the id is unknown. The generation advances
    /// only when the counter actually changed.
    pub fn mark_read(&mut self, id: &ConversationId) -> bool {
        let Some(&index) = self.conversation_index.get(id) else {
            return false;
        };
        if self.conversations[index].unread_count() > 0 {
            self.conversations[index].mark_read();
            self.generation += 1;
        }
        true
    }
}
