//! Conversation composer: message sends and automated replies.
//!
//! Sends validate content, mint a fresh message id and timestamp, and
//! append through the store so the conversation's summary fields stay in
//! sync. Automated replies are serialized per conversation: at most one
//! is in flight at a time, and the pending request is plain data that
//! the embedding event loop resolves after its delay - this core
//! schedules nothing itself.

use crate::model::{ComposeError, Conversation, ConversationId, Message, MessageId, Timestamp};
use crate::store::EntityStore;
use chrono::Utc;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, warn};

/// Delay before an automated reply is due, when not configured.
pub const DEFAULT_REPLY_DELAY_MS: u64 = 1500;

/// Quick replies offered while the end-user spoke last.
const OPENING_SUGGESTIONS: [&str; 4] = [
    "I understand your concern. Let me help you with that.",
    "Thanks for reaching out! I'd be happy to assist you.",
    "I'll look into this issue right away.",
    "Could you provide more details about your problem?",
];

/// Quick replies offered once the desk side spoke last.
const FOLLOW_UP_SUGGESTIONS: [&str; 4] = [
    "Would you like me to explain further?",
    "Is there anything else you need help with?",
    "Let me know if you have any other questions.",
    "I can provide more detailed information if needed.",
];

// ===== PendingReply =====

/// A requested-but-unresolved automated reply.
///
/// Returned by [`Composer::request_reply`]; the embedder waits out
/// `delay` and then calls [`Composer::resolve_reply`] with the reply
/// text supplied by the external responder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    conversation: ConversationId,
    delay: Duration,
}

impl PendingReply {
    /// The conversation awaiting a reply.
    pub fn conversation(&self) -> &ConversationId {
        &self.conversation
    }

    /// How long the embedder should wait before resolving.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

// ===== Composer =====

/// Message send/append operations plus the pending-reply ledger.
#[derive(Debug, Clone)]
pub struct Composer {
    pending: HashSet<ConversationId>,
    reply_delay: Duration,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

impl Composer {
    /// Composer with the default reply delay.
    pub fn new() -> Self {
        Self::with_reply_delay(Duration::from_millis(DEFAULT_REPLY_DELAY_MS))
    }

    /// Composer with a configured reply delay.
    pub fn with_reply_delay(reply_delay: Duration) -> Self {
        Self {
            pending: HashSet::new(),
            reply_delay,
        }
    }

    /// The configured automated-reply delay.
    pub fn reply_delay(&self) -> Duration {
        self.reply_delay
    }

    /// Append a message to a conversation.
    ///
    /// Rejects empty/whitespace-only content with no state change. On
    /// success the message carries a freshly minted id and the current
    /// timestamp, and the conversation's summary fields match it.
    pub fn send(
        &self,
        store: &mut EntityStore,
        id: &ConversationId,
        content: &str,
        is_user: bool,
    ) -> Result<MessageId, ComposeError> {
        self.append(store, id, content, is_user, "new")
    }

    /// Request an automated reply for a conversation.
    ///
    /// At most one reply may be pending per conversation; a second
    /// request while one is in flight is rejected with
    /// [`ComposeError::ReplyPending`].
    pub fn request_reply(
        &mut self,
        store: &EntityStore,
        id: &ConversationId,
    ) -> Result<PendingReply, ComposeError> {
        if store.conversation(id).is_none() {
            return Err(ComposeError::UnknownConversation);
        }
        if !self.pending.insert(id.clone()) {
            warn!(conversation_id = %id, "reply requested while one is already pending");
            return Err(ComposeError::ReplyPending);
        }
        debug!(conversation_id = %id, delay_ms = self.reply_delay.as_millis() as u64, "automated reply pending");
        Ok(PendingReply {
            conversation: id.clone(),
            delay: self.reply_delay,
        })
    }

    /// Deliver the external responder's text for a pending reply.
    ///
    /// Appends the reply (flagged as sent by the end-user side, like the
    /// responder it models) and clears the in-flight flag. Rejected when
    /// no reply is pending; a rejected resolution leaves the flag
    /// untouched so the embedder can retry with corrected content.
    pub fn resolve_reply(
        &mut self,
        store: &mut EntityStore,
        id: &ConversationId,
        content: &str,
    ) -> Result<MessageId, ComposeError> {
        if !self.pending.contains(id) {
            return Err(ComposeError::NoPendingReply);
        }
        let message_id = self.append(store, id, content, true, "ai")?;
        self.pending.remove(id);
        Ok(message_id)
    }

    /// Whether an automated reply is in flight for this conversation.
    pub fn is_reply_pending(&self, id: &ConversationId) -> bool {
        self.pending.contains(id)
    }

    fn append(
        &self,
        store: &mut EntityStore,
        id: &ConversationId,
        content: &str,
        is_user: bool,
        prefix: &str,
    ) -> Result<MessageId, ComposeError> {
        let conversation = store
            .conversation(id)
            .ok_or(ComposeError::UnknownConversation)?;

        let message_id = MessageId::generated(
            prefix,
            Utc::now().timestamp_millis(),
            conversation.messages().len() + 1,
        );
        let message = Message::new(
            message_id.clone(),
            conversation.user_id().clone(),
            content,
            Timestamp::now(),
            is_user,
        )?;

        store
            .append_message(id, message)
            .ok_or(ComposeError::UnknownConversation)?;
        debug!(conversation_id = %id, message_id = %message_id, "message appended");
        Ok(message_id)
    }
}

// ===== Suggested replies =====

/// Canned quick replies for a conversation.
///
/// The opening set is offered while the end-user side spoke last; once
/// the desk side has the last word the set rotates to follow-ups. An
/// empty conversation gets the opening set.
pub fn suggested_replies(conversation: &Conversation) -> &'static [&'static str] {
    match conversation.messages().last() {
        Some(last) if !last.is_user() => &FOLLOW_UP_SUGGESTIONS,
        _ => &OPENING_SUGGESTIONS,
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "composer_tests.rs"]
mod tests;
