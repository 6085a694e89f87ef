//! Conversation records with denormalized summary fields.
//!
//! A conversation owns its chronological message sequence plus two
//! denormalized copies of the tail (`last_message`, `last_message_time`)
//! kept in sync by convention: [`Conversation::push_message`] is the only
//! append path and updates them atomically from the caller's point of
//! view.

use crate::model::{ConversationId, Message, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

// ===== ConversationStatus =====

/// Workflow status of a conversation. Sum type - exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationStatus {
    /// Opened, not yet picked up.
    New,
    /// Being worked by an operator.
    Active,
    /// Closed out.
    Resolved,
    /// Waiting on the user or a third party.
    Waiting,
}

impl ConversationStatus {
    /// Wire/display form of the status. Status sorting compares these
    /// strings lexicographically.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationStatus::New => "new",
            ConversationStatus::Active => "active",
            ConversationStatus::Resolved => "resolved",
            ConversationStatus::Waiting => "waiting",
        }
    }
}

impl fmt::Display for ConversationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===== Conversation =====

/// A support conversation between one user and the desk.
///
/// Exactly one user per conversation; a user has zero or one
/// conversation. Wire field names are camelCase per the seed format.
///
/// # Invariants
///
/// - `last_message` / `last_message_time` equal the content/timestamp of
///   the final element of `messages` after every append.
/// - `unread_count` only returns to 0 through [`Conversation::mark_read`].
/// - `messages` is append-only and chronological.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Conversation {
    id: ConversationId,
    user_id: UserId,
    status: ConversationStatus,
    last_message: String,
    last_message_time: Timestamp,
    unread_count: u32,
    messages: Vec<Message>,
}

impl Conversation {
    /// Build a conversation from parts. The summary fields are derived
    /// from the supplied message sequence; an empty sequence yields an
    /// empty summary.
    pub fn new(
        id: ConversationId,
        user_id: UserId,
        status: ConversationStatus,
        unread_count: u32,
        messages: Vec<Message>,
    ) -> Self {
        let (last_message, last_message_time) = match messages.last() {
            Some(m) => (m.content().to_string(), m.timestamp().clone()),
            None => (String::new(), Timestamp::new("")),
        };
        Self {
            id,
            user_id,
            status,
            last_message,
            last_message_time,
            unread_count,
            messages,
        }
    }

    /// Unique identifier.
    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    /// Foreign key into the user collection.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Workflow status.
    pub fn status(&self) -> ConversationStatus {
        self.status
    }

    /// Denormalized copy of the most recent message content.
    pub fn last_message(&self) -> &str {
        &self.last_message
    }

    /// Denormalized timestamp of the most recent message.
    pub fn last_message_time(&self) -> &Timestamp {
        &self.last_message_time
    }

    /// Number of messages not yet seen by an operator.
    pub fn unread_count(&self) -> u32 {
        self.unread_count
    }

    /// Chronological, append-only message sequence.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Append a message and sync the summary fields.
    ///
    /// The only mutation path for the message sequence. After this
    /// returns, `last_message` and `last_message_time` match the appended
    /// message.
    pub fn push_message(&mut self, message: Message) {
        self.last_message = message.content().to_string();
        self.last_message_time = message.timestamp().clone();
        self.messages.push(message);
    }

    /// Explicit operator action: reset the unread counter to 0.
    pub fn mark_read(&mut self) {
        self.unread_count = 0;
    }

    /// Whether the denormalized summary matches the message tail.
    ///
    /// Holds by construction after [`Conversation::push_message`]; used to
    /// sanity-check externally supplied collections (seed data).
    pub fn summary_in_sync(&self) -> bool {
        match self.messages.last() {
            Some(m) => {
                self.last_message == m.content() && self.last_message_time == *m.timestamp()
            }
            None => self.last_message.is_empty(),
        }
    }
}
