//! Core identifier newtypes with smart constructors.
//!
//! All identifiers validate non-empty strings at construction time.
//! Raw constructors are never exported - use smart constructors only.
//! Serde round-trips go through the same validation via `TryFrom<String>`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique, stable identifier for a user record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Smart constructor: validates non-empty id.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidUserId> {
        let s = raw.into();
        if s.is_empty() {
            Err(InvalidUserId::Empty)
        } else {
            Ok(Self(s))
        }
    }

    /// Borrow the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = InvalidUserId;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

/// Unique identifier for a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConversationId(String);

impl ConversationId {
    /// Smart constructor: validates non-empty id.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidConversationId> {
        let s = raw.into();
        if s.is_empty() {
            Err(InvalidConversationId::Empty)
        } else {
            Ok(Self(s))
        }
    }

    /// Borrow the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ConversationId {
    type Error = InvalidConversationId;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<ConversationId> for String {
    fn from(id: ConversationId) -> Self {
        id.0
    }
}

/// Message identifier, unique within its conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MessageId(String);

impl MessageId {
    /// Smart constructor: validates non-empty id.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidMessageId> {
        let s = raw.into();
        if s.is_empty() {
            Err(InvalidMessageId::Empty)
        } else {
            Ok(Self(s))
        }
    }

    /// Mint an id for a composer-generated message: prefix, epoch
    /// milliseconds, and a per-conversation sequence number. Non-empty
    /// by construction, so no validation path is needed.
    pub(crate) fn generated(prefix: &str, millis: i64, seq: usize) -> Self {
        Self(format!("{prefix}-{millis}-{seq}"))
    }

    /// Borrow the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for MessageId {
    type Error = InvalidMessageId;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<MessageId> for String {
    fn from(id: MessageId) -> Self {
        id.0
    }
}

// ===== Error Types =====

/// Rejection from the [`UserId`] smart constructor.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InvalidUserId {
    /// Empty string supplied where a user id was required.
    #[error("User id cannot be empty")]
    Empty,
}

/// Rejection from the [`ConversationId`] smart constructor.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InvalidConversationId {
    /// Empty string supplied where a conversation id was required.
    #[error("Conversation id cannot be empty")]
    Empty,
}

/// Rejection from the [`MessageId`] smart constructor.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InvalidMessageId {
    /// Empty string supplied where a message id was required.
    #[error("Message id cannot be empty")]
    Empty,
}

// ===== Tests =====
