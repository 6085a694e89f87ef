//! Conversation messages.
//!
//! Messages are append-only: once added to a conversation they are never
//! edited or removed. Content is validated non-empty at construction -
//! the composer's empty-send rejection lives here as the smart
//! constructor's invariant.

use crate::model::{error::ComposeError, MessageId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// A single message within a conversation.
///
/// `is_user` is `true` for messages sent by the end-user and `false` for
/// messages sent by an operator or agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Message {
    id: MessageId,
    user_id: UserId,
    content: String,
    timestamp: Timestamp,
    is_user: bool,
}

impl Message {
    /// Smart constructor: rejects empty or whitespace-only content.
    ///
    /// The content is stored as given (not trimmed); only the emptiness
    /// check looks through whitespace.
    pub fn new(
        id: MessageId,
        user_id: UserId,
        content: impl Into<String>,
        timestamp: Timestamp,
        is_user: bool,
    ) -> Result<Self, ComposeError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ComposeError::EmptyContent);
        }
        Ok(Self {
            id,
            user_id,
            content,
            timestamp,
            is_user,
        })
    }

    /// Identifier, unique within the owning conversation.
    pub fn id(&self) -> &MessageId {
        &self.id
    }

    /// The owning conversation's user.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Message text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// When the message was sent.
    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    /// `true` if sent by the end-user, `false` if sent by an agent.
    pub fn is_user(&self) -> bool {
        self.is_user
    }
}
