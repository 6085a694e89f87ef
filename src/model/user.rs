//! User directory records.
//!
//! Users are immutable within this core: created once from seed data,
//! never mutated or destroyed at runtime.

use crate::model::{Timestamp, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

// ===== UserStatus =====

/// Presence status of a user. Sum type - exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// User currently active.
    Online,
    /// User not connected.
    Offline,
    /// User connected but idle.
    Away,
}

impl UserStatus {
    /// Wire/display form of the status. Status sorting compares these
    /// strings lexicographically.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Online => "online",
            UserStatus::Offline => "offline",
            UserStatus::Away => "away",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===== User =====

/// A user directory record.
///
/// Field names on the wire are camelCase, matching the seed-data format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    avatar: String,
    status: UserStatus,
    last_active: Timestamp,
    location: String,
    tags: Vec<String>,
}

impl User {
    /// Build a user record. Primarily for tests and embedders that supply
    /// their own collections instead of the seed data.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        avatar: impl Into<String>,
        status: UserStatus,
        last_active: Timestamp,
        location: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            avatar: avatar.into(),
            status,
            last_active,
            location: location.into(),
            tags,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Avatar reference (opaque to this core).
    pub fn avatar(&self) -> &str {
        &self.avatar
    }

    /// Presence status.
    pub fn status(&self) -> UserStatus {
        self.status
    }

    /// Last activity timestamp.
    pub fn last_active(&self) -> &Timestamp {
        &self.last_active
    }

    /// Free-form location label.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Ordered tag labels.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}
