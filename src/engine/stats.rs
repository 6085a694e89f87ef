//! Dashboard aggregates.
//!
//! Headline counts for the dashboard's stat strip, computed from the
//! store in one pass.

use crate::model::{ConversationStatus, UserStatus};
use crate::store::EntityStore;

/// Aggregated headline counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    /// All users in the directory.
    pub total_users: usize,
    /// Users currently online.
    pub online_users: usize,
    /// Conversations in the `active` state.
    pub active_conversations: usize,
    /// Conversations still open for the desk (`new` or `waiting`).
    pub open_conversations: usize,
    /// Sum of unread counters across all conversations.
    pub unread_total: u64,
}

impl DashboardStats {
    /// Compute the aggregates from the current store contents.
    pub fn collect(store: &EntityStore) -> Self {
        let mut stats = Self {
            total_users: store.users().len(),
            ..Self::default()
        };

        for user in store.users() {
            if user.status() == UserStatus::Online {
                stats.online_users += 1;
            }
        }

        for conv in store.conversations() {
            match conv.status() {
                ConversationStatus::Active => stats.active_conversations += 1,
                ConversationStatus::New | ConversationStatus::Waiting => {
                    stats.open_conversations += 1
                }
                ConversationStatus::Resolved => {}
            }
            stats.unread_total += u64::from(conv.unread_count());
        }

        stats
    }
}
