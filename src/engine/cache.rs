//! Memoized view projection.
//!
//! Derived views are cheap but recomputed on every parameter change;
//! this layer avoids recomputation when neither the store nor the
//! parameters have moved. Cache keys carry the store's generation
//! counter alongside the full parameter set, so any mutation (append,
//! mark-read) naturally invalidates every cached projection. Hits store
//! only record ids and are re-materialized against the live store.

use crate::engine::user_view::{build_user_view, UserViewParams};
use crate::engine::view::{build_view, ConversationViewParams, ViewRow};
use crate::model::{ConversationId, User, UserId};
use crate::store::EntityStore;
use lru::LruCache;
use std::fmt;
use std::num::NonZeroUsize;

/// Default number of cached projections per view when not configured.
pub const DEFAULT_VIEW_CACHE_CAPACITY: usize = 64;

const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(DEFAULT_VIEW_CACHE_CAPACITY) {
    Some(capacity) => capacity,
    None => NonZeroUsize::MIN,
};

/// Key for a cached conversations-table projection.
///
/// Includes every input that affects the output: the store generation
/// and the complete parameter set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ConversationViewKey {
    generation: u64,
    params: ConversationViewParams,
}

/// Key for a cached user-directory projection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct UserViewKey {
    generation: u64,
    params: UserViewParams,
}

/// LRU-bounded memoization for both derived views.
pub struct ViewCache {
    conversation_views: LruCache<ConversationViewKey, Vec<(ConversationId, UserId)>>,
    user_views: LruCache<UserViewKey, Vec<UserId>>,
}

impl fmt::Debug for ViewCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewCache")
            .field("conversation_views", &self.conversation_views.len())
            .field("user_views", &self.user_views.len())
            .finish()
    }
}

impl ViewCache {
    /// Create a cache bounding each view to `capacity` remembered
    /// projections. A capacity of 0 falls back to the default.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(DEFAULT_CAPACITY);
        Self {
            conversation_views: LruCache::new(capacity),
            user_views: LruCache::new(capacity),
        }
    }

    /// The conversations-table rows for `params`, memoized.
    ///
    /// A hit re-materializes the remembered row ids against the live
    /// store; because the key carries the generation, every id is
    /// guaranteed to still resolve.
    pub fn conversation_rows<'a>(
        &mut self,
        store: &'a EntityStore,
        params: &ConversationViewParams,
    ) -> Vec<ViewRow<'a>> {
        let key = ConversationViewKey {
            generation: store.generation(),
            params: params.clone(),
        };

        if let Some(ids) = self.conversation_views.get(&key) {
            return ids
                .iter()
                .filter_map(|(conversation_id, user_id)| {
                    Some(ViewRow {
                        conversation: store.conversation(conversation_id)?,
                        user: store.user(user_id)?,
                    })
                })
                .collect();
        }

        let rows = build_view(store.conversations(), store.users(), params);
        self.conversation_views.put(
            key,
            rows.iter()
                .map(|row| (row.conversation.id().clone(), row.user.id().clone()))
                .collect(),
        );
        rows
    }

    /// The user-directory rows for `params`, memoized.
    pub fn user_rows<'a>(
        &mut self,
        store: &'a EntityStore,
        params: &UserViewParams,
    ) -> Vec<&'a User> {
        let key = UserViewKey {
            generation: store.generation(),
            params: params.clone(),
        };

        if let Some(ids) = self.user_views.get(&key) {
            return ids.iter().filter_map(|id| store.user(id)).collect();
        }

        let rows = build_user_view(store.users(), params);
        self.user_views
            .put(key, rows.iter().map(|user| user.id().clone()).collect());
        rows
    }

    /// Number of remembered conversation projections.
    pub fn len(&self) -> usize {
        self.conversation_views.len() + self.user_views.len()
    }

    /// Whether nothing is memoized yet.
    pub fn is_empty(&self) -> bool {
        self.conversation_views.is_empty() && self.user_views.is_empty()
    }

    /// Drop all memoized projections.
    pub fn clear(&mut self) {
        self.conversation_views.clear();
        self.user_views.clear();
    }
}

impl Default for ViewCache {
    fn default() -> Self {
        Self::new(DEFAULT_VIEW_CACHE_CAPACITY)
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::view::{ConversationSortField, SortDirection};
    use crate::model::{
        Conversation, ConversationStatus, Message, MessageId, Timestamp, UserStatus,
    };

    fn store() -> EntityStore {
        let users = vec![
            User::new(
                UserId::new("1").unwrap(),
                "John Doe",
                "john@example.com",
                "avatar",
                UserStatus::Online,
                Timestamp::new("2023-05-20T10:30:00Z"),
                "Testville",
                vec![],
            ),
            User::new(
                UserId::new("2").unwrap(),
                "Jane Smith",
                "jane@example.com",
                "avatar",
                UserStatus::Offline,
                Timestamp::new("2023-05-19T15:45:00Z"),
                "Testville",
                vec![],
            ),
        ];
        let conversations = vec![
            conversation("1", "1", "payment issue", "2023-05-20T10:25:00Z"),
            conversation("2", "2", "upgrade question", "2023-05-19T15:35:00Z"),
        ];
        EntityStore::new(users, conversations)
    }

    fn conversation(id: &str, user_id: &str, last: &str, time: &str) -> Conversation {
        let msg = Message::new(
            MessageId::new(format!("{id}-1")).unwrap(),
            UserId::new(user_id).unwrap(),
            last,
            Timestamp::new(time),
            true,
        )
        .unwrap();
        Conversation::new(
            ConversationId::new(id).unwrap(),
            UserId::new(user_id).unwrap(),
            ConversationStatus::Active,
            1,
            vec![msg],
        )
    }

    fn message(id: &str, content: &str) -> Message {
        Message::new(
            MessageId::new(id).unwrap(),
            UserId::new("1").unwrap(),
            content,
            Timestamp::new("2023-05-20T11:00:00Z"),
            false,
        )
        .unwrap()
    }

    #[test]
    fn repeated_queries_hit_the_cache_and_agree() {
        let store = store();
        let mut cache = ViewCache::default();
        let params = ConversationViewParams::default();

        let first: Vec<_> = cache
            .conversation_rows(&store, &params)
            .iter()
            .map(|r| r.conversation.id().clone())
            .collect();
        assert_eq!(cache.len(), 1);

        let second: Vec<_> = cache
            .conversation_rows(&store, &params)
            .iter()
            .map(|r| r.conversation.id().clone())
            .collect();

        assert_eq!(first, second, "Hit must materialize the same ordered rows");
        assert_eq!(cache.len(), 1, "Second call should not add a new entry");
    }

    #[test]
    fn different_params_occupy_different_entries() {
        let store = store();
        let mut cache = ViewCache::default();

        cache.conversation_rows(&store, &ConversationViewParams::default());
        cache.conversation_rows(
            &store,
            &ConversationViewParams {
                sort_field: ConversationSortField::Name,
                direction: SortDirection::Asc,
                ..Default::default()
            },
        );

        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn store_mutation_invalidates_via_generation() {
        let mut store = store();
        let mut cache = ViewCache::default();
        let params = ConversationViewParams::default();

        let before: Vec<_> = cache
            .conversation_rows(&store, &params)
            .iter()
            .map(|r| r.conversation.id().clone())
            .collect();
        assert_eq!(before[0].as_str(), "1");

        // Appending to conversation 2 makes it the most recent.
        store
            .append_message(&ConversationId::new("2").unwrap(), message("m9", "newest"))
            .expect("conversation exists");

        let after: Vec<_> = cache
            .conversation_rows(&store, &params)
            .iter()
            .map(|r| r.conversation.id().clone())
            .collect();

        assert_eq!(after[0].as_str(), "2", "Fresh generation must recompute the projection");
    }

    #[test]
    fn user_rows_are_memoized_too() {
        let store = store();
        let mut cache = ViewCache::default();
        let params = UserViewParams::default();

        let first: Vec<_> = cache.user_rows(&store, &params).iter().map(|u| u.id().clone()).collect();
        let second: Vec<_> = cache.user_rows(&store, &params).iter().map(|u| u.id().clone()).collect();

        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn capacity_zero_falls_back_to_default() {
        let cache = ViewCache::new(0);
        assert!(cache.is_empty());
    }

    #[test]
    fn clear_drops_all_entries() {
        let store = store();
        let mut cache = ViewCache::default();
        cache.conversation_rows(&store, &ConversationViewParams::default());
        cache.user_rows(&store, &UserViewParams::default());
        assert!(!cache.is_empty());

        cache.clear();
        assert!(cache.is_empty());
    }
}
