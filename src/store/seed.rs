//! Seed-data ingestion.
//!
//! The dashboard ships with two static JSON collections embedded at
//! compile time, matching the wire shapes in the model module. Loading is
//! strict about shape (malformed JSON is a startup error) but lenient
//! about content: out-of-sync summary fields and dangling user references
//! are logged, not rejected.

use crate::model::{Conversation, SeedError, User};
use crate::store::EntityStore;
use tracing::{info, warn};

const USERS_JSON: &str = include_str!("../../data/users.json");
const CONVERSATIONS_JSON: &str = include_str!("../../data/conversations.json");

/// Load the built-in seed collections into a store.
pub fn builtin() -> Result<EntityStore, SeedError> {
    from_json(USERS_JSON, CONVERSATIONS_JSON)
}

/// Load a store from caller-supplied JSON collections.
///
/// `users` is a JSON array of user records, `conversations` a JSON array
/// of conversation records with nested messages (field names camelCase).
pub fn from_json(users: &str, conversations: &str) -> Result<EntityStore, SeedError> {
    let users: Vec<User> = serde_json::from_str(users).map_err(|source| SeedError::Malformed {
        collection: "users",
        source,
    })?;
    let conversations: Vec<Conversation> =
        serde_json::from_str(conversations).map_err(|source| SeedError::Malformed {
            collection: "conversations",
            source,
        })?;

    for conv in &conversations {
        if !conv.summary_in_sync() {
            warn!(
                conversation_id = %conv.id(),
                "seed conversation summary fields do not match its message tail"
            );
        }
    }

    info!(
        users = users.len(),
        conversations = conversations.len(),
        "seed data loaded"
    );
    Ok(EntityStore::new(users, conversations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConversationId, UserId};

    #[test]
    fn builtin_seed_loads() {
        let store = builtin().expect("embedded seed data is well-formed");
        assert_eq!(store.users().len(), 8);
        assert_eq!(store.conversations().len(), 8);
    }

    #[test]
    fn builtin_seed_summaries_are_in_sync() {
        let store = builtin().expect("embedded seed data is well-formed");
        for conv in store.conversations() {
            assert!(
                conv.summary_in_sync(),
                "conversation {} summary out of sync",
                conv.id()
            );
        }
    }

    #[test]
    fn builtin_seed_has_no_dangling_references() {
        let store = builtin().expect("embedded seed data is well-formed");
        for conv in store.conversations() {
            assert!(
                store.user(conv.user_id()).is_some(),
                "conversation {} references missing user {}",
                conv.id(),
                conv.user_id()
            );
        }
    }

    #[test]
    fn builtin_seed_indexes_john_doe() {
        let store = builtin().expect("embedded seed data is well-formed");
        let john = store.user(&UserId::new("1").unwrap()).expect("user 1 exists");
        assert_eq!(john.name(), "John Doe");
        let conv = store
            .conversation_for_user(john.id())
            .expect("John has a conversation");
        assert_eq!(conv.id(), &ConversationId::new("1").unwrap());
    }

    #[test]
    fn from_json_rejects_malformed_users() {
        let err = from_json("{not json", "[]").unwrap_err();
        assert!(
            matches!(err, SeedError::Malformed { collection: "users", .. }),
            "Malformed users JSON should be reported against the users collection"
        );
    }

    #[test]
    fn from_json_rejects_malformed_conversations() {
        let err = from_json("[]", "[{\"id\": 42}]").unwrap_err();
        assert!(
            matches!(err, SeedError::Malformed { collection: "conversations", .. }),
            "Malformed conversations JSON should be reported against the conversations collection"
        );
    }

    #[test]
    fn from_json_accepts_empty_collections() {
        let store = from_json("[]", "[]").expect("empty collections are valid");
        assert!(store.users().is_empty());
        assert!(store.conversations().is_empty());
    }
}
