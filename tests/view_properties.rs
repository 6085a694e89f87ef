//! Property-based tests for the view-derivation laws.
//!
//! Rather than fixed fixtures, these generate arbitrary stores (including
//! dangling user references and malformed timestamps) and assert the
//! laws the views must uphold:
//!
//! - join totality: every row resolves to a real user, dangling
//!   conversations never surface;
//! - filter/search correctness: every surviving row actually matches;
//! - determinism: identical inputs and params give identical ordering;
//! - stability: equal-key rows keep their input order under both sort
//!   polarities.

use deskview::engine::{
    build_user_view, build_view, ConversationFilter, ConversationSortField,
    ConversationViewParams, SortDirection, UserFilter, UserViewParams, ViewRow,
};
use deskview::model::{
    Conversation, ConversationId, ConversationStatus, Message, MessageId, Timestamp, User, UserId,
    UserStatus,
};
use proptest::prelude::*;

// ===== Arbitrary Strategies =====

fn arb_conversation_status() -> impl Strategy<Value = ConversationStatus> {
    prop_oneof![
        Just(ConversationStatus::New),
        Just(ConversationStatus::Active),
        Just(ConversationStatus::Resolved),
        Just(ConversationStatus::Waiting),
    ]
}

fn arb_user_status() -> impl Strategy<Value = UserStatus> {
    prop_oneof![
        Just(UserStatus::Online),
        Just(UserStatus::Offline),
        Just(UserStatus::Away),
    ]
}

/// Mix of well-formed and malformed timestamps.
fn arb_timestamp() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => (0u32..28).prop_map(|d| format!("2023-05-{:02}T10:00:00Z", d + 1)),
        1 => "[a-z ]{0,12}",
    ]
}

fn arb_user(index: usize) -> impl Strategy<Value = User> {
    (
        "[A-Za-z]{1,8}",
        "[a-z]{1,8}",
        arb_user_status(),
        arb_timestamp(),
    )
        .prop_map(move |(name, mailbox, status, last_active)| {
            User::new(
                UserId::new(format!("u{index}")).expect("generated id is non-empty"),
                name,
                format!("{mailbox}@example.com"),
                "avatar",
                status,
                Timestamp::new(last_active),
                "Testville",
                vec![],
            )
        })
}

/// Raw ingredients for one conversation. User indexes range beyond the
/// user pool so some conversations carry dangling references.
fn arb_conversation_parts(
    user_pool: usize,
) -> impl Strategy<Value = (usize, ConversationStatus, String, String, u32)> {
    (
        0..user_pool + 3,
        arb_conversation_status(),
        "[a-z]{1,12}",
        arb_timestamp(),
        0u32..4,
    )
}

/// Conversation ids are assigned by position so they are always unique.
fn conversation_from_parts(
    index: usize,
    (user_index, status, content, time, unread): (usize, ConversationStatus, String, String, u32),
) -> Conversation {
    let user_id = UserId::new(format!("u{user_index}")).expect("generated id is non-empty");
    let message = Message::new(
        MessageId::new(format!("m{index}")).expect("generated id is non-empty"),
        user_id.clone(),
        content,
        Timestamp::new(time),
        true,
    )
    .expect("generated content is non-empty");
    Conversation::new(
        ConversationId::new(format!("c{index}")).expect("generated id is non-empty"),
        user_id,
        status,
        unread,
        vec![message],
    )
}

fn arb_store() -> impl Strategy<Value = (Vec<User>, Vec<Conversation>)> {
    (1usize..6).prop_flat_map(|pool| {
        let users: Vec<_> = (0..pool).map(arb_user).collect();
        let conversations = proptest::collection::vec(arb_conversation_parts(pool), 0..10)
            .prop_map(|parts| {
                parts
                    .into_iter()
                    .enumerate()
                    .map(|(i, p)| conversation_from_parts(i, p))
                    .collect::<Vec<_>>()
            });
        (users, conversations)
    })
}

fn arb_direction() -> impl Strategy<Value = SortDirection> {
    prop_oneof![Just(SortDirection::Asc), Just(SortDirection::Desc)]
}

fn arb_sort_field() -> impl Strategy<Value = ConversationSortField> {
    prop_oneof![
        Just(ConversationSortField::Name),
        Just(ConversationSortField::Status),
        Just(ConversationSortField::Time),
        Just(ConversationSortField::Message),
    ]
}

fn row_ids(rows: &[ViewRow<'_>]) -> Vec<String> {
    rows.iter()
        .map(|r| r.conversation.id().as_str().to_string())
        .collect()
}

// ===== Properties =====

proptest! {
    #[test]
    fn every_row_resolves_its_user(
        (users, conversations) in arb_store(),
        field in arb_sort_field(),
        direction in arb_direction(),
    ) {
        let params = ConversationViewParams {
            sort_field: field,
            direction,
            ..Default::default()
        };
        let rows = build_view(&conversations, &users, &params);

        for row in &rows {
            prop_assert!(
                users.iter().any(|u| u.id() == row.user.id()),
                "row user must come from the user collection"
            );
            prop_assert_eq!(row.conversation.user_id(), row.user.id());
        }

        let resolvable = conversations
            .iter()
            .filter(|c| users.iter().any(|u| u.id() == c.user_id()))
            .count();
        prop_assert_eq!(rows.len(), resolvable, "exactly the resolvable rows survive the join");
    }

    #[test]
    fn status_filter_is_exact(
        (users, conversations) in arb_store(),
        status in arb_conversation_status(),
    ) {
        let params = ConversationViewParams {
            filter: ConversationFilter::Status(status),
            ..Default::default()
        };
        let rows = build_view(&conversations, &users, &params);

        for row in &rows {
            prop_assert_eq!(row.conversation.status(), status);
        }
    }

    #[test]
    fn search_hits_one_of_the_three_fields(
        (users, conversations) in arb_store(),
        query in "[a-z]{1,3}",
    ) {
        let params = ConversationViewParams {
            search: query.clone(),
            ..Default::default()
        };
        let rows = build_view(&conversations, &users, &params);
        let needle = query.to_lowercase();

        for row in &rows {
            let hit = row.user.name().to_lowercase().contains(&needle)
                || row.user.email().to_lowercase().contains(&needle)
                || row.conversation.last_message().to_lowercase().contains(&needle);
            prop_assert!(hit, "row survived search without matching any field");
        }
    }

    #[test]
    fn derivation_is_deterministic(
        (users, conversations) in arb_store(),
        field in arb_sort_field(),
        direction in arb_direction(),
    ) {
        let params = ConversationViewParams {
            sort_field: field,
            direction,
            ..Default::default()
        };

        let first = row_ids(&build_view(&conversations, &users, &params));
        let second = row_ids(&build_view(&conversations, &users, &params));

        prop_assert_eq!(first, second);
    }

    #[test]
    fn equal_keys_keep_input_order_under_both_polarities(
        (users, conversations) in arb_store(),
        field in arb_sort_field(),
    ) {
        let asc = ConversationViewParams {
            sort_field: field,
            direction: SortDirection::Asc,
            ..Default::default()
        };
        let desc = ConversationViewParams {
            direction: SortDirection::Desc,
            ..asc.clone()
        };

        // Key equality here must imply comparator equality, so the name
        // key carries the case-folded form AND the raw tiebreak.
        let sort_key = |row: &ViewRow<'_>| match field {
            ConversationSortField::Name => {
                (row.user.name().to_lowercase(), row.user.name().to_string())
            }
            ConversationSortField::Status => {
                (row.conversation.status().as_str().to_string(), String::new())
            }
            ConversationSortField::Time => {
                (row.conversation.last_message_time().as_str().to_string(), String::new())
            }
            ConversationSortField::Message => {
                (row.conversation.last_message().to_string(), String::new())
            }
        };

        let input_position = |id: &str| {
            conversations
                .iter()
                .position(|c| c.id().as_str() == id)
                .expect("row came from the input")
        };

        for params in [&asc, &desc] {
            let rows = build_view(&conversations, &users, params);
            for pair in rows.windows(2) {
                if sort_key(&pair[0]) == sort_key(&pair[1]) {
                    prop_assert!(
                        input_position(pair[0].conversation.id().as_str())
                            < input_position(pair[1].conversation.id().as_str()),
                        "equal-key rows must preserve input order"
                    );
                }
            }
        }
    }

    #[test]
    fn user_view_filter_is_exact(
        (users, _) in arb_store(),
        status in arb_user_status(),
    ) {
        let params = UserViewParams {
            filter: UserFilter::Status(status),
            ..Default::default()
        };

        for user in build_user_view(&users, &params) {
            prop_assert_eq!(user.status(), status);
        }
    }

    #[test]
    fn user_view_is_deterministic((users, _) in arb_store()) {
        let params = UserViewParams::default();
        let first: Vec<_> = build_user_view(&users, &params)
            .iter()
            .map(|u| u.id().as_str().to_string())
            .collect();
        let second: Vec<_> = build_user_view(&users, &params)
            .iter()
            .map(|u| u.id().as_str().to_string())
            .collect();
        prop_assert_eq!(first, second);
    }
}
