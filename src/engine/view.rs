//! Joined conversation view derivation.
//!
//! [`build_view`] is the pure pipeline behind the conversations table:
//! join each conversation with its user (dropping rows whose user is
//! missing), apply the status filter, apply the search filter, then
//! stable-sort by the selected field and direction. It never mutates its
//! inputs and is deterministic: identical inputs and parameters yield an
//! identical ordered result.

use crate::model::{Conversation, ConversationStatus, Timestamp, User, UserId};
use std::cmp::Ordering;
use std::collections::HashMap;

// ===== SortDirection =====

/// Sort polarity shared by all views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Comparator result as-is.
    Asc,
    /// Comparator result negated. Ties keep their original relative
    /// order either way - negation is not reversal of the whole list.
    Desc,
}

impl SortDirection {
    /// Apply the polarity to a comparator result.
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }

    /// The opposite polarity.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

// ===== ConversationSortField =====

/// Sortable column of the conversations table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversationSortField {
    /// User display name (case-folded collation).
    Name,
    /// Conversation status string, lexicographic.
    Status,
    /// Last-message timestamp as an instant.
    Time,
    /// Last-message content, lexicographic.
    Message,
}

// ===== ConversationFilter =====

/// Status filter for the conversations table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversationFilter {
    /// No status filtering.
    All,
    /// Keep only conversations with this status.
    Status(ConversationStatus),
}

impl ConversationFilter {
    /// Whether a conversation with `status` passes the filter.
    pub fn admits(self, status: ConversationStatus) -> bool {
        match self {
            ConversationFilter::All => true,
            ConversationFilter::Status(wanted) => status == wanted,
        }
    }
}

// ===== ConversationViewParams =====

/// View parameters for the conversations table.
///
/// Hashable so the memoized projection can key on the full parameter set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConversationViewParams {
    /// Case-insensitive substring query over user name, user email, and
    /// last message. Empty string disables the search filter.
    pub search: String,
    /// Status filter.
    pub filter: ConversationFilter,
    /// Active sort column.
    pub sort_field: ConversationSortField,
    /// Sort polarity.
    pub direction: SortDirection,
}

impl Default for ConversationViewParams {
    /// Most recent conversations first, nothing filtered.
    fn default() -> Self {
        Self {
            search: String::new(),
            filter: ConversationFilter::All,
            sort_field: ConversationSortField::Time,
            direction: SortDirection::Desc,
        }
    }
}

impl ConversationViewParams {
    /// Header-click semantics: selecting the active column flips the
    /// direction; selecting a new column sorts it ascending.
    pub fn toggle_sort(&mut self, field: ConversationSortField) {
        if self.sort_field == field {
            self.direction = self.direction.toggled();
        } else {
            self.sort_field = field;
            self.direction = SortDirection::Asc;
        }
    }
}

// ===== ViewRow =====

/// A joined, filtered, sorted pair produced for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewRow<'a> {
    /// The conversation backing the row.
    pub conversation: &'a Conversation,
    /// The conversation's resolved user.
    pub user: &'a User,
}

// ===== build_view =====

/// Derive the conversations-table view.
///
/// Pipeline: join (conversations with no resolvable user are excluded) →
/// status filter → search filter → stable sort. Pure; inputs are
/// untouched and repeated calls with identical inputs yield identical
/// output.
pub fn build_view<'a>(
    conversations: &'a [Conversation],
    users: &'a [User],
    params: &ConversationViewParams,
) -> Vec<ViewRow<'a>> {
    let by_id: HashMap<&UserId, &User> = users.iter().map(|u| (u.id(), u)).collect();
    let query = params.search.to_lowercase();

    let mut rows: Vec<ViewRow<'a>> = conversations
        .iter()
        .filter_map(|conversation| {
            let user = by_id.get(conversation.user_id()).copied()?;
            Some(ViewRow { conversation, user })
        })
        .filter(|row| params.filter.admits(row.conversation.status()))
        .filter(|row| query.is_empty() || row_matches(row, &query))
        .collect();

    rows.sort_by(|a, b| params.direction.apply(compare_rows(a, b, params.sort_field)));
    rows
}

/// Search predicate: the lowercased query is a substring of the user's
/// name, the user's email, or the conversation's last message.
fn row_matches(row: &ViewRow<'_>, query_lower: &str) -> bool {
    row.user.name().to_lowercase().contains(query_lower)
        || row.user.email().to_lowercase().contains(query_lower)
        || row.conversation.last_message().to_lowercase().contains(query_lower)
}

fn compare_rows(a: &ViewRow<'_>, b: &ViewRow<'_>, field: ConversationSortField) -> Ordering {
    match field {
        ConversationSortField::Name => collate(a.user.name(), b.user.name()),
        ConversationSortField::Status => a
            .conversation
            .status()
            .as_str()
            .cmp(b.conversation.status().as_str()),
        ConversationSortField::Time => compare_timestamps(
            a.conversation.last_message_time(),
            b.conversation.last_message_time(),
        ),
        ConversationSortField::Message => a
            .conversation
            .last_message()
            .cmp(b.conversation.last_message()),
    }
}

/// Case-folded collation for display names, with the raw strings as the
/// tiebreak so equal-ignoring-case names still order deterministically.
pub(crate) fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Timestamp comparison with a deterministic fallback for malformed
/// values: unparseable timestamps sort before parseable ones (in
/// ascending polarity) and compare among themselves by raw string.
pub(crate) fn compare_timestamps(a: &Timestamp, b: &Timestamp) -> Ordering {
    match (a.instant(), b.instant()) {
        (Some(a), Some(b)) => a.cmp(&b),
        (None, None) => a.as_str().cmp(b.as_str()),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
    }
}

// ===== Tests =====
