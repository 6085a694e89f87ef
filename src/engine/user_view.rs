//! User directory view derivation.
//!
//! Same filter/sort discipline as the conversations view, over the user
//! collection alone: case-insensitive search on name or email, presence
//! status filter, stable sort by name, status, or last-active time.

use crate::engine::view::{collate, compare_timestamps, SortDirection};
use crate::model::{User, UserStatus};
use std::cmp::Ordering;

// ===== UserSortField =====

/// Sortable column of the user directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserSortField {
    /// Display name (case-folded collation).
    Name,
    /// Presence status string, lexicographic.
    Status,
    /// Last-activity timestamp as an instant.
    LastActive,
}

// ===== UserFilter =====

/// Presence filter for the user directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserFilter {
    /// No presence filtering.
    All,
    /// Keep only users with this presence status.
    Status(UserStatus),
}

impl UserFilter {
    /// Whether a user with `status` passes the filter.
    pub fn admits(self, status: UserStatus) -> bool {
        match self {
            UserFilter::All => true,
            UserFilter::Status(wanted) => status == wanted,
        }
    }
}

// ===== UserViewParams =====

/// View parameters for the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserViewParams {
    /// Case-insensitive substring query over name and email. Empty
    /// string disables the search filter.
    pub search: String,
    /// Presence filter.
    pub filter: UserFilter,
    /// Active sort column.
    pub sort_field: UserSortField,
    /// Sort polarity.
    pub direction: SortDirection,
}

impl Default for UserViewParams {
    /// Alphabetical directory, nothing filtered.
    fn default() -> Self {
        Self {
            search: String::new(),
            filter: UserFilter::All,
            sort_field: UserSortField::Name,
            direction: SortDirection::Asc,
        }
    }
}

impl UserViewParams {
    /// Header-click semantics: selecting the active column flips the
    /// direction; selecting a new column sorts it ascending.
    pub fn toggle_sort(&mut self, field: UserSortField) {
        if self.sort_field == field {
            self.direction = self.direction.toggled();
        } else {
            self.sort_field = field;
            self.direction = SortDirection::Asc;
        }
    }
}

// ===== build_user_view =====

/// Derive the user-directory view: search filter → status filter →
/// stable sort. Pure and deterministic, like [`crate::engine::build_view`].
pub fn build_user_view<'a>(users: &'a [User], params: &UserViewParams) -> Vec<&'a User> {
    let query = params.search.to_lowercase();

    let mut result: Vec<&'a User> = users
        .iter()
        .filter(|user| {
            query.is_empty()
                || user.name().to_lowercase().contains(&query)
                || user.email().to_lowercase().contains(&query)
        })
        .filter(|user| params.filter.admits(user.status()))
        .collect();

    result.sort_by(|a, b| params.direction.apply(compare_users(a, b, params.sort_field)));
    result
}

fn compare_users(a: &User, b: &User, field: UserSortField) -> Ordering {
    match field {
        UserSortField::Name => collate(a.name(), b.name()),
        UserSortField::Status => a.status().as_str().cmp(b.status().as_str()),
        UserSortField::LastActive => compare_timestamps(a.last_active(), b.last_active()),
    }
}

// ===== Tests =====
