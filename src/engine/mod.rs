//! Selection/filter/sort engine (pure).
//!
//! Derives read-only, ordered views of the entity collections for
//! display. Every function here is deterministic, side-effect-free, and
//! safe to call repeatedly; the cache module adds memoization on top
//! without changing observable results.

pub mod cache;
pub mod stats;
pub mod user_view;
pub mod view;

// Re-export for convenience
pub use cache::{ViewCache, DEFAULT_VIEW_CACHE_CAPACITY};
pub use stats::DashboardStats;
pub use user_view::{build_user_view, UserFilter, UserSortField, UserViewParams};
pub use view::{
    build_view, ConversationFilter, ConversationSortField, ConversationViewParams, SortDirection,
    ViewRow,
};
