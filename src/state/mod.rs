//! UI selection state and the conversation composer.
//!
//! Everything here mutates synchronously on the single UI event
//! timeline; the only asynchrony in the design (automated replies) is
//! represented as data and driven by the embedder.

pub mod app_state;
pub mod composer;

pub use app_state::{ActiveTab, AppState};
pub use composer::{suggested_replies, Composer, PendingReply, DEFAULT_REPLY_DELAY_MS};
