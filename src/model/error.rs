//! Error taxonomy for the dashboard core.
//!
//! Structured errors via `thiserror`, composing with `?` and `From`.
//! The split mirrors the error-handling design: rejection at the point of
//! use for invalid input, exclusion (not errors) for referential gaps and
//! malformed timestamps, and fatal-to-startup errors only for seed,
//! config, and logging failures.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error for embedders that want a single failure type.
///
/// Only startup concerns appear here. Nothing in the engine or the
/// selection state produces an `AppError`; those surfaces either exclude
/// bad rows silently or reject input with [`ComposeError`].
#[derive(Debug, Error)]
pub enum AppError {
    /// Seed data failed to deserialize.
    #[error("Failed to load seed data: {0}")]
    Seed(#[from] SeedError),

    /// Config file was unreadable or invalid.
    #[error("Failed to load configuration: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing subscriber could not be initialized.
    #[error("Failed to initialize logging: {0}")]
    Logging(#[from] crate::logging::LoggingError),
}

/// Errors from loading the seed collections.
///
/// A conversation referencing a missing user is NOT a seed error - the
/// referential-gap rule excludes such rows from views at derivation time.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The JSON document did not match the expected shape.
    #[error("Malformed {collection} seed data: {source}")]
    Malformed {
        /// Which collection failed ("users" or "conversations").
        collection: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// A seed file path could not be read.
    #[error("Failed to read seed file at {path:?}: {source}")]
    Read {
        /// The path that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Rejections from the conversation composer.
///
/// Each variant is a no-op from the caller's point of view: the store is
/// untouched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    /// Send request carried empty or whitespace-only content.
    #[error("rejected: empty content")]
    EmptyContent,

    /// The target conversation does not exist in the store.
    #[error("rejected: unknown conversation")]
    UnknownConversation,

    /// An automated reply is already pending for this conversation.
    /// At most one reply is in flight per conversation.
    #[error("rejected: a reply is already pending for this conversation")]
    ReplyPending,

    /// A reply resolution arrived with no matching pending request.
    #[error("rejected: no pending reply for this conversation")]
    NoPendingReply,
}
