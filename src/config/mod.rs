//! Configuration module.

pub mod loader;

pub use loader::{ConfigError, ConfigFile};

use crate::engine::DEFAULT_VIEW_CACHE_CAPACITY;
use crate::state::DEFAULT_REPLY_DELAY_MS;
use std::path::PathBuf;

/// Resolved application configuration.
///
/// Produced by applying an optional [`ConfigFile`] over the hardcoded
/// defaults; every field always has a usable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Delay before a requested automated reply is due, in milliseconds.
    pub reply_delay_ms: u64,

    /// Remembered projections per derived view.
    pub view_cache_capacity: usize,

    /// Where tracing output goes when the embedder initializes logging.
    /// `None` means the logging module's default location.
    pub log_file_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reply_delay_ms: DEFAULT_REPLY_DELAY_MS,
            view_cache_capacity: DEFAULT_VIEW_CACHE_CAPACITY,
            log_file_path: None,
        }
    }
}
