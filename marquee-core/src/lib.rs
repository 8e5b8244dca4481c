//! Marquee Core - movie records, filtering and persisted favorites
//!
//! Side-effect-free building blocks of the movie search client: the record
//! model, the filter/sort pipeline applied to search results, and the
//! favorites list synchronized with key-value storage.

pub mod config;
pub mod favorites;
pub mod processor;
pub mod record;
pub mod storage;
pub mod tracing_setup;

pub use config::MarqueeConfig;
pub use favorites::{FAVORITES_KEY, FavoritesStore};
pub use processor::{FilterCriteria, SortKey, process};
pub use record::{
    MISSING_VALUE, MovieRecord, MovieSummary, POSTER_PLACEHOLDER_URL, leading_number,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};

/// Core errors that can bubble up from any Marquee subsystem.
#[derive(Debug, thiserror::Error)]
pub enum MarqueeError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MarqueeError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            MarqueeError::Storage(StorageError::InvalidKey { key }) => {
                format!("Cannot store data under '{key}'")
            }
            MarqueeError::Storage(_) => "Could not save favorites".to_string(),
            MarqueeError::Configuration { reason } => format!("Configuration problem: {reason}"),
            MarqueeError::Io(_) => "File system error occurred".to_string(),
        }
    }

    /// Checks if this error is due to user input validation.
    pub fn is_user_error(&self) -> bool {
        matches!(self, MarqueeError::Configuration { .. })
    }
}

pub type Result<T> = std::result::Result<T, MarqueeError>;
