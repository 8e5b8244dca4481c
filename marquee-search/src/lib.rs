//! Marquee Search - movie search orchestration

#![deny(missing_docs)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Runs keyword searches against a movie-data provider, resolves every hit to
//! its full record in one concurrent batch, and owns the browsing session
//! state the presentation layer renders.

pub mod browser;
pub mod controller;
pub mod errors;
pub mod providers;
pub mod types;

// Re-export main types
pub use browser::{BrowserView, MovieBrowser, ResultRow};
pub use controller::SearchController;
pub use errors::MovieSearchError;
pub use providers::{DemoProvider, MovieProvider, OmdbProvider};
pub use types::{
    NO_RESULTS_MESSAGE, SEARCH_FAILED_MESSAGE, SearchEvent, SearchOutcome, SearchState,
};

/// Convenience type alias for Results with MovieSearchError.
pub type Result<T> = std::result::Result<T, MovieSearchError>;
