//! Data types for movie search functionality.

use marquee_core::{MovieRecord, MovieSummary};
use serde::{Deserialize, Serialize};

/// Message shown when the provider reports no results without its own text.
pub const NO_RESULTS_MESSAGE: &str = "No results.";

/// Message shown for any network or parse failure during a search.
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to fetch movies.";

/// Result of a keyword search against a provider.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Matching summaries in provider order
    Found(Vec<MovieSummary>),
    /// Provider reported that nothing matched
    NotFound {
        /// Provider-supplied explanation, if any
        message: Option<String>,
    },
}

/// Search state exposed to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    /// Text of the most recent non-empty submission
    pub query_text: String,
    /// Records of the last completed search, in provider order
    pub results: Vec<MovieRecord>,
    /// True while a submission is in flight
    pub is_loading: bool,
    /// User-visible error, empty when there is none
    pub error_message: String,
}

impl SearchState {
    /// Returns true when an error message is set.
    pub fn has_error(&self) -> bool {
        !self.error_message.is_empty()
    }
}

/// State transitions published by the search controller.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// A submission began; loading is now true
    Started {
        /// Submitted query text
        query: String,
    },
    /// Results were replaced with `count` records
    Completed {
        /// Number of records now in the results
        count: usize,
    },
    /// Provider reported no matches
    NoResults {
        /// Message now shown to the user
        message: String,
    },
    /// The search failed and results were cleared
    Failed {
        /// Message now shown to the user
        message: String,
    },
    /// Loading is now false; sent once per submission on every path
    Finished,
}
