//! Error types for movie search functionality.

use marquee_core::StorageError;
use thiserror::Error;

/// Errors that can occur during movie search operations.
#[derive(Debug, Error)]
pub enum MovieSearchError {
    /// Network communication error occurred during search.
    #[error("Network error: {reason}")]
    NetworkError {
        /// The reason for the network error
        reason: String,
    },

    /// Failed to parse search results or response data.
    #[error("Parse error: {reason}")]
    ParseError {
        /// The reason for the parse error
        reason: String,
    },

    /// Provider answered with an error status.
    #[error("Provider error: {reason}")]
    ProviderError {
        /// The reason for the provider error
        reason: String,
    },

    /// Fetching the full record for one search hit failed.
    #[error("Detail fetch failed for '{id}': {reason}")]
    DetailFetchFailed {
        /// Identifier of the record that could not be fetched
        id: String,
        /// The reason for the failure
        reason: String,
    },

    /// Provider settings are unusable.
    #[error("Invalid provider configuration: {reason}")]
    InvalidConfiguration {
        /// What is wrong with the configuration
        reason: String,
    },

    /// No current result or favorite has the requested id.
    #[error("No movie with id '{id}' in results or favorites")]
    RecordNotFound {
        /// The requested identifier
        id: String,
    },

    /// Favorites could not be persisted.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
