//! Movie-data provider implementations.

use async_trait::async_trait;
use marquee_core::MovieRecord;

use crate::errors::MovieSearchError;
use crate::types::SearchOutcome;

pub mod demo;
pub mod mock;
pub mod omdb;

pub use demo::DemoProvider;
#[cfg(test)]
pub use mock::MockProvider;
pub use omdb::OmdbProvider;

/// Trait for movie-data providers.
///
/// Implementations answer keyword searches with summaries and resolve a
/// summary id to its full record (real APIs, built-in demo data, mocks).
#[async_trait]
pub trait MovieProvider: Send + Sync + std::fmt::Debug {
    /// Search for movies matching `query`.
    ///
    /// A provider-reported "nothing found" is `Ok(SearchOutcome::NotFound)`,
    /// not an error.
    ///
    /// # Errors
    /// - `MovieSearchError::NetworkError` - Network connectivity issues
    /// - `MovieSearchError::ParseError` - Response had an unexpected shape
    async fn search(&self, query: &str) -> Result<SearchOutcome, MovieSearchError>;

    /// Fetch the full record for `id`.
    ///
    /// # Errors
    /// - `MovieSearchError::NetworkError` - Network connectivity issues
    /// - `MovieSearchError::ParseError` - Response had an unexpected shape
    /// - `MovieSearchError::ProviderError` - Provider rejected the id
    async fn fetch_details(&self, id: &str) -> Result<MovieRecord, MovieSearchError>;
}
