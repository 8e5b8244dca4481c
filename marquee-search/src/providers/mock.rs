//! Mock provider implementation for testing.

#[cfg(test)]
use std::collections::{HashMap, HashSet};
#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(test)]
use async_trait::async_trait;
#[cfg(test)]
use marquee_core::{MovieRecord, MovieSummary};

#[cfg(test)]
use super::MovieProvider;
#[cfg(test)]
use crate::errors::MovieSearchError;
#[cfg(test)]
use crate::types::SearchOutcome;

/// Mock provider for testing.
///
/// Unknown queries answer "not found"; ids listed as failing make their
/// detail fetch return a network error.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockProvider {
    searches: HashMap<String, SearchOutcome>,
    details: HashMap<String, MovieRecord>,
    failing_ids: HashSet<String>,
    search_unreachable: bool,
    detail_calls: AtomicUsize,
}

#[cfg(test)]
impl MockProvider {
    /// Creates a new mock provider for testing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `query` with summaries of `records` and serves their details.
    pub fn with_movies(mut self, query: &str, records: Vec<MovieRecord>) -> Self {
        let summaries = records
            .iter()
            .map(|record| MovieSummary {
                id: record.id.clone(),
                title: record.title.clone(),
                year: record.year.clone(),
                poster: record.poster.clone(),
            })
            .collect();
        self.searches
            .insert(query.to_string(), SearchOutcome::Found(summaries));
        for record in records {
            self.details.insert(record.id.clone(), record);
        }
        self
    }

    /// Answers `query` with an explicit outcome.
    pub fn with_outcome(mut self, query: &str, outcome: SearchOutcome) -> Self {
        self.searches.insert(query.to_string(), outcome);
        self
    }

    /// Makes the detail fetch for `id` fail.
    pub fn with_failing_detail(mut self, id: &str) -> Self {
        self.failing_ids.insert(id.to_string());
        self
    }

    /// Makes every search fail with a network error.
    pub fn unreachable(mut self) -> Self {
        self.search_unreachable = true;
        self
    }

    /// Number of detail fetches served so far.
    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl MovieProvider for MockProvider {
    async fn search(&self, query: &str) -> Result<SearchOutcome, MovieSearchError> {
        if self.search_unreachable {
            return Err(MovieSearchError::NetworkError {
                reason: "mock provider unreachable".to_string(),
            });
        }

        Ok(self
            .searches
            .get(query)
            .cloned()
            .unwrap_or(SearchOutcome::NotFound { message: None }))
    }

    async fn fetch_details(&self, id: &str) -> Result<MovieRecord, MovieSearchError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);

        if self.failing_ids.contains(id) {
            return Err(MovieSearchError::NetworkError {
                reason: format!("mock detail failure for {id}"),
            });
        }

        self.details
            .get(id)
            .cloned()
            .ok_or_else(|| MovieSearchError::ProviderError {
                reason: "Incorrect IMDb ID.".to_string(),
            })
    }
}
