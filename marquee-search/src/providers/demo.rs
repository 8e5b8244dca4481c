//! Demo provider implementation for offline development.

use async_trait::async_trait;
use marquee_core::{MISSING_VALUE, MovieRecord, MovieSummary};

use super::MovieProvider;
use crate::errors::MovieSearchError;
use crate::types::SearchOutcome;

/// Built-in catalogue as (id, title, year, rating).
const CATALOGUE: &[(&str, &str, &str, &str)] = &[
    ("tt1375666", "Inception", "2010", "8.8"),
    ("tt0133093", "The Matrix", "1999", "8.7"),
    ("tt0234215", "The Matrix Reloaded", "2003", "7.2"),
    ("tt0242653", "The Matrix Revolutions", "2003", "6.7"),
    ("tt10838180", "The Matrix Resurrections", "2021", "5.6"),
    ("tt0816692", "Interstellar", "2014", "8.7"),
    ("tt0468569", "The Dark Knight", "2008", "9.0"),
    ("tt0120737", "The Lord of the Rings: The Fellowship of the Ring", "2001", "8.9"),
    ("tt0137523", "Fight Club", "1999", "8.8"),
    ("tt0120689", "The Green Mile", "1999", "8.6"),
    ("tt0411008", "Lost", "2004–2010", "8.3"),
    ("tt30144839", "The Matrix: Unreleased Cut", "2026", MISSING_VALUE),
];

/// Demo provider for development and testing.
///
/// Answers from a small built-in catalogue without external API calls.
/// Matching is a case-insensitive substring search on titles.
#[derive(Debug, Default)]
pub struct DemoProvider;

impl DemoProvider {
    /// Creates a demo provider.
    pub fn new() -> Self {
        Self
    }

    fn record(entry: &(&str, &str, &str, &str)) -> MovieRecord {
        let (id, title, year, rating) = *entry;
        MovieRecord::new(id, title, year, MISSING_VALUE, rating)
    }
}

#[async_trait]
impl MovieProvider for DemoProvider {
    async fn search(&self, query: &str) -> Result<SearchOutcome, MovieSearchError> {
        let needle = query.trim().to_lowercase();
        let summaries: Vec<MovieSummary> = CATALOGUE
            .iter()
            .filter(|(_, title, _, _)| title.to_lowercase().contains(&needle))
            .map(|entry| {
                let record = Self::record(entry);
                MovieSummary {
                    id: record.id,
                    title: record.title,
                    year: record.year,
                    poster: record.poster,
                }
            })
            .collect();

        if summaries.is_empty() {
            Ok(SearchOutcome::NotFound {
                message: Some("Movie not found!".to_string()),
            })
        } else {
            Ok(SearchOutcome::Found(summaries))
        }
    }

    async fn fetch_details(&self, id: &str) -> Result<MovieRecord, MovieSearchError> {
        CATALOGUE
            .iter()
            .find(|(entry_id, _, _, _)| *entry_id == id)
            .map(Self::record)
            .ok_or_else(|| MovieSearchError::ProviderError {
                reason: "Incorrect IMDb ID.".to_string(),
            })
    }
}
