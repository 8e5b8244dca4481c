//! Application state for a movie browsing session.
//!
//! [`MovieBrowser`] is the single owner of everything the presentation layer
//! shows: the search controller, the active filter and sort settings, and the
//! favorites list. Each hook mutates that state synchronously (or, for
//! searches, once the provider resolves); the presentation layer re-renders
//! from [`MovieBrowser::snapshot`] after every hook returns.

use std::sync::Arc;

use marquee_core::{
    FavoritesStore, FilterCriteria, KeyValueStore, MovieRecord, SortKey, leading_number, process,
};
use serde::Serialize;
use tokio::sync::broadcast;

use crate::controller::SearchController;
use crate::errors::MovieSearchError;
use crate::providers::MovieProvider;
use crate::types::{SearchEvent, SearchState};

/// Search, filter, sort and favorites state of one session.
#[derive(Debug)]
pub struct MovieBrowser<S: KeyValueStore> {
    search: SearchController,
    criteria: FilterCriteria,
    sort_key: SortKey,
    favorites: FavoritesStore<S>,
}

/// One row of the processed result list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    /// The record shown in this row
    pub record: MovieRecord,
    /// Whether the record is currently a favorite
    pub is_favorite: bool,
}

/// Everything the presentation layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrowserView {
    /// Text of the last submitted query
    pub query_text: String,
    /// True while a search is in flight
    pub is_loading: bool,
    /// User-visible error, empty when there is none
    pub error_message: String,
    /// Filtered and sorted results
    pub results: Vec<ResultRow>,
    /// Number of results before filtering
    pub unfiltered_count: usize,
    /// Favorites in insertion order
    pub favorites: Vec<MovieRecord>,
    /// Active filter settings
    pub criteria: FilterCriteria,
    /// Active sort key
    pub sort_key: SortKey,
    /// True when the "try searching" hint should be shown
    pub show_empty_hint: bool,
}

impl<S: KeyValueStore> MovieBrowser<S> {
    /// Starts a session, loading favorites from `storage`.
    pub fn new(provider: Arc<dyn MovieProvider>, storage: S) -> Self {
        Self::with_favorites(provider, FavoritesStore::load(storage))
    }

    /// Starts a session with an already loaded favorites store.
    pub fn with_favorites(provider: Arc<dyn MovieProvider>, favorites: FavoritesStore<S>) -> Self {
        Self {
            search: SearchController::new(provider),
            criteria: FilterCriteria::default(),
            sort_key: SortKey::None,
            favorites,
        }
    }

    /// Submits a search query. Returns `false` for blank input.
    pub async fn submit_query(&mut self, text: &str) -> bool {
        self.search.submit_query(text).await
    }

    /// Sets the year filter from raw input; blank clears it.
    pub fn set_year_filter(&mut self, year: &str) {
        self.criteria.year_equals = FilterCriteria::from_inputs(year, "").year_equals;
    }

    /// Sets the minimum-rating filter from raw input; blank or non-numeric
    /// input clears it.
    pub fn set_min_rating(&mut self, min_rating: &str) {
        self.criteria.min_rating = leading_number(min_rating);
    }

    /// Replaces all filter settings.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    /// Sets the sort key.
    pub fn set_sort_key(&mut self, sort_key: SortKey) {
        self.sort_key = sort_key;
    }

    /// Toggles the favorite status of the record with `id`.
    ///
    /// The record is looked up among the current results first, then among
    /// the favorites, so a favorite can be removed after the results moved on.
    /// Returns whether the record is a favorite afterwards.
    ///
    /// # Errors
    ///
    /// - `MovieSearchError::RecordNotFound` - If no result or favorite has this id
    /// - `MovieSearchError::Storage` - If persisting failed; the toggle itself still applied
    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool, MovieSearchError> {
        let record = self
            .search
            .state()
            .results
            .iter()
            .find(|record| record.id == id)
            .or_else(|| self.favorites.get(id))
            .cloned()
            .ok_or_else(|| MovieSearchError::RecordNotFound { id: id.to_string() })?;

        self.toggle_record(&record)
    }

    /// Toggles the favorite status of `record` directly.
    ///
    /// # Errors
    ///
    /// - `MovieSearchError::Storage` - If persisting failed; the toggle itself still applied
    pub fn toggle_record(&mut self, record: &MovieRecord) -> Result<bool, MovieSearchError> {
        let now_favorite = self.favorites.toggle(record)?;
        tracing::debug!(
            "{} '{}' ({})",
            if now_favorite { "Favorited" } else { "Unfavorited" },
            record.title,
            record.id
        );
        Ok(now_favorite)
    }

    /// Current search state.
    pub fn search_state(&self) -> &SearchState {
        self.search.state()
    }

    /// Subscribes to search state transitions.
    pub fn subscribe(&self) -> broadcast::Receiver<SearchEvent> {
        self.search.subscribe()
    }

    /// Active filter settings.
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Active sort key.
    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    /// Current results after filtering and sorting.
    pub fn visible_results(&self) -> Vec<MovieRecord> {
        process(&self.search.state().results, &self.criteria, self.sort_key)
    }

    /// Favorites in insertion order.
    pub fn favorites(&self) -> &[MovieRecord] {
        self.favorites.records()
    }

    /// Checks whether the record with `id` is a favorite.
    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.is_favorite(id)
    }

    /// Builds a render-ready view of the whole session.
    pub fn snapshot(&self) -> BrowserView {
        let state = self.search.state();
        let results = self
            .visible_results()
            .into_iter()
            .map(|record| ResultRow {
                is_favorite: self.is_favorite(&record.id),
                record,
            })
            .collect();

        BrowserView {
            query_text: state.query_text.clone(),
            is_loading: state.is_loading,
            error_message: state.error_message.clone(),
            results,
            unfiltered_count: state.results.len(),
            favorites: self.favorites.records().to_vec(),
            criteria: self.criteria.clone(),
            sort_key: self.sort_key,
            show_empty_hint: !state.has_error() && state.results.is_empty() && !state.is_loading,
        }
    }
}

#[cfg(test)]
mod tests {
    use marquee_core::{FAVORITES_KEY, MISSING_VALUE, MemoryStore};

    use super::*;
    use crate::providers::MockProvider;

    fn record(id: &str, year: &str, rating: &str) -> MovieRecord {
        MovieRecord::new(id, format!("Movie {id}"), year, MISSING_VALUE, rating)
    }

    fn browser(storage: MemoryStore) -> MovieBrowser<MemoryStore> {
        let provider = MockProvider::new().with_movies(
            "matrix",
            vec![
                record("tt1", "1999", "8.7"),
                record("tt2", "2003", "7.2"),
                record("tt3", "2003", "N/A"),
                record("tt4", "1999", "6.1"),
            ],
        );
        MovieBrowser::new(Arc::new(provider), storage)
    }

    fn ids(view: &BrowserView) -> Vec<&str> {
        view.results.iter().map(|row| row.record.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_filters_and_sort_apply_to_results() {
        let mut browser = browser(MemoryStore::new());
        browser.submit_query("matrix").await;

        browser.set_year_filter("1999");
        assert_eq!(ids(&browser.snapshot()), vec!["tt1", "tt4"]);

        browser.set_sort_key(SortKey::RatingAscending);
        assert_eq!(ids(&browser.snapshot()), vec!["tt4", "tt1"]);

        browser.set_year_filter("");
        browser.set_min_rating("7");
        assert_eq!(ids(&browser.snapshot()), vec!["tt2", "tt1"]);

        browser.set_min_rating("");
        browser.set_sort_key(SortKey::None);
        let view = browser.snapshot();
        assert_eq!(ids(&view), vec!["tt1", "tt2", "tt3", "tt4"]);
        assert_eq!(view.unfiltered_count, 4);
    }

    #[tokio::test]
    async fn test_filter_changes_keep_other_criterion() {
        let mut browser = browser(MemoryStore::new());
        browser.set_min_rating("7.5");
        browser.set_year_filter("1999");

        assert_eq!(
            browser.criteria(),
            &FilterCriteria {
                year_equals: Some("1999".to_string()),
                min_rating: Some(7.5),
            }
        );
    }

    #[tokio::test]
    async fn test_toggle_favorite_from_results_and_after_new_search() {
        let storage = MemoryStore::new();
        let mut browser = browser(storage.clone());
        browser.submit_query("matrix").await;

        assert!(browser.toggle_favorite("tt2").unwrap());
        assert!(browser.snapshot().results[1].is_favorite);

        // Results move on; the favorite can still be removed by id.
        browser.submit_query("nothing").await;
        assert!(browser.search_state().results.is_empty());
        assert!(!browser.toggle_favorite("tt2").unwrap());

        assert!(browser.favorites().is_empty());
        assert_eq!(storage.write_count(), 2);
    }

    #[tokio::test]
    async fn test_toggle_unknown_id_is_error() {
        let storage = MemoryStore::new();
        let mut browser = browser(storage.clone());

        assert!(matches!(
            browser.toggle_favorite("tt404"),
            Err(MovieSearchError::RecordNotFound { .. })
        ));
        assert_eq!(storage.write_count(), 0);
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces_but_toggle_applies() {
        let storage = MemoryStore::new();
        let mut browser = browser(storage.clone());
        browser.submit_query("matrix").await;
        storage.set_fail_writes(true);

        assert!(matches!(
            browser.toggle_favorite("tt1"),
            Err(MovieSearchError::Storage(_))
        ));
        assert!(browser.is_favorite("tt1"));
    }

    #[tokio::test]
    async fn test_favorites_loaded_at_startup() {
        let stored = serde_json::to_string(&vec![record("tt9", "1982", "8.1")]).unwrap();
        let browser = browser(MemoryStore::with_entry(FAVORITES_KEY, &stored));

        assert_eq!(browser.favorites().len(), 1);
        assert!(browser.is_favorite("tt9"));
    }

    #[tokio::test]
    async fn test_empty_hint_visibility() {
        let mut browser = browser(MemoryStore::new());
        assert!(browser.snapshot().show_empty_hint);

        browser.submit_query("matrix").await;
        assert!(!browser.snapshot().show_empty_hint);

        browser.submit_query("nothing").await;
        let view = browser.snapshot();
        assert!(!view.show_empty_hint);
        assert_eq!(view.error_message, "No results.");
    }

    #[tokio::test]
    async fn test_filtered_to_nothing_does_not_show_hint() {
        let mut browser = browser(MemoryStore::new());
        browser.submit_query("matrix").await;
        browser.set_year_filter("1850");

        let view = browser.snapshot();
        assert!(view.results.is_empty());
        assert!(!view.show_empty_hint);
    }
}
