//! Integration tests for the search, filter and favorites workflow.
//!
//! These tests drive the public MovieBrowser and SearchController APIs with
//! scripted providers, covering the two-stage fetch, the concurrent detail
//! batch and favorites persistence through both storage backends.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use marquee_core::{
    FAVORITES_KEY, FavoritesStore, FileStore, KeyValueStore, MemoryStore, MovieRecord,
    MovieSummary, SortKey,
};
use marquee_search::{
    MovieBrowser, MovieProvider, MovieSearchError, SEARCH_FAILED_MESSAGE, SearchController,
    SearchEvent, SearchOutcome,
};
use tempfile::TempDir;
use tokio::sync::Barrier;
use tokio::time::timeout;

/// Provider answering from fixed tables, optionally holding every detail
/// fetch at a barrier until the whole batch has arrived.
#[derive(Debug, Default)]
struct ScriptedProvider {
    searches: HashMap<String, Vec<MovieSummary>>,
    details: HashMap<String, MovieRecord>,
    batch_barrier: Option<Arc<Barrier>>,
}

impl ScriptedProvider {
    fn with_movie(mut self, query: &str, record: MovieRecord) -> Self {
        self.searches
            .entry(query.to_string())
            .or_default()
            .push(MovieSummary {
                id: record.id.clone(),
                title: record.title.clone(),
                year: record.year.clone(),
                poster: record.poster.clone(),
            });
        self.details.insert(record.id.clone(), record);
        self
    }

    fn with_batch_barrier(mut self, batch_size: usize) -> Self {
        self.batch_barrier = Some(Arc::new(Barrier::new(batch_size)));
        self
    }
}

#[async_trait]
impl MovieProvider for ScriptedProvider {
    async fn search(&self, query: &str) -> Result<SearchOutcome, MovieSearchError> {
        Ok(match self.searches.get(query) {
            Some(summaries) => SearchOutcome::Found(summaries.clone()),
            None => SearchOutcome::NotFound {
                message: Some("Movie not found!".to_string()),
            },
        })
    }

    async fn fetch_details(&self, id: &str) -> Result<MovieRecord, MovieSearchError> {
        if let Some(barrier) = &self.batch_barrier {
            barrier.wait().await;
        }
        self.details
            .get(id)
            .cloned()
            .ok_or_else(|| MovieSearchError::ProviderError {
                reason: "Incorrect IMDb ID.".to_string(),
            })
    }
}

fn inception() -> MovieRecord {
    MovieRecord::new(
        "tt1375666",
        "Inception",
        "2010",
        "https://m.media-amazon.com/images/inception.jpg",
        "8.8",
    )
}

fn matrix_records() -> Vec<MovieRecord> {
    vec![
        MovieRecord::new("tt0133093", "The Matrix", "1999", "N/A", "8.7"),
        MovieRecord::new("tt0234215", "The Matrix Reloaded", "2003", "N/A", "7.2"),
        MovieRecord::new("tt0242653", "The Matrix Revolutions", "2003", "N/A", "6.7"),
        MovieRecord::new("tt9999999", "The Matrix Documentary", "2003", "N/A", "N/A"),
    ]
}

#[tokio::test]
async fn test_inception_end_to_end() {
    let storage = MemoryStore::new();
    let provider = ScriptedProvider::default().with_movie("Inception", inception());
    let mut browser = MovieBrowser::new(Arc::new(provider), storage.clone());

    assert!(browser.submit_query("Inception").await);
    assert_eq!(browser.search_state().results, vec![inception()]);
    assert!(browser.search_state().error_message.is_empty());

    assert!(browser.toggle_favorite("tt1375666").unwrap());
    assert_eq!(browser.favorites(), &[inception()]);
    assert_eq!(storage.write_count(), 1);

    let stored = storage.value(FAVORITES_KEY).unwrap();
    let persisted: Vec<MovieRecord> = serde_json::from_str(&stored).unwrap();
    assert_eq!(persisted, vec![inception()]);

    let raw: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(raw[0]["imdbID"], "tt1375666");
    assert_eq!(raw[0]["Title"], "Inception");
}

#[tokio::test]
async fn test_detail_fetches_run_as_one_concurrent_batch() {
    let mut provider = ScriptedProvider::default();
    for record in matrix_records() {
        provider = provider.with_movie("matrix", record);
    }
    // Every fetch waits until all four are in flight; a sequential batch would stall.
    let provider = provider.with_batch_barrier(4);
    let mut controller = SearchController::new(Arc::new(provider));

    let submitted = timeout(Duration::from_secs(5), controller.submit_query("matrix"))
        .await
        .expect("detail fetches should run concurrently");

    assert!(submitted);
    assert_eq!(controller.state().results, matrix_records());
}

#[tokio::test]
async fn test_results_keep_provider_order_and_sort_on_demand() {
    let mut provider = ScriptedProvider::default();
    for record in matrix_records() {
        provider = provider.with_movie("matrix", record);
    }
    let mut browser = MovieBrowser::new(Arc::new(provider), MemoryStore::new());
    browser.submit_query("matrix").await;

    let titles = |browser: &MovieBrowser<MemoryStore>| -> Vec<String> {
        browser
            .visible_results()
            .into_iter()
            .map(|record| record.title)
            .collect()
    };

    assert_eq!(
        titles(&browser),
        vec![
            "The Matrix",
            "The Matrix Reloaded",
            "The Matrix Revolutions",
            "The Matrix Documentary"
        ]
    );

    browser.set_sort_key(SortKey::RatingDescending);
    assert_eq!(
        titles(&browser),
        vec![
            "The Matrix",
            "The Matrix Reloaded",
            "The Matrix Revolutions",
            "The Matrix Documentary"
        ]
    );

    browser.set_sort_key(SortKey::YearDescending);
    browser.set_min_rating("7");
    assert_eq!(
        titles(&browser),
        vec!["The Matrix Reloaded", "The Matrix"]
    );

    // Underlying results stay untouched by filtering and sorting.
    assert_eq!(browser.search_state().results, matrix_records());
}

#[tokio::test]
async fn test_missing_detail_fails_whole_search() {
    let mut provider = ScriptedProvider::default().with_movie("Inception", inception());
    provider.details.clear();
    let mut browser = MovieBrowser::new(Arc::new(provider), MemoryStore::new());
    let mut events = browser.subscribe();

    browser.submit_query("Inception").await;

    let view = browser.snapshot();
    assert!(view.results.is_empty());
    assert_eq!(view.error_message, SEARCH_FAILED_MESSAGE);
    assert!(!view.is_loading);

    assert_eq!(
        events.recv().await.unwrap(),
        SearchEvent::Started {
            query: "Inception".to_string()
        }
    );
    assert_eq!(
        events.recv().await.unwrap(),
        SearchEvent::Failed {
            message: SEARCH_FAILED_MESSAGE.to_string()
        }
    );
    assert_eq!(events.recv().await.unwrap(), SearchEvent::Finished);
}

#[tokio::test]
async fn test_favorites_survive_restart_with_file_store() {
    let temp_dir = TempDir::new().unwrap();
    let provider: Arc<dyn MovieProvider> =
        Arc::new(ScriptedProvider::default().with_movie("Inception", inception()));

    {
        let mut browser = MovieBrowser::new(provider.clone(), FileStore::new(temp_dir.path()));
        browser.submit_query("Inception").await;
        browser.toggle_favorite("tt1375666").unwrap();
    }

    let browser = MovieBrowser::new(provider, FileStore::new(temp_dir.path()));
    assert_eq!(browser.favorites(), &[inception()]);
    assert!(browser.is_favorite("tt1375666"));
}

#[tokio::test]
async fn test_corrupt_favorites_file_starts_empty() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::new(temp_dir.path());
    store.set(FAVORITES_KEY, "{not valid json").unwrap();

    let favorites = FavoritesStore::load(store.clone());
    assert!(favorites.is_empty());

    // The first toggle overwrites the corrupt content with a valid list.
    let mut favorites = favorites;
    favorites.toggle(&inception()).unwrap();
    let reloaded = FavoritesStore::load(store);
    assert_eq!(reloaded.records(), &[inception()]);
}
