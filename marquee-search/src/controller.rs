//! Search orchestration: keyword search followed by a concurrent batch of
//! detail fetches.

use std::sync::Arc;

use futures::future::try_join_all;
use marquee_core::MovieRecord;
use tokio::sync::broadcast;

use crate::errors::MovieSearchError;
use crate::providers::MovieProvider;
use crate::types::{
    NO_RESULTS_MESSAGE, SEARCH_FAILED_MESSAGE, SearchEvent, SearchOutcome, SearchState,
};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Owns query submission and the resulting search state.
///
/// Each submission runs a two-stage fetch against the provider: one keyword
/// search, then every hit's detail record fetched concurrently. The detail
/// batch is all-or-nothing; one failure fails the whole search.
///
/// `submit_query` borrows the controller mutably, so a second submission
/// cannot start until the first one has resolved.
#[derive(Debug)]
pub struct SearchController {
    provider: Arc<dyn MovieProvider>,
    state: SearchState,
    events: broadcast::Sender<SearchEvent>,
}

/// How a search resolved before it is written into state.
enum SearchResolution {
    Records(Vec<MovieRecord>),
    NotFound(String),
}

impl SearchController {
    /// Creates a controller with empty state.
    pub fn new(provider: Arc<dyn MovieProvider>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            provider,
            state: SearchState::default(),
            events,
        }
    }

    /// Current search state.
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Subscribes to state transitions from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<SearchEvent> {
        self.events.subscribe()
    }

    /// Submits a query and waits for it to resolve.
    ///
    /// Returns `false` without touching state when `text` is blank. Otherwise
    /// loading is raised, the search runs, results or an error message are
    /// written, and loading is lowered again on every path, including when
    /// the returned future is dropped early.
    pub async fn submit_query(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }

        let provider = Arc::clone(&self.provider);
        let mut loading = LoadingGuard::begin(&mut self.state, &self.events, text);

        match fetch_records(provider.as_ref(), text).await {
            Ok(SearchResolution::Records(records)) => {
                tracing::info!("Search '{}' returned {} movies", text, records.len());
                loading.set_results(records);
            }
            Ok(SearchResolution::NotFound(message)) => {
                tracing::info!("Search '{}' found nothing: {}", text, message);
                loading.set_no_results(message);
            }
            Err(e) => {
                tracing::warn!("Search '{}' failed: {}", text, e);
                loading.set_failed(SEARCH_FAILED_MESSAGE);
            }
        }

        true
    }
}

/// Runs both fetch stages for `query`.
async fn fetch_records(
    provider: &dyn MovieProvider,
    query: &str,
) -> Result<SearchResolution, MovieSearchError> {
    let summaries = match provider.search(query).await? {
        SearchOutcome::Found(summaries) => summaries,
        SearchOutcome::NotFound { message } => {
            let message = message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| NO_RESULTS_MESSAGE.to_string());
            return Ok(SearchResolution::NotFound(message));
        }
    };

    tracing::debug!("Fetching details for {} summaries", summaries.len());

    let detail_fetches = summaries.iter().map(|summary| async move {
        provider
            .fetch_details(&summary.id)
            .await
            .map_err(|e| MovieSearchError::DetailFetchFailed {
                id: summary.id.clone(),
                reason: e.to_string(),
            })
    });

    let records = try_join_all(detail_fetches).await?;
    Ok(SearchResolution::Records(records))
}

/// Holds the loading flag raised for the lifetime of one submission.
///
/// Dropping the guard lowers the flag and publishes `Finished`.
struct LoadingGuard<'a> {
    state: &'a mut SearchState,
    events: &'a broadcast::Sender<SearchEvent>,
}

impl<'a> LoadingGuard<'a> {
    fn begin(
        state: &'a mut SearchState,
        events: &'a broadcast::Sender<SearchEvent>,
        query: &str,
    ) -> Self {
        state.query_text = query.to_string();
        state.is_loading = true;
        state.error_message.clear();

        // No subscribers is fine; events are advisory.
        let _ = events.send(SearchEvent::Started {
            query: query.to_string(),
        });

        Self { state, events }
    }

    fn set_results(&mut self, records: Vec<MovieRecord>) {
        let count = records.len();
        self.state.results = records;
        let _ = self.events.send(SearchEvent::Completed { count });
    }

    fn set_no_results(&mut self, message: String) {
        self.state.results.clear();
        self.state.error_message = message.clone();
        let _ = self.events.send(SearchEvent::NoResults { message });
    }

    fn set_failed(&mut self, message: &str) {
        self.state.results.clear();
        self.state.error_message = message.to_string();
        let _ = self.events.send(SearchEvent::Failed {
            message: message.to_string(),
        });
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.is_loading = false;
        let _ = self.events.send(SearchEvent::Finished);
    }
}
