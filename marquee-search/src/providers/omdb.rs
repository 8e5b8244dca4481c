//! OMDb movie-data provider.

use async_trait::async_trait;
use marquee_core::config::ProviderConfig;
use marquee_core::{MISSING_VALUE, MovieRecord, MovieSummary};
use serde::{Deserialize, Serialize};
use url::Url;

use super::MovieProvider;
use crate::errors::MovieSearchError;
use crate::types::SearchOutcome;

/// Provider backed by the OMDb HTTP API.
///
/// Keyword searches use the `s` parameter and detail lookups the `i`
/// parameter. OMDb reports failures in-band through its `Response` field
/// rather than HTTP status codes.
#[derive(Debug, Clone)]
pub struct OmdbProvider {
    client: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
}

/// Response from the OMDb search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmdbSearchResponse {
    /// Matching summaries
    #[serde(rename = "Search")]
    pub search: Option<Vec<MovieSummary>>,
    /// Total number of matches as a string
    #[serde(rename = "totalResults")]
    pub total_results: Option<String>,
    /// API response status
    #[serde(rename = "Response")]
    pub response: Option<String>,
    /// Error message if request failed
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

/// Response from the OMDb detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmdbDetailResponse {
    /// IMDb identifier
    #[serde(rename = "imdbID")]
    pub imdb_id: Option<String>,
    /// Title of the movie
    #[serde(rename = "Title")]
    pub title: Option<String>,
    /// Release year as string
    #[serde(rename = "Year")]
    pub year: Option<String>,
    /// URL to poster image
    #[serde(rename = "Poster")]
    pub poster: Option<String>,
    /// IMDb rating as string
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
    /// API response status
    #[serde(rename = "Response")]
    pub response: Option<String>,
    /// Error message if request failed
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

impl OmdbProvider {
    /// Create an OMDb provider from configuration.
    ///
    /// # Errors
    ///
    /// - `MovieSearchError::InvalidConfiguration` - If the base URL is invalid or the HTTP client cannot be built
    pub fn new(config: &ProviderConfig) -> Result<Self, MovieSearchError> {
        let base_url =
            Url::parse(&config.base_url).map_err(|e| MovieSearchError::InvalidConfiguration {
                reason: format!("base URL '{}': {e}", config.base_url),
            })?;

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| MovieSearchError::InvalidConfiguration {
                reason: format!("HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// URL for a keyword search.
    pub fn search_url(&self, query: &str) -> Url {
        self.request_url(&[("s", query)])
    }

    /// URL for a detail lookup.
    pub fn detail_url(&self, id: &str) -> Url {
        self.request_url(&[("i", id)])
    }

    fn request_url(&self, params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(ref api_key) = self.api_key {
                pairs.append_pair("apikey", api_key);
            }
            for (name, value) in params {
                pairs.append_pair(name, value);
            }
        }
        url
    }

    async fn get_body(&self, url: Url) -> Result<String, MovieSearchError> {
        tracing::debug!("OMDb request: {}", redact_api_key(&url));

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| MovieSearchError::NetworkError {
                reason: format!("HTTP request failed: {e}"),
            })?;

        response
            .text()
            .await
            .map_err(|e| MovieSearchError::NetworkError {
                reason: format!("Reading response body failed: {e}"),
            })
    }
}

#[async_trait]
impl MovieProvider for OmdbProvider {
    async fn search(&self, query: &str) -> Result<SearchOutcome, MovieSearchError> {
        let body = self.get_body(self.search_url(query)).await?;
        parse_search_response(&body)
    }

    async fn fetch_details(&self, id: &str) -> Result<MovieRecord, MovieSearchError> {
        let body = self.get_body(self.detail_url(id)).await?;
        parse_detail_response(&body)
    }
}

/// Interpret the body of an OMDb search response.
///
/// # Errors
///
/// - `MovieSearchError::ParseError` - If the body is not JSON or a successful response lacks its result list
pub fn parse_search_response(body: &str) -> Result<SearchOutcome, MovieSearchError> {
    let response: OmdbSearchResponse =
        serde_json::from_str(body).map_err(|e| MovieSearchError::ParseError {
            reason: format!("JSON parsing failed: {e}"),
        })?;

    if response.response.as_deref() == Some("False") {
        return Ok(SearchOutcome::NotFound {
            message: response.error.filter(|e| !e.trim().is_empty()),
        });
    }

    response
        .search
        .map(SearchOutcome::Found)
        .ok_or_else(|| MovieSearchError::ParseError {
            reason: "search response has no result list".to_string(),
        })
}

/// Interpret the body of an OMDb detail response.
///
/// # Errors
///
/// - `MovieSearchError::ParseError` - If the body is not JSON or lacks id, title or year
/// - `MovieSearchError::ProviderError` - If OMDb answered with `Response: "False"`
pub fn parse_detail_response(body: &str) -> Result<MovieRecord, MovieSearchError> {
    let response: OmdbDetailResponse =
        serde_json::from_str(body).map_err(|e| MovieSearchError::ParseError {
            reason: format!("JSON parsing failed: {e}"),
        })?;

    if response.response.as_deref() == Some("False") {
        return Err(MovieSearchError::ProviderError {
            reason: response
                .error
                .unwrap_or_else(|| "Unknown error".to_string()),
        });
    }

    let (Some(id), Some(title), Some(year)) = (response.imdb_id, response.title, response.year)
    else {
        return Err(MovieSearchError::ParseError {
            reason: "detail response is missing imdbID, Title or Year".to_string(),
        });
    };

    Ok(MovieRecord {
        id,
        title,
        year,
        poster: response.poster.unwrap_or_else(|| MISSING_VALUE.to_string()),
        rating: response
            .imdb_rating
            .unwrap_or_else(|| MISSING_VALUE.to_string()),
    })
}

fn redact_api_key(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| {
            let value = if name == "apikey" {
                "***".to_string()
            } else {
                value.into_owned()
            };
            (name.into_owned(), value)
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
