//! Centralized configuration for Marquee.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::path::PathBuf;
use std::time::Duration;

/// Central configuration for all Marquee components.
///
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct MarqueeConfig {
    pub provider: ProviderConfig,
    pub storage: StorageConfig,
}

/// Movie-data provider configuration.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL of the OMDb-compatible API
    pub base_url: String,
    /// API key appended to every request, if set
    pub api_key: Option<String>,
    /// Timeout applied to each HTTP request
    pub request_timeout: Duration,
    /// User agent for HTTP requests
    pub user_agent: &'static str,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.omdbapi.com/".to_string(),
            api_key: None,
            request_timeout: Duration::from_secs(30),
            user_agent: "marquee/0.1.0",
        }
    }
}

/// Local persistence configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding persisted client state
    pub data_dir: PathBuf,
    /// Key under which favorites are stored
    pub favorites_key: String,
    /// Suffix for in-progress writes
    pub temp_file_suffix: &'static str,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".marquee"),
            favorites_key: crate::favorites::FAVORITES_KEY.to_string(),
            temp_file_suffix: ".tmp",
        }
    }
}

impl MarqueeConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Allows runtime configuration via environment variables while
    /// maintaining sensible defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(api_key) = std::env::var("OMDB_API_KEY")
            && !api_key.trim().is_empty()
        {
            config.provider.api_key = Some(api_key.trim().to_string());
        }

        if let Ok(base_url) = std::env::var("MARQUEE_OMDB_URL") {
            config.provider.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("MARQUEE_REQUEST_TIMEOUT")
            && let Ok(seconds) = timeout.parse::<u64>()
        {
            config.provider.request_timeout = Duration::from_secs(seconds);
        }

        if let Ok(data_dir) = std::env::var("MARQUEE_DATA_DIR") {
            config.storage.data_dir = PathBuf::from(data_dir);
        }

        config
    }

    /// Creates a configuration for tests: short timeouts and a local
    /// provider address that is never contacted.
    pub fn for_testing() -> Self {
        Self {
            provider: ProviderConfig {
                base_url: "http://127.0.0.1:9/".to_string(),
                api_key: Some("test-key".to_string()),
                request_timeout: Duration::from_secs(2),
                ..ProviderConfig::default()
            },
            storage: StorageConfig {
                data_dir: std::env::temp_dir().join("marquee-test"),
                ..StorageConfig::default()
            },
        }
    }
}
