//! CLI command implementations

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Subcommand};
use marquee_core::config::MarqueeConfig;
use marquee_core::tracing_setup::CliLogLevel;
use marquee_core::{
    FavoritesStore, FileStore, KeyValueStore, MarqueeError, MemoryStore, SortKey, StorageError,
};
use marquee_search::{DemoProvider, MovieBrowser, MovieProvider, MovieSearchError, OmdbProvider};

use crate::{browse, render};

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Use the built-in offline catalogue instead of OMDb
    #[arg(long, global = true)]
    pub demo: bool,
    /// Keep favorites in memory only for this run
    #[arg(long, global = true)]
    pub ephemeral: bool,
    /// Directory holding persisted favorites
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
    /// OMDb API key (overrides OMDB_API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,
    /// Console log level
    #[arg(long, global = true, value_enum, default_value_t = CliLogLevel::Warn)]
    pub log_level: CliLogLevel,
    /// Directory for the per-run debug log
    #[arg(long, global = true)]
    pub logs_dir: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search movies and print the filtered, sorted results
    Search {
        /// Title text to search for
        query: String,
        /// Only show movies from this year
        #[arg(long)]
        year: Option<String>,
        /// Only show movies rated at least this high
        #[arg(long)]
        min_rating: Option<String>,
        /// Result ordering
        #[arg(long, value_enum, default_value_t = SortKey::None)]
        sort: SortKey,
        /// Print the result view as JSON
        #[arg(long)]
        json: bool,
    },
    /// List saved favorites
    Favorites,
    /// Search, then add or remove one of the results as a favorite
    Toggle {
        /// Title text to search for
        query: String,
        /// IMDb id of the movie to toggle
        id: String,
    },
    /// Interactive session: search, filter, sort and manage favorites
    Browse,
}

/// Storage backend picked from the command-line options.
#[derive(Debug, Clone)]
pub enum SessionStore {
    File(FileStore),
    Memory(MemoryStore),
}

impl KeyValueStore for SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            SessionStore::File(store) => store.get(key),
            SessionStore::Memory(store) => store.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            SessionStore::File(store) => store.set(key, value),
            SessionStore::Memory(store) => store.set(key, value),
        }
    }
}

/// Handle the CLI command
///
/// # Errors
/// Returns appropriate error based on the command that fails
pub async fn handle_command(command: Commands, options: &GlobalOptions) -> anyhow::Result<()> {
    let config = resolve_config(options);

    match command {
        Commands::Search {
            query,
            year,
            min_rating,
            sort,
            json,
        } => {
            search_movies(
                &config,
                options,
                &query,
                year.as_deref(),
                min_rating.as_deref(),
                sort,
                json,
            )
            .await
        }
        Commands::Favorites => list_favorites(&config, options),
        Commands::Toggle { query, id } => toggle_favorite(&config, options, &query, &id).await,
        Commands::Browse => {
            let browser = open_browser(&config, options)?;
            browse::run(browser).await
        }
    }
}

/// Applies command-line overrides on top of the environment configuration.
pub fn resolve_config(options: &GlobalOptions) -> MarqueeConfig {
    let mut config = MarqueeConfig::from_env();

    if let Some(api_key) = options.api_key.as_deref().map(str::trim)
        && !api_key.is_empty()
    {
        config.provider.api_key = Some(api_key.to_string());
    }
    if let Some(data_dir) = &options.data_dir {
        config.storage.data_dir = data_dir.clone();
    }

    config
}

/// Picks the movie-data provider for this run.
///
/// # Errors
///
/// - `MarqueeError::Configuration` - If OMDb is selected without an API key
pub fn build_provider(
    config: &MarqueeConfig,
    options: &GlobalOptions,
) -> Result<Arc<dyn MovieProvider>, MarqueeError> {
    if options.demo {
        tracing::info!("Using demo catalogue");
        return Ok(Arc::new(DemoProvider::new()));
    }

    if config.provider.api_key.is_none() {
        return Err(MarqueeError::Configuration {
            reason: "OMDb API key missing; set OMDB_API_KEY, pass --api-key, or use --demo"
                .to_string(),
        });
    }

    let provider =
        OmdbProvider::new(&config.provider).map_err(|e| MarqueeError::Configuration {
            reason: e.to_string(),
        })?;
    Ok(Arc::new(provider))
}

/// Picks the favorites storage for this run.
pub fn build_storage(config: &MarqueeConfig, options: &GlobalOptions) -> SessionStore {
    if options.ephemeral {
        return SessionStore::Memory(MemoryStore::new());
    }

    tracing::debug!(
        "Favorites stored in {}",
        config.storage.data_dir.display()
    );
    SessionStore::File(
        FileStore::new(config.storage.data_dir.clone())
            .with_temp_file_suffix(config.storage.temp_file_suffix),
    )
}

fn load_favorites(config: &MarqueeConfig, options: &GlobalOptions) -> FavoritesStore<SessionStore> {
    FavoritesStore::load_with_key(
        build_storage(config, options),
        config.storage.favorites_key.as_str(),
    )
}

fn open_browser(
    config: &MarqueeConfig,
    options: &GlobalOptions,
) -> Result<MovieBrowser<SessionStore>, MarqueeError> {
    let provider = build_provider(config, options)?;
    Ok(MovieBrowser::with_favorites(
        provider,
        load_favorites(config, options),
    ))
}

/// Run one search and print the processed result list
async fn search_movies(
    config: &MarqueeConfig,
    options: &GlobalOptions,
    query: &str,
    year: Option<&str>,
    min_rating: Option<&str>,
    sort: SortKey,
    json: bool,
) -> anyhow::Result<()> {
    let mut browser = open_browser(config, options)?;

    browser.set_year_filter(year.unwrap_or_default());
    browser.set_min_rating(min_rating.unwrap_or_default());
    browser.set_sort_key(sort);

    if !browser.submit_query(query).await {
        println!("Nothing to search for.");
        return Ok(());
    }

    let view = browser.snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render::render_view(&view));
    }

    Ok(())
}

/// Print the persisted favorites
fn list_favorites(config: &MarqueeConfig, options: &GlobalOptions) -> anyhow::Result<()> {
    let favorites = load_favorites(config, options);
    print!("{}", render::render_favorites(favorites.records()));
    Ok(())
}

/// Search for `query` and toggle the result with `id`
async fn toggle_favorite(
    config: &MarqueeConfig,
    options: &GlobalOptions,
    query: &str,
    id: &str,
) -> anyhow::Result<()> {
    let mut browser = open_browser(config, options)?;
    browser.submit_query(query).await;

    let error_message = browser.search_state().error_message.clone();
    if !error_message.is_empty() && !browser.is_favorite(id) {
        anyhow::bail!("{error_message}");
    }

    match browser.toggle_favorite(id) {
        Ok(now_favorite) => {
            print_toggle_result(&browser, id, now_favorite);
            Ok(())
        }
        Err(MovieSearchError::Storage(e)) => {
            print_toggle_result(&browser, id, browser.is_favorite(id));
            Err(anyhow::anyhow!(MarqueeError::from(e).user_message()))
        }
        Err(MovieSearchError::RecordNotFound { id }) => {
            anyhow::bail!("No movie with id {id} in the results for “{query}”")
        }
        Err(e) => Err(e.into()),
    }
}

fn print_toggle_result(browser: &MovieBrowser<SessionStore>, id: &str, now_favorite: bool) {
    let title = browser
        .search_state()
        .results
        .iter()
        .chain(browser.favorites())
        .find(|record| record.id == id)
        .map_or(id, |record| record.title.as_str());

    if now_favorite {
        println!("★ Added “{title}” to favorites");
    } else {
        println!("☆ Removed “{title}” from favorites");
    }
}
