//! Interactive browsing session
//!
//! Reads one command per line from stdin, applies it to the browser and
//! re-renders the view after every state change.

use std::io::Write;
use std::str::FromStr;

use marquee_core::{KeyValueStore, MarqueeError, SortKey};
use marquee_search::{MovieBrowser, MovieSearchError, SearchEvent};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;

use crate::render;

const HELP: &str = "\
Commands:
  search <title>   search movies (alias: s)
  year <year|->    filter by release year; '-' clears it
  rating <min|->   filter by minimum IMDb rating; '-' clears it
  sort [key]       order results: yearAsc, yearDesc, ratingAsc, ratingDesc; no value clears it
  fav <n|id>       toggle favorite by result number or IMDb id
  favs             list favorites
  help             show this help
  quit             leave (alias: q, exit)";

/// One line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum BrowseCommand {
    Show,
    Search(String),
    Year(String),
    Rating(String),
    Sort(SortKey),
    Favorite(String),
    Favorites,
    Help,
    Quit,
}

impl FromStr for BrowseCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, argument) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_lowercase().as_str() {
            "" => Ok(BrowseCommand::Show),
            "search" | "s" => Ok(BrowseCommand::Search(argument.to_string())),
            "year" => Ok(BrowseCommand::Year(filter_value(argument))),
            "rating" => Ok(BrowseCommand::Rating(filter_value(argument))),
            "sort" => argument.parse().map(BrowseCommand::Sort),
            "fav" | "f" if argument.is_empty() => {
                Err("Usage: fav <result number or IMDb id>".to_string())
            }
            "fav" | "f" => Ok(BrowseCommand::Favorite(argument.to_string())),
            "favs" | "favorites" => Ok(BrowseCommand::Favorites),
            "help" | "?" => Ok(BrowseCommand::Help),
            "quit" | "q" | "exit" => Ok(BrowseCommand::Quit),
            other => Err(format!("Unknown command '{other}'. Type 'help' for commands.")),
        }
    }
}

/// Filter argument with `-` meaning "clear".
fn filter_value(argument: &str) -> String {
    if argument == "-" {
        String::new()
    } else {
        argument.to_string()
    }
}

/// What to show after a command ran.
#[derive(Debug, PartialEq)]
pub enum Reply {
    /// Re-render the view, preceded by an optional note
    Render(Option<String>),
    /// Show only this text
    Message(String),
}

/// Runs the interactive loop until `quit` or end of input.
///
/// # Errors
///
/// - `std::io::Error` - If reading stdin or writing stdout fails
pub async fn run<S: KeyValueStore>(mut browser: MovieBrowser<S>) -> anyhow::Result<()> {
    let status = tokio::spawn(print_status(browser.subscribe()));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{HELP}\n");
    print!("{}", render::render_view(&browser.snapshot()));

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match line.parse::<BrowseCommand>() {
            Ok(BrowseCommand::Quit) => break,
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match apply(&mut browser, command).await {
            Reply::Render(note) => {
                // Let the status task report queued search events first.
                tokio::task::yield_now().await;
                if let Some(note) = note {
                    println!("{note}");
                }
                print!("{}", render::render_view(&browser.snapshot()));
            }
            Reply::Message(message) => print!("{message}"),
        }
    }

    status.abort();
    Ok(())
}

/// Applies one command to the browser.
pub async fn apply<S: KeyValueStore>(
    browser: &mut MovieBrowser<S>,
    command: BrowseCommand,
) -> Reply {
    match command {
        BrowseCommand::Show | BrowseCommand::Quit => Reply::Render(None),
        BrowseCommand::Search(query) => {
            if browser.submit_query(&query).await {
                Reply::Render(None)
            } else {
                Reply::Render(Some("Enter a title to search for.".to_string()))
            }
        }
        BrowseCommand::Year(year) => {
            browser.set_year_filter(&year);
            Reply::Render(None)
        }
        BrowseCommand::Rating(min_rating) => {
            browser.set_min_rating(&min_rating);
            Reply::Render(None)
        }
        BrowseCommand::Sort(sort_key) => {
            browser.set_sort_key(sort_key);
            Reply::Render(None)
        }
        BrowseCommand::Favorite(target) => {
            let id = resolve_target(browser, &target);
            Reply::Render(Some(toggle_note(browser, &id)))
        }
        BrowseCommand::Favorites => Reply::Message(render::render_favorites(browser.favorites())),
        BrowseCommand::Help => Reply::Message(format!("{HELP}\n")),
    }
}

/// Maps a 1-based result number onto the visible row's id; anything else is
/// taken as an id.
fn resolve_target<S: KeyValueStore>(browser: &MovieBrowser<S>, target: &str) -> String {
    target
        .parse::<usize>()
        .ok()
        .and_then(|position| position.checked_sub(1))
        .and_then(|index| browser.visible_results().into_iter().nth(index))
        .map_or_else(|| target.to_string(), |record| record.id)
}

fn toggle_note<S: KeyValueStore>(browser: &mut MovieBrowser<S>, id: &str) -> String {
    match browser.toggle_favorite(id) {
        Ok(true) => format!("★ Added {id} to favorites"),
        Ok(false) => format!("☆ Removed {id} from favorites"),
        Err(MovieSearchError::Storage(e)) => {
            tracing::warn!("Failed to persist favorites: {e}");
            MarqueeError::from(e).user_message()
        }
        Err(e) => e.to_string(),
    }
}

async fn print_status(mut events: broadcast::Receiver<SearchEvent>) {
    loop {
        match events.recv().await {
            Ok(SearchEvent::Started { query }) => eprintln!("Searching for “{query}”…"),
            Ok(SearchEvent::Failed { message }) => tracing::debug!("Search failed: {message}"),
            Ok(_) => {}
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::debug!("Status display skipped {skipped} events");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use marquee_core::MemoryStore;
    use marquee_search::DemoProvider;

    use super::*;

    fn browser(storage: MemoryStore) -> MovieBrowser<MemoryStore> {
        MovieBrowser::new(Arc::new(DemoProvider::new()), storage)
    }

    fn parse(line: &str) -> Result<BrowseCommand, String> {
        line.parse()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse(""), Ok(BrowseCommand::Show));
        assert_eq!(
            parse("search  The Matrix "),
            Ok(BrowseCommand::Search("The Matrix".to_string()))
        );
        assert_eq!(parse("s x"), Ok(BrowseCommand::Search("x".to_string())));
        assert_eq!(parse("year"), Ok(BrowseCommand::Year(String::new())));
        assert_eq!(parse("year -"), Ok(BrowseCommand::Year(String::new())));
        assert_eq!(parse("year 1999"), Ok(BrowseCommand::Year("1999".to_string())));
        assert_eq!(
            parse("rating 7.5"),
            Ok(BrowseCommand::Rating("7.5".to_string()))
        );
        assert_eq!(
            parse("sort ratingDesc"),
            Ok(BrowseCommand::Sort(SortKey::RatingDescending))
        );
        assert_eq!(parse("sort"), Ok(BrowseCommand::Sort(SortKey::None)));
        assert_eq!(parse("fav 2"), Ok(BrowseCommand::Favorite("2".to_string())));
        assert_eq!(parse("FAVS"), Ok(BrowseCommand::Favorites));
        assert_eq!(parse("q"), Ok(BrowseCommand::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse("fav").is_err());
        assert!(parse("sort sideways").is_err());
        assert!(parse("dance").is_err());
    }

    #[tokio::test]
    async fn test_session_flow() {
        let storage = MemoryStore::new();
        let mut browser = browser(storage.clone());

        apply(&mut browser, BrowseCommand::Search("matrix".to_string())).await;
        let total = browser.visible_results().len();
        assert!(total > 1);

        apply(&mut browser, BrowseCommand::Sort(SortKey::YearDescending)).await;
        let first = browser.visible_results()[0].clone();

        let reply = apply(&mut browser, BrowseCommand::Favorite("1".to_string())).await;
        assert_eq!(
            reply,
            Reply::Render(Some(format!("★ Added {} to favorites", first.id)))
        );
        assert!(browser.is_favorite(&first.id));
        assert_eq!(storage.write_count(), 1);

        let reply = apply(&mut browser, BrowseCommand::Favorite(first.id.clone())).await;
        assert_eq!(
            reply,
            Reply::Render(Some(format!("☆ Removed {} from favorites", first.id)))
        );
        assert!(browser.favorites().is_empty());
    }

    #[tokio::test]
    async fn test_blank_search_is_ignored() {
        let mut browser = browser(MemoryStore::new());
        let reply = apply(&mut browser, BrowseCommand::Search(String::new())).await;

        assert_eq!(
            reply,
            Reply::Render(Some("Enter a title to search for.".to_string()))
        );
        assert!(browser.search_state().query_text.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_favorite_target_reports_error() {
        let mut browser = browser(MemoryStore::new());
        let reply = apply(&mut browser, BrowseCommand::Favorite("99".to_string())).await;

        match reply {
            Reply::Render(Some(note)) => assert!(note.contains("99")),
            other => panic!("unexpected reply: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_favorites_listing() {
        let mut browser = browser(MemoryStore::new());
        let reply = apply(&mut browser, BrowseCommand::Favorites).await;
        assert_eq!(reply, Reply::Message("No favorites yet.\n".to_string()));
    }
}
