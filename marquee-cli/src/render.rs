//! Plain-text rendering of browser views

use marquee_core::{FilterCriteria, MovieRecord, SortKey};
use marquee_search::BrowserView;

/// Hint shown before anything has been found.
pub const EMPTY_HINT: &str = "Try searching for “Inception”.";

const FAVORITED_MARKER: &str = "★ Favorited";
const NOT_FAVORITED_MARKER: &str = "☆ Favorite";

/// Renders the whole session: status, results and favorites.
pub fn render_view(view: &BrowserView) -> String {
    let mut lines = Vec::new();

    if view.is_loading {
        lines.push("Searching…".to_string());
    }

    if !view.error_message.is_empty() {
        lines.push(format!("⚠ {}", view.error_message));
    }

    if view.show_empty_hint {
        lines.push(EMPTY_HINT.to_string());
    }

    if view.unfiltered_count > 0 {
        lines.push(format!(
            "Showing {} of {} results for “{}”",
            view.results.len(),
            view.unfiltered_count,
            view.query_text
        ));
        if let Some(summary) = filter_summary(&view.criteria, view.sort_key) {
            lines.push(summary);
        }
        lines.push(String::new());

        for (index, row) in view.results.iter().enumerate() {
            lines.extend(render_record(index + 1, &row.record, row.is_favorite));
        }
    }

    if !view.favorites.is_empty() {
        lines.push(String::new());
        lines.push(format!("Your Favorites ({})", view.favorites.len()));
        for record in &view.favorites {
            lines.push(format!("  ★ {} ({}) [{}]", record.title, record.year, record.id));
        }
    }

    finish(lines)
}

/// Renders the favorites list on its own.
pub fn render_favorites(favorites: &[MovieRecord]) -> String {
    if favorites.is_empty() {
        return finish(vec!["No favorites yet.".to_string()]);
    }

    let mut lines = vec![format!("Your Favorites ({})", favorites.len()), String::new()];
    for (index, record) in favorites.iter().enumerate() {
        lines.extend(render_record(index + 1, record, true));
    }
    finish(lines)
}

/// Describes active filters and sort order, if any are set.
pub fn filter_summary(criteria: &FilterCriteria, sort_key: SortKey) -> Option<String> {
    let mut parts = Vec::new();

    if let Some(year) = &criteria.year_equals {
        parts.push(format!("year = {year}"));
    }
    if let Some(min_rating) = criteria.min_rating {
        parts.push(format!("rating ≥ {min_rating}"));
    }
    if sort_key != SortKey::None {
        parts.push(format!("sorted by {sort_key}"));
    }

    (!parts.is_empty()).then(|| format!("Filters: {}", parts.join(", ")))
}

fn render_record(position: usize, record: &MovieRecord, is_favorite: bool) -> [String; 2] {
    let marker = if is_favorite {
        FAVORITED_MARKER
    } else {
        NOT_FAVORITED_MARKER
    };

    [
        format!(
            "{position:>3}. {} ({})  IMDb {}  {marker}  [{}]",
            record.title, record.year, record.rating, record.id
        ),
        format!("     {}", record.poster_or_placeholder()),
    ]
}

fn finish(lines: Vec<String>) -> String {
    let mut output = lines.join("\n");
    output.push('\n');
    output
}
