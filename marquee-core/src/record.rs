//! Movie record types as delivered by the movie-data provider.
//!
//! Field values are kept exactly as the provider sends them (strings, with
//! `"N/A"` standing in for missing data). Numeric views are derived on demand
//! so a record can round-trip through favorites storage unchanged.

use serde::{Deserialize, Serialize};

/// Sentinel the provider uses for missing poster and rating values.
pub const MISSING_VALUE: &str = "N/A";

/// Image shown in place of a poster the provider does not have.
pub const POSTER_PLACEHOLDER_URL: &str = "https://via.placeholder.com/300x450?text=No+Image";

/// Full detail record for a single movie.
///
/// Identity is [`MovieRecord::id`]; two records with the same id describe the
/// same movie. Serialized with the provider's field names so stored favorites
/// and detail payloads share one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// External identifier (IMDb id, e.g. `tt1375666`)
    #[serde(rename = "imdbID")]
    pub id: String,
    /// Display title
    #[serde(rename = "Title")]
    pub title: String,
    /// Release year, or a year range such as `2019–2021` for series
    #[serde(rename = "Year")]
    pub year: String,
    /// Poster URL or [`MISSING_VALUE`]
    #[serde(rename = "Poster", default = "missing_value")]
    pub poster: String,
    /// IMDb rating as a decimal string, or [`MISSING_VALUE`]
    #[serde(rename = "imdbRating", default = "missing_value")]
    pub rating: String,
}

/// Summary entry returned by a keyword search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// External identifier used to fetch the full record
    #[serde(rename = "imdbID")]
    pub id: String,
    /// Display title
    #[serde(rename = "Title")]
    pub title: String,
    /// Release year as sent by the provider
    #[serde(rename = "Year")]
    pub year: String,
    /// Poster URL or [`MISSING_VALUE`]
    #[serde(rename = "Poster", default = "missing_value")]
    pub poster: String,
}

fn missing_value() -> String {
    MISSING_VALUE.to_string()
}

impl MovieRecord {
    /// Creates a record from its provider string fields.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        year: impl Into<String>,
        poster: impl Into<String>,
        rating: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            year: year.into(),
            poster: poster.into(),
            rating: rating.into(),
        }
    }

    /// Poster URL, or `None` when the provider has no image.
    pub fn poster_url(&self) -> Option<&str> {
        let poster = self.poster.trim();
        if poster.is_empty() || poster == MISSING_VALUE {
            None
        } else {
            Some(poster)
        }
    }

    /// Poster URL with the placeholder image substituted for missing posters.
    pub fn poster_or_placeholder(&self) -> &str {
        self.poster_url().unwrap_or(POSTER_PLACEHOLDER_URL)
    }

    /// Numeric year, taken from the leading digits (`"2019–2021"` gives 2019).
    pub fn year_value(&self) -> Option<f64> {
        leading_number(&self.year)
    }

    /// Numeric rating, or `None` for `"N/A"` and other non-numeric values.
    pub fn rating_value(&self) -> Option<f64> {
        leading_number(&self.rating)
    }
}

/// Parses the longest numeric prefix of `raw`, ignoring leading whitespace.
///
/// Accepts an optional sign, digits and a single decimal point. Returns `None`
/// when the prefix holds no digits.
pub fn leading_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_point = false;

    for (index, ch) in trimmed.char_indices() {
        match ch {
            '+' | '-' if index == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_point => seen_point = true,
            _ => break,
        }
        end = index + ch.len_utf8();
    }

    if !seen_digit {
        return None;
    }

    trimmed[..end].trim_end_matches('.').parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_number_parsing() {
        assert_eq!(leading_number("8.8"), Some(8.8));
        assert_eq!(leading_number("2010"), Some(2010.0));
        assert_eq!(leading_number("2019–2021"), Some(2019.0));
        assert_eq!(leading_number("  7.5/10"), Some(7.5));
        assert_eq!(leading_number("7."), Some(7.0));
        assert_eq!(leading_number("N/A"), None);
        assert_eq!(leading_number(""), None);
        assert_eq!(leading_number("-"), None);
        assert_eq!(leading_number(".5"), Some(0.5));
    }

    #[test]
    fn test_poster_sentinel() {
        let with_poster = MovieRecord::new("tt1", "A", "2000", "https://img/a.jpg", "7.0");
        assert_eq!(with_poster.poster_url(), Some("https://img/a.jpg"));

        let without = MovieRecord::new("tt2", "B", "2000", MISSING_VALUE, "7.0");
        assert_eq!(without.poster_url(), None);
        assert_eq!(without.poster_or_placeholder(), POSTER_PLACEHOLDER_URL);
    }

    #[test]
    fn test_provider_field_names() {
        let payload = r#"{
            "Title": "Inception",
            "Year": "2010",
            "Poster": "N/A",
            "imdbRating": "8.8",
            "imdbID": "tt1375666",
            "Plot": "ignored"
        }"#;

        let record: MovieRecord = serde_json::from_str(payload).unwrap();
        assert_eq!(record.id, "tt1375666");
        assert_eq!(record.title, "Inception");
        assert_eq!(record.rating_value(), Some(8.8));
        assert_eq!(record.year_value(), Some(2010.0));

        let serialized = serde_json::to_value(&record).unwrap();
        assert_eq!(serialized["imdbID"], "tt1375666");
        assert_eq!(serialized["imdbRating"], "8.8");
    }

    #[test]
    fn test_missing_optional_fields_default_to_sentinel() {
        let record: MovieRecord =
            serde_json::from_str(r#"{"imdbID":"tt9","Title":"X","Year":"1999"}"#).unwrap();
        assert_eq!(record.poster, MISSING_VALUE);
        assert_eq!(record.rating, MISSING_VALUE);
        assert_eq!(record.rating_value(), None);
    }
}
