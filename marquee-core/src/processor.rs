//! Client-side filtering and sorting of a movie record set.
//!
//! [`process`] is pure: it borrows the input records and returns a freshly
//! allocated, filtered and ordered copy.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::record::{MovieRecord, leading_number};

/// Active filter settings, applied conjunctively.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Keep only records whose year string equals this value
    pub year_equals: Option<String>,
    /// Keep only records rated at least this much
    pub min_rating: Option<f64>,
}

impl FilterCriteria {
    /// Builds criteria from raw user input.
    ///
    /// Blank fields mean "no criterion". A minimum rating that is not a
    /// number is ignored rather than rejected.
    pub fn from_inputs(year: &str, min_rating: &str) -> Self {
        Self {
            year_equals: non_blank(year),
            min_rating: leading_number(min_rating),
        }
    }

    /// Returns true when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.year_equals.is_none() && self.min_rating.is_none()
    }

    /// Checks a single record against every active criterion.
    pub fn matches(&self, record: &MovieRecord) -> bool {
        if let Some(year) = &self.year_equals
            && record.year != *year
        {
            return false;
        }

        if let Some(min_rating) = self.min_rating {
            // Non-numeric ratings never satisfy an active minimum.
            return record
                .rating_value()
                .is_some_and(|rating| rating >= min_rating);
        }

        true
    }
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Ordering rule applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum SortKey {
    /// Keep the provider's order
    #[default]
    None,
    /// Oldest first
    YearAscending,
    /// Newest first
    YearDescending,
    /// Lowest rated first
    RatingAscending,
    /// Highest rated first
    RatingDescending,
}

impl SortKey {
    /// All sort keys in menu order.
    pub const ALL: [SortKey; 5] = [
        SortKey::None,
        SortKey::YearAscending,
        SortKey::YearDescending,
        SortKey::RatingAscending,
        SortKey::RatingDescending,
    ];

    /// Short token used by the interactive UI.
    pub fn token(self) -> &'static str {
        match self {
            SortKey::None => "",
            SortKey::YearAscending => "yearAsc",
            SortKey::YearDescending => "yearDesc",
            SortKey::RatingAscending => "ratingAsc",
            SortKey::RatingDescending => "ratingDesc",
        }
    }

    fn sort_value(self, record: &MovieRecord) -> Option<f64> {
        match self {
            SortKey::None => None,
            SortKey::YearAscending | SortKey::YearDescending => record.year_value(),
            SortKey::RatingAscending | SortKey::RatingDescending => record.rating_value(),
        }
    }

    fn is_descending(self) -> bool {
        matches!(self, SortKey::YearDescending | SortKey::RatingDescending)
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" => Ok(SortKey::None),
            "yearAsc" | "year-ascending" => Ok(SortKey::YearAscending),
            "yearDesc" | "year-descending" => Ok(SortKey::YearDescending),
            "ratingAsc" | "rating-ascending" => Ok(SortKey::RatingAscending),
            "ratingDesc" | "rating-descending" => Ok(SortKey::RatingDescending),
            other => Err(format!("Invalid sort key: {other}")),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::None => write!(f, "Sort by…"),
            SortKey::YearAscending => write!(f, "Year ↑"),
            SortKey::YearDescending => write!(f, "Year ↓"),
            SortKey::RatingAscending => write!(f, "Rating ↑"),
            SortKey::RatingDescending => write!(f, "Rating ↓"),
        }
    }
}

/// Filters `records` by `criteria` and orders the survivors by `sort_key`.
///
/// The sort is stable: records with equal sort values keep their relative
/// order. Records without a numeric sort value are placed after all numeric
/// ones in either direction. `SortKey::None` keeps the input order.
pub fn process(
    records: &[MovieRecord],
    criteria: &FilterCriteria,
    sort_key: SortKey,
) -> Vec<MovieRecord> {
    let mut filtered: Vec<MovieRecord> = records
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect();

    if sort_key != SortKey::None {
        filtered.sort_by(|a, b| compare_records(a, b, sort_key));
    }

    filtered
}

fn compare_records(a: &MovieRecord, b: &MovieRecord, sort_key: SortKey) -> Ordering {
    match (sort_key.sort_value(a), sort_key.sort_value(b)) {
        (Some(left), Some(right)) => {
            let ordering = left.partial_cmp(&right).unwrap_or(Ordering::Equal);
            if sort_key.is_descending() {
                ordering.reverse()
            } else {
                ordering
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
