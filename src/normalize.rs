//! Field normalizers
//!
//! Each normalizer maps one raw field to its canonical value. Only the language
//! normalizer can reject a row.

use crate::{
    config::Columns,
    summary::{NOT_CREATED, StatusCategories},
    table::RawRow,
};

pub const UNKNOWN_LANGUAGE: &str = "Unknown";
pub const UNASSIGNED_PRIORITY: &str = "Unassigned";

/// Language values marking placeholder rows rather than real languages.
pub const DEFAULT_EXCLUDED_LANGUAGES: [&str; 3] =
    ["Backfill TBD", "(Backfill TBD)", "Kelsey Craddock"];

/// Map a raw status onto the closed category set.
///
/// Matching is exact after trimming. Anything that is not a known category,
/// including a differently-capitalized one, becomes [`NOT_CREATED`].
pub fn normalize_status(raw: &str, categories: &StatusCategories) -> &'static str {
    categories.find(raw.trim()).unwrap_or(NOT_CREATED)
}

/// Map a raw language, or `None` when the row is a placeholder.
///
/// One matching pair of surrounding `"` or `'` quotes is stripped. A value
/// that is empty, or only quotes and whitespace, becomes [`UNKNOWN_LANGUAGE`].
pub fn normalize_language<S: AsRef<str>>(raw: &str, excluded: &[S]) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(UNKNOWN_LANGUAGE.to_owned());
    }
    if excluded
        .iter()
        .any(|sentinel| trimmed.contains(sentinel.as_ref()))
    {
        return None;
    }
    match strip_quotes(trimmed).trim() {
        "" => Some(UNKNOWN_LANGUAGE.to_owned()),
        language => Some(language.to_owned()),
    }
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

pub fn normalize_priority(raw: &str) -> String {
    match raw.trim() {
        "" => UNASSIGNED_PRIORITY.to_owned(),
        priority => priority.to_owned(),
    }
}

/// One canonical asset entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub language: String,
    pub priority: String,
    pub status: &'static str,
}

impl Record {
    /// Build a record from the configured columns of a row.
    ///
    /// Returns `None` when the language is a placeholder or a column is
    /// missing.
    pub fn from_row<S: AsRef<str>>(
        row: &RawRow,
        columns: &Columns,
        categories: &StatusCategories,
        excluded_languages: &[S],
    ) -> Option<Self> {
        let language = normalize_language(row.get(columns.language)?, excluded_languages)?;
        let priority = normalize_priority(row.get(columns.priority)?);
        let status = normalize_status(row.get(columns.status)?, categories);
        Some(Self {
            language,
            priority,
            status,
        })
    }

    pub fn has_known_language(&self) -> bool {
        self.language != UNKNOWN_LANGUAGE
    }
}
