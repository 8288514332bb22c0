use serde::Deserialize;

use crate::normalize::DEFAULT_EXCLUDED_LANGUAGES;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("min_columns ({min_columns}) must exceed the {name} column index ({index})")]
    ColumnOutOfRange {
        name: &'static str,
        index: usize,
        min_columns: usize,
    },
}

/// Positions of the consumed columns in the export.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Columns {
    pub language: usize,
    pub priority: usize,
    pub status: usize,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            language: 0,
            priority: 1,
            status: 10,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path or `http(s)` URL of the CSV export.
    pub source: String,
    pub columns: Columns,
    /// Rows splitting into fewer fields are dropped.
    pub min_columns: usize,
    /// Substrings marking placeholder rows in the language column.
    pub excluded_languages: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: "email_assets.csv".to_owned(),
            columns: Columns::default(),
            min_columns: 11,
            excluded_languages: DEFAULT_EXCLUDED_LANGUAGES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), Error> {
        let Columns {
            language,
            priority,
            status,
        } = self.columns;
        for (name, index) in [
            ("language", language),
            ("priority", priority),
            ("status", status),
        ] {
            if index >= self.min_columns {
                return Err(Error::ColumnOutOfRange {
                    name,
                    index,
                    min_columns: self.min_columns,
                });
            }
        }
        Ok(())
    }
}
