use tracing::{debug, info};

use crate::{
    config::Config,
    normalize::Record,
    summary::{Aggregator, STATUS_CATEGORIES, Summary},
    table::Rows,
};

pub mod config;
pub mod normalize;
pub mod report;
pub mod source;
pub mod summary;
pub mod table;

#[cfg(test)]
mod tests;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] config::Error),
    #[error(transparent)]
    Load(#[from] source::Error),
}

/// Parse an export and aggregate the usable rows.
///
/// Row level problems never fail: short rows, placeholder and unknown
/// languages are dropped, unrecognized statuses are reclassified.
pub fn summarize(text: &str, config: &Config) -> Summary {
    let mut rows = Rows::new(text, config.min_columns);
    let mut aggregator = Aggregator::new(STATUS_CATEGORIES);
    let mut dropped = 0usize;
    for row in rows.by_ref() {
        match Record::from_row(
            &row,
            &config.columns,
            &STATUS_CATEGORIES,
            &config.excluded_languages,
        ) {
            Some(record) if record.has_known_language() => aggregator.push(record),
            _ => dropped += 1,
        }
    }
    debug!(stats = ?rows.stats(), dropped, "assembled rows");
    let summary = aggregator.finish();
    info!(records = summary.total_emails, "loaded email assets");
    summary
}

/// Fetch the configured export and summarize it.
pub async fn load_summary(config: &Config) -> Result<Summary, Error> {
    config.validate()?;
    let text = source::load(&config.source).await?;
    Ok(summarize(&text, config))
}
