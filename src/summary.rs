//! Aggregation of normalized records into dashboard statistics.

use std::{cmp::Reverse, sync::LazyLock};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use itertools::Itertools as _;
use serde::Serialize;

use crate::normalize::Record;

pub const NOT_CREATED: &str = "Not Created";

/// Ordered, closed set of workflow statuses an asset can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCategories(&'static [&'static str]);

pub const STATUS_CATEGORIES: StatusCategories = StatusCategories(&[
    NOT_CREATED,
    "New Asset in Workflow",
    "In Translation",
    "In Review",
    "Changes Requested",
    "Approved",
    "Live",
]);

impl StatusCategories {
    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the category equal to `status`, borrowed from the set.
    pub fn find(&self, status: &str) -> Option<&'static str> {
        self.iter().find(|category| *category == status)
    }
}

/// Rank of priorities without any digits; sorts after every real priority.
pub const UNRANKED_PRIORITY: u32 = 999;

static PRIORITY_DIGITS: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"[0-9]+").unwrap());

pub fn priority_rank(priority: &str) -> u32 {
    PRIORITY_DIGITS
        .find(priority)
        .and_then(|digits| digits.as_str().parse().ok())
        .unwrap_or(UNRANKED_PRIORITY)
}

/// Format `count` as a share of `total`, one decimal place.
pub fn percentage(count: usize, total: usize) -> String {
    if total == 0 {
        return "0%".to_owned();
    }
    format!("{:.1}%", count as f64 / total as f64 * 100.0)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeyStats {
    pub total: usize,
    pub statuses: IndexMap<&'static str, usize>,
}

impl KeyStats {
    fn count(&mut self, status: &'static str) {
        self.total += 1;
        *self.statuses.entry(status).or_default() += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_emails: usize,
    pub status_categories: Vec<&'static str>,
    pub status_counts: IndexMap<&'static str, usize>,
    pub language_stats: IndexMap<String, KeyStats>,
    pub priority_stats: IndexMap<String, KeyStats>,
    /// Languages by descending record count.
    pub languages_by_volume: Vec<String>,
    /// Priorities by ascending numeric rank.
    pub priorities_by_rank: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl Summary {
    pub fn status_share(&self, status: &str) -> String {
        percentage(
            self.status_counts.get(status).copied().unwrap_or_default(),
            self.total_emails,
        )
    }
}

/// Accumulates records one at a time and produces a [`Summary`].
pub struct Aggregator {
    categories: StatusCategories,
    total: usize,
    status_counts: IndexMap<&'static str, usize>,
    language_stats: IndexMap<String, KeyStats>,
    priority_stats: IndexMap<String, KeyStats>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(STATUS_CATEGORIES)
    }
}

impl Aggregator {
    pub fn new(categories: StatusCategories) -> Self {
        Self {
            status_counts: categories.iter().map(|category| (category, 0)).collect(),
            categories,
            total: 0,
            language_stats: IndexMap::new(),
            priority_stats: IndexMap::new(),
        }
    }

    /// Count one record. A status outside the category set counts as
    /// [`NOT_CREATED`].
    pub fn push(&mut self, record: Record) {
        let Record {
            language,
            priority,
            status,
        } = record;
        let status = self.categories.find(status).unwrap_or(NOT_CREATED);
        self.total += 1;
        *self.status_counts.entry(status).or_default() += 1;
        self.language_stats.entry(language).or_default().count(status);
        self.priority_stats.entry(priority).or_default().count(status);
    }

    pub fn finish(self) -> Summary {
        self.finish_at(Utc::now())
    }

    pub fn finish_at(self, generated_at: DateTime<Utc>) -> Summary {
        // Both sorts are stable, so ties keep first-seen order.
        let languages_by_volume = self
            .language_stats
            .iter()
            .sorted_by_key(|(_, stats)| Reverse(stats.total))
            .map(|(language, _)| language.clone())
            .collect();
        let priorities_by_rank = self
            .priority_stats
            .keys()
            .sorted_by_key(|priority| priority_rank(priority))
            .cloned()
            .collect();
        Summary {
            total_emails: self.total,
            status_categories: self.categories.iter().collect(),
            status_counts: self.status_counts,
            language_stats: self.language_stats,
            priority_stats: self.priority_stats,
            languages_by_volume,
            priorities_by_rank,
            generated_at,
        }
    }
}

impl Extend<Record> for Aggregator {
    fn extend<T: IntoIterator<Item = Record>>(&mut self, iter: T) {
        for record in iter {
            self.push(record);
        }
    }
}
