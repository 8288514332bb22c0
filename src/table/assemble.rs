//! Reassembly of logical rows that span several physical lines.

use tracing::trace;

use super::{RawRow, split_fields};

/// Counters describing what the assembler skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembleStats {
    /// Complete, non-blank logical rows handed to the splitter.
    pub logical_rows: usize,
    pub blank_rows: usize,
    /// Rows with fewer fields than required.
    pub short_rows: usize,
    /// The input ended inside a quoted field and the partial row was dropped.
    pub truncated_tail: bool,
}

/// Lazy iterator over the data rows of a CSV text.
///
/// The first physical line is the header and is skipped. Physical lines are
/// accumulated until the number of `"` characters seen is even, at which point
/// the accumulated text is one logical row. Rows that are blank or split into
/// fewer than `min_columns` fields are skipped silently.
pub struct Rows<'a> {
    lines: std::str::Lines<'a>,
    min_columns: usize,
    pending: String,
    open: bool,
    quotes: usize,
    stats: AssembleStats,
}

impl<'a> Rows<'a> {
    pub fn new(text: &'a str, min_columns: usize) -> Self {
        let mut lines = text.lines();
        lines.next();
        Self {
            lines,
            min_columns,
            pending: String::new(),
            open: false,
            quotes: 0,
            stats: AssembleStats::default(),
        }
    }

    pub fn stats(&self) -> &AssembleStats {
        &self.stats
    }

    fn take_pending(&mut self) -> String {
        self.open = false;
        self.quotes = 0;
        std::mem::take(&mut self.pending)
    }
}

impl Iterator for Rows<'_> {
    type Item = RawRow;

    fn next(&mut self) -> Option<RawRow> {
        loop {
            let Some(line) = self.lines.next() else {
                if self.open {
                    let tail = self.take_pending();
                    trace!(len = tail.len(), "discarding unbalanced trailing row");
                    self.stats.truncated_tail = true;
                }
                return None;
            };
            if self.open {
                self.pending.push('\n');
            }
            self.pending.push_str(line);
            self.open = true;
            self.quotes += line.matches('"').count();
            if self.quotes % 2 != 0 {
                continue;
            }

            let row = self.take_pending();
            if row.trim().is_empty() {
                self.stats.blank_rows += 1;
                continue;
            }
            self.stats.logical_rows += 1;
            let fields = split_fields(&row);
            if fields.len() < self.min_columns {
                trace!(fields = fields.len(), "skipping short row");
                self.stats.short_rows += 1;
                continue;
            }
            return Some(fields);
        }
    }
}
