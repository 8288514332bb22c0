//! Plain text rendering of a [`Summary`].

use std::fmt::Write as _;

use crate::summary::{Summary, percentage};

pub fn render_text(summary: &Summary) -> String {
    let mut out = String::new();
    write_text(&mut out, summary).expect("writing to a String");
    out
}

fn write_text(out: &mut String, summary: &Summary) -> std::fmt::Result {
    let total = summary.total_emails;
    writeln!(out, "Email assets: {total}")?;
    writeln!(
        out,
        "Generated:    {}",
        summary.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;

    writeln!(out, "\nBy status")?;
    for (status, count) in &summary.status_counts {
        writeln!(out, "  {status:<24} {count:>6} {:>7}", percentage(*count, total))?;
    }

    writeln!(out, "\nBy language")?;
    for language in &summary.languages_by_volume {
        let stats = &summary.language_stats[language];
        writeln!(
            out,
            "  {language:<24} {:>6} {:>7}",
            stats.total,
            percentage(stats.total, total)
        )?;
    }

    writeln!(out, "\nBy priority")?;
    for priority in &summary.priorities_by_rank {
        let stats = &summary.priority_stats[priority];
        writeln!(
            out,
            "  {priority:<24} {:>6} {:>7}",
            stats.total,
            percentage(stats.total, total)
        )?;
    }
    Ok(())
}
