//! Terminal output for a finished search.
//!
//! Writes to any `io::Write` so tests can render into a buffer. Feed text is
//! passed through [`strip_control_chars`] before it reaches the terminal.

use std::io::{self, Write};

use crate::search::{format_absolute, SearchResult};
use crate::util::strip_control_chars;
use chrono::FixedOffset;

/// Human phrase for a recency window, e.g. "last 3 days".
pub fn describe_window(hours: Option<u32>) -> Option<String> {
    hours.map(|h| match h {
        1 => "last 1 hour".to_string(),
        h if h >= 48 && h % 24 == 0 => format!("last {} days", h / 24),
        h => format!("last {h} hours"),
    })
}

/// Writes the human-readable report.
///
/// Order: per-source failure notices, the collection summary, the result
/// headline, then one block per item.
pub fn render_report<W: Write>(
    out: &mut W,
    result: &SearchResult,
    zone: FixedOffset,
) -> io::Result<()> {
    for failure in &result.failures {
        writeln!(
            out,
            "! Could not load the {} feed ({}): {}",
            failure.category, failure.url, failure.error
        )?;
    }

    if let (Some(oldest), Some(newest)) = (result.stats.oldest, result.stats.newest) {
        writeln!(
            out,
            "Collected {} ~ {} ({} articles)",
            format_absolute(oldest, zone),
            format_absolute(newest, zone),
            result.stats.total
        )?;
    }

    let keyword = strip_control_chars(&result.keyword);
    let window = describe_window(result.period_hours);

    if result.items.is_empty() {
        match &window {
            Some(w) => writeln!(out, "No articles about '{keyword}' in the {w}.")?,
            None => writeln!(out, "No results for '{keyword}'.")?,
        }
        return Ok(());
    }

    let noun = if result.items.len() == 1 { "article" } else { "articles" };
    match &window {
        Some(w) => writeln!(
            out,
            "Found {} {noun} about '{keyword}' ({w})",
            result.items.len()
        )?,
        None => writeln!(out, "Found {} {noun} about '{keyword}'", result.items.len())?,
    }

    for (i, item) in result.items.iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "{}. {}", i + 1, strip_control_chars(&item.entry.title))?;
        if !item.entry.link.is_empty() {
            writeln!(out, "   {}", strip_control_chars(&item.entry.link))?;
        }
        let when = match &item.relative_time {
            Some(rel) => format!("{} ({rel})", item.display_time),
            None => strip_control_chars(&item.display_time).into_owned(),
        };
        writeln!(out, "   {when} · {}", item.entry.category)?;
        if !item.snippet.is_empty() {
            writeln!(out, "   {}", strip_control_chars(&item.snippet))?;
        }
    }

    Ok(())
}

/// Writes the result as pretty-printed JSON followed by a newline.
pub fn render_json<W: Write>(out: &mut W, result: &SearchResult) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, result)?;
    writeln!(out)
}
