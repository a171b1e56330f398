//! Grid rendering.
//!
//! Turns the month model into a monospace table. Rendering is a pure function
//! of the model and settings; callers re-render after every mutation instead
//! of patching previous output.

use crate::core::{
    pay::PaymentSettings,
    report::{MonthTotals, format_currency, format_hours},
    timesheet::{DayEntry, Timesheet},
};
use chrono::{Datelike, Weekday};
use std::fmt::Write;

/// Longest description shown in a grid cell before it is cut with an ellipsis.
pub const DESCRIPTION_WIDTH: usize = 28;

/// Renders the whole month: a header, one line per day and the TOTAL line.
pub fn render_grid(
    sheet: &Timesheet,
    settings: &PaymentSettings,
) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{}", sheet.month().title())?;
    writeln!(
        out,
        "{:<13} {:>6} {:>7} {:>11}  {}",
        "Date", "Min", "Hours", "Amount", "Description"
    )?;
    for entry in sheet.entries() {
        writeln!(out, "{}", render_row(entry))?;
    }

    let totals = MonthTotals::compute(sheet, settings);
    writeln!(
        out,
        "{:<13} {:>6} {:>7} {:>11}",
        "TOTAL",
        totals.total_minutes,
        totals.hours_display(),
        format_currency(totals.total_amount),
    )?;
    Ok(out)
}

/// Renders a single day line. Weekends carry a short weekday marker and manual
/// amounts a trailing `*`.
#[must_use]
pub fn render_row(entry: &DayEntry) -> String {
    let marker = match entry.date().weekday() {
        Weekday::Sat => "Sa",
        Weekday::Sun => "Su",
        _ => "  ",
    };
    let amount = if entry.is_manual_amount() {
        format!("{}*", format_currency(entry.amount()))
    } else {
        format!("{} ", format_currency(entry.amount()))
    };
    let line = format!(
        "{} {marker} {:>6} {:>7} {:>11}  {}",
        entry.display_date(),
        entry.minutes(),
        format_hours(entry.hours()),
        amount,
        truncate(entry.description(), DESCRIPTION_WIDTH)
    );
    line.trim_end().to_string()
}

/// Splits rendered text into pieces no longer than `limit` bytes, breaking only between lines.
#[must_use]
pub fn chunk_lines(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    for line in text.lines() {
        if !current.is_empty() && current.len() + line.len() + 1 > limit {
            chunks.push(std::mem::take(&mut current));
        }
        current.push_str(line);
        current.push('\n');
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn truncate(text: &str, width: usize) -> String {
    // Newlines would break the one-line-per-day layout
    let flat = text.replace(['\n', '\r'], " ");
    if flat.chars().count() <= width {
        return flat;
    }
    let mut cut: String = flat.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
