//! Totals aggregation and report formatting.
//!
//! This module sums a month's rows into [`MonthTotals`] and provides the
//! display helpers shared by the grid, the bot and the exporters. All
//! functions are pure and can be re-run after any mutation.

use crate::core::{pay::PaymentSettings, timesheet::Timesheet};
use std::fmt::Write;

/// Derived month totals; never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthTotals {
    /// Sum of minutes across all rows
    pub total_minutes: u64,
    /// Sum of decimal hours across all rows
    pub total_hours: f64,
    /// Sum of amounts across all rows
    pub total_amount: f64,
    /// Worked minus expected hours, present only in daily-minimum mode with the toggle on
    pub hour_difference: Option<f64>,
    /// Expected hours for the month under the daily-minimum policy
    pub expected_hours: f64,
}

impl MonthTotals {
    /// Sums every row of `sheet`. No rounding happens mid-sum.
    #[must_use]
    pub fn compute(sheet: &Timesheet, settings: &PaymentSettings) -> Self {
        let (total_minutes, total_hours, total_amount) = sheet.entries().iter().fold(
            (0_u64, 0.0_f64, 0.0_f64),
            |(minutes, hours, amount), entry| {
                (
                    minutes + u64::from(entry.minutes()),
                    hours + entry.hours(),
                    amount + entry.amount(),
                )
            },
        );

        let expected_hours = settings.expected_hours(sheet.month());
        let hour_difference = settings
            .shows_hour_difference()
            .then(|| total_hours - expected_hours);

        Self {
            total_minutes,
            total_hours,
            total_amount,
            hour_difference,
            expected_hours,
        }
    }

    /// Total hours with the hour difference appended when shown, e.g. `"98.50 (-6.50)"`.
    #[must_use]
    pub fn hours_display(&self) -> String {
        match self.hour_difference {
            Some(diff) => format!(
                "{} ({})",
                format_hours(self.total_hours),
                format_hour_difference(diff)
            ),
            None => format_hours(self.total_hours),
        }
    }

    /// Worked hours as a percentage of expected hours; 0 when nothing is expected.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        calculate_progress(self.total_hours, self.expected_hours)
    }
}

/// Formats a currency amount, e.g. `€68.18`.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    format!("€{amount:.2}")
}

/// Formats decimal hours with two places.
#[must_use]
pub fn format_hours(hours: f64) -> String {
    format!("{hours:.2}")
}

/// Signed hour difference with an explicit `+` for non-negative values.
#[must_use]
pub fn format_hour_difference(diff: f64) -> String {
    // Avoid printing "-0.00" for tiny negative float noise
    let rounded = (diff * 100.0).round() / 100.0;
    if rounded >= 0.0 {
        format!("+{:.2}", rounded.abs())
    } else {
        format!("{rounded:.2}")
    }
}

/// Worked hours as a percentage of expected hours.
///
/// Returns 0 when nothing is expected, and can exceed 100 when the month is over-filled.
#[must_use]
pub fn calculate_progress(worked: f64, expected: f64) -> f64 {
    if expected <= 0.0 {
        return 0.0;
    }

    (worked / expected) * 100.0
}

/// Generates a progress bar string for visual representation.
///
/// Creates a text-based progress bar like: `[████████░░] 80.0%`
#[must_use]
pub fn format_progress_bar(progress_percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped_progress = progress_percent.clamp(0.0, 100.0);

    // clamped_progress ∈ [0, 100] and length is small, so the cast stays in range
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped_progress / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    format!("[{}{}] {progress_percent:.1}%", "█".repeat(filled), "░".repeat(empty))
}

/// Multi-line plain-text summary of a month, used by the bot's totals reply.
pub fn format_month_summary(
    sheet: &Timesheet,
    settings: &PaymentSettings,
) -> Result<String, std::fmt::Error> {
    let totals = MonthTotals::compute(sheet, settings);
    let month = sheet.month();
    let worked_days = sheet.entries().iter().filter(|e| e.minutes() > 0).count();
    let manual_rows = sheet.entries().iter().filter(|e| e.is_manual_amount()).count();

    let mut summary = String::new();
    writeln!(summary, "{}", month.title())?;
    writeln!(summary, "  Mode: {}", settings.mode)?;
    writeln!(
        summary,
        "  Working days: {} | Days with time logged: {worked_days}",
        month.working_days()
    )?;
    writeln!(summary, "  Minutes: {}", totals.total_minutes)?;
    writeln!(summary, "  Hours: {}", totals.hours_display())?;
    writeln!(summary, "  Amount: {}", format_currency(totals.total_amount))?;
    if totals.hour_difference.is_some() {
        writeln!(
            summary,
            "  Expected: {} h {}",
            format_hours(totals.expected_hours),
            format_progress_bar(totals.progress_percent(), Some(10))
        )?;
    }
    if manual_rows > 0 {
        writeln!(summary, "  Manual amounts: {manual_rows}")?;
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::{calendar::MonthKey, pay::PaymentMode};

    fn daily_with_difference() -> PaymentSettings {
        PaymentSettings {
            mode: PaymentMode::DailyMinimum,
            show_hour_difference: true,
            ..PaymentSettings::default()
        }
    }

    #[test]
    fn test_totals_all_zero_month() {
        let sheet = Timesheet::new(MonthKey::new(2024, 3).unwrap());
        let settings = daily_with_difference();
        let totals = MonthTotals::compute(&sheet, &settings);

        assert_eq!(totals.total_minutes, 0);
        assert_eq!(format_hours(totals.total_hours), "0.00");
        assert_eq!(format_currency(totals.total_amount), "€0.00");
        // 21 working days × 5 hours
        assert_eq!(totals.hour_difference, Some(-105.0));
        assert_eq!(totals.hours_display(), "0.00 (-105.00)");
    }

    #[test]
    fn test_hour_difference_hidden_unless_daily_and_enabled() {
        let sheet = Timesheet::new(MonthKey::new(2024, 3).unwrap());

        let hourly = PaymentSettings {
            show_hour_difference: true,
            ..PaymentSettings::default()
        };
        assert_eq!(MonthTotals::compute(&sheet, &hourly).hour_difference, None);

        let daily_off = PaymentSettings {
            mode: PaymentMode::DailyMinimum,
            ..PaymentSettings::default()
        };
        assert_eq!(MonthTotals::compute(&sheet, &daily_off).hour_difference, None);
        assert_eq!(MonthTotals::compute(&sheet, &daily_off).hours_display(), "0.00");
    }

    #[test]
    fn test_totals_sum_rows() {
        let settings = daily_with_difference();
        let mut sheet = Timesheet::new(MonthKey::new(2024, 4).unwrap());
        sheet.set_minutes(1, "360", &settings).unwrap();
        sheet.set_minutes(2, "180", &settings).unwrap();
        sheet.set_amount(3, "10", &settings).unwrap();

        let totals = MonthTotals::compute(&sheet, &settings);
        assert_eq!(totals.total_minutes, 540);
        assert_eq!(totals.total_hours, 9.0);
        // 68.18 + 45.00 + 10.00
        assert_eq!(format_currency(totals.total_amount), "€123.18");
        // 22 working days × 5 = 110 expected
        assert_eq!(totals.hours_display(), "9.00 (-101.00)");
    }

    #[test]
    fn test_format_hour_difference_sign() {
        assert_eq!(format_hour_difference(0.0), "+0.00");
        assert_eq!(format_hour_difference(2.5), "+2.50");
        assert_eq!(format_hour_difference(-3.25), "-3.25");
        assert_eq!(format_hour_difference(-0.001), "+0.00");
    }

    #[test]
    fn test_calculate_progress() {
        assert_eq!(calculate_progress(50.0, 100.0), 50.0);
        assert_eq!(calculate_progress(120.0, 100.0), 120.0);
        assert_eq!(calculate_progress(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_format_progress_bar() {
        assert_eq!(format_progress_bar(100.0, Some(10)), "[██████████] 100.0%");
        assert_eq!(format_progress_bar(50.0, Some(10)), "[█████░░░░░] 50.0%");
        assert_eq!(format_progress_bar(0.0, Some(10)), "[░░░░░░░░░░] 0.0%");
        // Over-filled months are clamped in the bar
        assert_eq!(format_progress_bar(150.0, Some(4)), "[████] 150.0%");
    }

    #[test]
    fn test_format_month_summary() {
        let settings = daily_with_difference();
        let mut sheet = Timesheet::new(MonthKey::new(2024, 3).unwrap());
        sheet.set_hours(4, "6", &settings).unwrap();
        sheet.set_amount(5, "20", &settings).unwrap();

        let summary = format_month_summary(&sheet, &settings).unwrap();
        assert!(summary.contains("Timesheet - March 2024"));
        assert!(summary.contains("Mode: Daily minimum"));
        assert!(summary.contains("Working days: 21"));
        assert!(summary.contains("Minutes: 360"));
        assert!(summary.contains("Hours: 6.00 (-99.00)"));
        assert!(summary.contains("Expected: 105.00 h"));
        assert!(summary.contains("Manual amounts: 1"));
    }
}
