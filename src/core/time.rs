//! Row time conversion between minutes and decimal hours.
//!
//! Typed input is coerced silently: anything that is not a finite,
//! non-negative number counts as zero.

/// Rounds to two decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Decimal hours for a minute count, rounded to 2 decimals.
#[must_use]
pub fn minutes_to_hours(minutes: u32) -> f64 {
    round2(f64::from(minutes) / 60.0)
}

/// Whole minutes for a decimal hour value, rounded to the nearest minute.
#[must_use]
pub fn hours_to_minutes(hours: f64) -> u32 {
    to_whole_minutes(sanitize(hours) * 60.0)
}

/// Parses a typed number, treating blanks, garbage, negatives and non-finite values as 0.
///
/// A leading currency sign is tolerated so that displayed amounts like `€12.50`
/// can be pasted back in.
#[must_use]
pub fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim().trim_start_matches('€').trim();
    sanitize(trimmed.replace(',', ".").parse::<f64>().unwrap_or(0.0))
}

/// Parses typed minutes; fractional minutes round to the nearest whole minute.
#[must_use]
pub fn parse_minutes(raw: &str) -> u32 {
    to_whole_minutes(parse_number(raw))
}

/// Parses typed decimal hours.
#[must_use]
pub fn parse_hours(raw: &str) -> f64 {
    parse_number(raw)
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_whole_minutes(value: f64) -> u32 {
    // sanitize() leaves a finite non-negative value; clamp keeps the cast in range
    sanitize(value).round().min(f64::from(u32::MAX)) as u32
}
