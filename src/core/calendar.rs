//! Calendar derivation for the active month.
//!
//! Provides the (year, month) key that selects which grid and which persisted
//! snapshot are active, plus the Gregorian arithmetic the pay policy needs:
//! days per month, weekend detection and the working-day divisor.

use crate::errors::{Error, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use std::{fmt, str::FromStr};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Identifies the active month, formatted as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Creates a month key, rejecting months outside 1..=12 and years outside 1..=9999.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) || !(1..=9999).contains(&year) {
            return Err(Error::InvalidMonth {
                value: format!("{year:04}-{month:02}"),
            });
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Calendar year
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Month number, 1-based
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// Number of days in this month.
    #[must_use]
    pub const fn days_in_month(self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// Number of Monday-Friday days in this month.
    #[must_use]
    pub fn working_days(self) -> u32 {
        working_days(self.year, self.month)
    }

    /// The date of `day` within this month, if it exists.
    #[must_use]
    pub fn date(self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Every date of the month in order.
    pub fn dates(self) -> impl Iterator<Item = NaiveDate> {
        (1..=self.days_in_month()).filter_map(move |day| self.date(day))
    }

    /// English month name, e.g. "March".
    #[must_use]
    pub const fn month_name(self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// Human-readable label, e.g. "March 2024".
    #[must_use]
    pub fn label(self) -> String {
        format!("{} {}", self.month_name(), self.year)
    }

    /// Page title, e.g. "Timesheet - March 2024".
    #[must_use]
    pub fn title(self) -> String {
        format!("Timesheet - {}", self.label())
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidMonth {
            value: s.to_string(),
        };
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

/// Proleptic Gregorian leap-year rule.
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`; 0 for a month outside 1..=12.
#[must_use]
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// True iff the date falls on a Saturday or Sunday. Nonexistent dates are not weekends.
#[must_use]
pub fn is_weekend(year: i32, month: u32, day: u32) -> bool {
    NaiveDate::from_ymd_opt(year, month, day).is_some_and(is_weekend_date)
}

/// Weekend check for an already-constructed date.
#[must_use]
pub fn is_weekend_date(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Count of non-weekend days in the month. Holidays are not considered.
#[must_use]
pub fn working_days(year: i32, month: u32) -> u32 {
    let count = (1..=days_in_month(year, month))
        .filter(|&day| !is_weekend(year, month, day))
        .count();
    // At most 31
    u32::try_from(count).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_days_in_month_leap_february() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
    }

    #[test]
    fn test_days_in_month_matches_chrono_for_every_month() {
        for year in [1, 1999, 2023, 2024, 2100, 2400] {
            for month in 1..=12 {
                let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
                let next = if month == 12 {
                    NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap()
                } else {
                    NaiveDate::from_ymd_opt(year, month + 1, 1).unwrap()
                };
                let expected = u32::try_from(next.signed_duration_since(first).num_days()).unwrap();
                assert_eq!(days_in_month(year, month), expected, "{year}-{month}");
            }
        }
    }

    #[test]
    fn test_is_weekend() {
        // 2024-03-02 was a Saturday, 2024-03-03 a Sunday, 2024-03-04 a Monday
        assert!(is_weekend(2024, 3, 2));
        assert!(is_weekend(2024, 3, 3));
        assert!(!is_weekend(2024, 3, 4));
        assert!(!is_weekend(2024, 2, 30));
    }

    #[test]
    fn test_working_days() {
        assert_eq!(working_days(2024, 3), 21);
        assert_eq!(working_days(2024, 2), 21);
        assert_eq!(working_days(2023, 2), 20);
        assert_eq!(working_days(2024, 7), 23);
        assert_eq!(working_days(2024, 13), 0);
    }

    #[test]
    fn test_month_key_parse_and_display() {
        let key: MonthKey = "2024-03".parse().unwrap();
        assert_eq!(key.year(), 2024);
        assert_eq!(key.month(), 3);
        assert_eq!(key.to_string(), "2024-03");
        assert_eq!("2024-3".parse::<MonthKey>().unwrap(), key);
    }

    #[test]
    fn test_month_key_rejects_garbage() {
        for bad in ["", "2024", "2024-13", "2024-00", "24-03", "abcd-ef", "2024-003"] {
            assert!(bad.parse::<MonthKey>().is_err(), "{bad} should be rejected");
        }
        assert!(MonthKey::new(2024, 0).is_err());
    }

    #[test]
    fn test_month_key_labels_and_dates() {
        let key = MonthKey::new(2024, 2).unwrap();
        assert_eq!(key.month_name(), "February");
        assert_eq!(key.title(), "Timesheet - February 2024");
        assert_eq!(key.dates().count(), 29);
        assert!(key.date(30).is_none());
        assert_eq!(
            MonthKey::from_date(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()).to_string(),
            "2023-12"
        );
    }
}
