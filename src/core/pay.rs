//! Pay policy evaluation.
//!
//! Two compensation policies exist. `Hourly` pays hours × rate unconditionally.
//! `DailyMinimum` awards a fixed daily rate (monthly pay spread over the
//! month's working days) once a day reaches the minimum hours, and falls back
//! to hourly pay below it.

use crate::{
    core::{calendar::MonthKey, time::round2},
    errors::{Error, Result},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Default hourly rate
pub const DEFAULT_HOURLY_RATE: f64 = 15.0;
/// Default monthly salary used by the daily-minimum policy
pub const DEFAULT_MONTHLY_PAY: f64 = 1500.0;
/// Default daily hour threshold used by the daily-minimum policy
pub const DEFAULT_MIN_DAILY_HOURS: f64 = 5.0;

/// Which compensation policy is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentMode {
    /// amount = hours × hourly rate
    #[default]
    #[serde(rename = "hourly")]
    Hourly,
    /// Daily rate at or above the threshold, hourly pay below it
    #[serde(rename = "daily")]
    DailyMinimum,
}

impl PaymentMode {
    /// Short name used in storage, config and commands.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::DailyMinimum => "daily",
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hourly => f.write_str("Hourly"),
            Self::DailyMinimum => f.write_str("Daily minimum"),
        }
    }
}

impl FromStr for PaymentMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "hourly" => Ok(Self::Hourly),
            "daily" | "dailyminimum" | "daily_minimum" | "daily minimum" => Ok(Self::DailyMinimum),
            _ => Err(Error::UnknownPaymentMode {
                value: s.to_string(),
            }),
        }
    }
}

/// Process-wide payment settings, persisted independently of any month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentSettings {
    /// Active policy
    pub mode: PaymentMode,
    /// Currency per hour
    pub hourly_rate: f64,
    /// Currency per month, only used in daily-minimum mode
    pub monthly_pay: f64,
    /// Hour threshold per day, only used in daily-minimum mode
    pub min_daily_hours: f64,
    /// Whether totals show the expected-vs-actual hour delta
    pub show_hour_difference: bool,
}

impl Default for PaymentSettings {
    fn default() -> Self {
        Self {
            mode: PaymentMode::Hourly,
            hourly_rate: DEFAULT_HOURLY_RATE,
            monthly_pay: DEFAULT_MONTHLY_PAY,
            min_daily_hours: DEFAULT_MIN_DAILY_HOURS,
            show_hour_difference: false,
        }
    }
}

/// A partial change to [`PaymentSettings`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsUpdate {
    /// New policy
    pub mode: Option<PaymentMode>,
    /// New hourly rate
    pub hourly_rate: Option<f64>,
    /// New monthly pay
    pub monthly_pay: Option<f64>,
    /// New daily threshold
    pub min_daily_hours: Option<f64>,
    /// New hour-difference toggle
    pub show_hour_difference: Option<bool>,
}

impl SettingsUpdate {
    /// True when nothing would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.mode.is_none()
            && self.hourly_rate.is_none()
            && self.monthly_pay.is_none()
            && self.min_daily_hours.is_none()
            && self.show_hour_difference.is_none()
    }

    /// True when applying this update can change any computed amount.
    #[must_use]
    pub const fn affects_amounts(&self) -> bool {
        self.mode.is_some()
            || self.hourly_rate.is_some()
            || self.monthly_pay.is_some()
            || self.min_daily_hours.is_some()
    }
}

impl PaymentSettings {
    /// Applies `update`, validating every numeric field before changing anything.
    ///
    /// A zero hourly rate or zero daily threshold falls back to its default,
    /// so an emptied field never makes every blank day earn the daily rate.
    pub fn apply(&mut self, update: &SettingsUpdate) -> Result<()> {
        let hourly_rate = validated("hourly_rate", update.hourly_rate)?;
        let monthly_pay = validated("monthly_pay", update.monthly_pay)?;
        let min_daily_hours = validated("min_daily_hours", update.min_daily_hours)?;

        if let Some(mode) = update.mode {
            self.mode = mode;
        }
        if let Some(rate) = hourly_rate {
            self.hourly_rate = or_default(rate, DEFAULT_HOURLY_RATE);
        }
        if let Some(pay) = monthly_pay {
            self.monthly_pay = pay;
        }
        if let Some(hours) = min_daily_hours {
            self.min_daily_hours = or_default(hours, DEFAULT_MIN_DAILY_HOURS);
        }
        if let Some(show) = update.show_hour_difference {
            self.show_hour_difference = show;
        }
        Ok(())
    }

    /// The fixed amount awarded for a day that meets the threshold.
    ///
    /// Zero when the month has no working days, which no valid Gregorian month produces.
    #[must_use]
    pub fn daily_rate(&self, month: MonthKey) -> f64 {
        let working_days = month.working_days();
        if working_days == 0 {
            return 0.0;
        }
        self.monthly_pay / f64::from(working_days)
    }

    /// Hours the daily-minimum policy expects across the whole month.
    #[must_use]
    pub fn expected_hours(&self, month: MonthKey) -> f64 {
        f64::from(month.working_days()) * self.min_daily_hours
    }

    /// Pay for one row, rounded to cents.
    ///
    /// In `Hourly` mode this is simply `hours × hourly_rate`. In `DailyMinimum`
    /// mode a row that reaches `min_daily_hours` earns the month's daily rate
    /// regardless of how far above the threshold it goes; a row below it is
    /// paid hourly.
    ///
    /// # Arguments
    /// * `hours` - Decimal hours worked on the row
    /// * `month` - The month the row belongs to; fixes the daily rate
    ///
    /// # Returns
    /// The row amount rounded to two decimals
    #[must_use]
    pub fn evaluate_amount(&self, hours: f64, month: MonthKey) -> f64 {
        let amount = match self.mode {
            PaymentMode::Hourly => hours * self.hourly_rate,
            PaymentMode::DailyMinimum if hours >= self.min_daily_hours => self.daily_rate(month),
            PaymentMode::DailyMinimum => hours * self.hourly_rate,
        };
        round2(amount)
    }

    /// Replaces a zero hourly rate or zero threshold with its default.
    ///
    /// Used for settings read back from storage, which may predate validation.
    #[must_use]
    pub fn with_fallbacks(mut self) -> Self {
        self.hourly_rate = or_default(self.hourly_rate, DEFAULT_HOURLY_RATE);
        self.min_daily_hours = or_default(self.min_daily_hours, DEFAULT_MIN_DAILY_HOURS);
        self
    }

    /// Whether the hour-difference line belongs in the totals.
    #[must_use]
    pub fn shows_hour_difference(&self) -> bool {
        self.mode == PaymentMode::DailyMinimum && self.show_hour_difference
    }
}

fn or_default(value: f64, default: f64) -> f64 {
    if value == 0.0 { default } else { value }
}

fn validated(name: &'static str, value: Option<f64>) -> Result<Option<f64>> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(Error::InvalidSetting { name, value: v }),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    fn march_2024() -> MonthKey {
        MonthKey::new(2024, 3).unwrap()
    }

    fn daily(monthly_pay: f64, min_daily_hours: f64) -> PaymentSettings {
        PaymentSettings {
            mode: PaymentMode::DailyMinimum,
            monthly_pay,
            min_daily_hours,
            ..PaymentSettings::default()
        }
    }

    #[test]
    fn test_defaults() {
        let settings = PaymentSettings::default();
        assert_eq!(settings.mode, PaymentMode::Hourly);
        assert_eq!(settings.hourly_rate, 15.0);
        assert_eq!(settings.monthly_pay, 1500.0);
        assert_eq!(settings.min_daily_hours, 5.0);
        assert!(!settings.show_hour_difference);
    }

    #[test]
    fn test_hourly_amount() {
        let settings = PaymentSettings::default();
        assert_eq!(settings.evaluate_amount(8.0, march_2024()), 120.0);
        assert_eq!(settings.evaluate_amount(0.0, march_2024()), 0.0);
    }

    #[test]
    fn test_daily_minimum_meets_threshold() {
        // April 2024 starts on a Monday: 30 days, 8 weekend days
        let april = MonthKey::new(2024, 4).unwrap();
        assert_eq!(april.working_days(), 22);

        let settings = daily(1500.0, 5.0);
        assert_eq!(settings.evaluate_amount(6.0, april), 68.18);
        // Exceeding the threshold by more pays the same daily rate
        assert_eq!(settings.evaluate_amount(12.0, april), 68.18);
        // Exactly meeting the threshold counts
        assert_eq!(settings.evaluate_amount(5.0, april), 68.18);
    }

    #[test]
    fn test_daily_minimum_below_threshold_falls_back_to_hourly() {
        let settings = daily(1500.0, 5.0);
        assert_eq!(settings.evaluate_amount(3.0, march_2024()), 45.0);
        assert_eq!(settings.evaluate_amount(4.99, march_2024()), 74.85);
    }

    #[test]
    fn test_expected_hours() {
        let settings = daily(1500.0, 5.0);
        assert_eq!(settings.expected_hours(march_2024()), 105.0);
    }

    #[test]
    fn test_apply_update_validates_before_mutating() {
        let mut settings = PaymentSettings::default();
        let bad = SettingsUpdate {
            mode: Some(PaymentMode::DailyMinimum),
            hourly_rate: Some(-1.0),
            ..SettingsUpdate::default()
        };
        assert!(settings.apply(&bad).is_err());
        assert_eq!(settings, PaymentSettings::default());

        let good = SettingsUpdate {
            mode: Some(PaymentMode::DailyMinimum),
            hourly_rate: Some(20.0),
            show_hour_difference: Some(true),
            ..SettingsUpdate::default()
        };
        settings.apply(&good).unwrap();
        assert_eq!(settings.mode, PaymentMode::DailyMinimum);
        assert_eq!(settings.hourly_rate, 20.0);
        assert!(settings.shows_hour_difference());
    }

    #[test]
    fn test_zero_threshold_and_rate_fall_back_to_defaults() {
        let mut settings = PaymentSettings::default();
        settings
            .apply(&SettingsUpdate {
                mode: Some(PaymentMode::DailyMinimum),
                hourly_rate: Some(0.0),
                min_daily_hours: Some(0.0),
                ..SettingsUpdate::default()
            })
            .unwrap();
        assert_eq!(settings.hourly_rate, DEFAULT_HOURLY_RATE);
        assert_eq!(settings.min_daily_hours, DEFAULT_MIN_DAILY_HOURS);
        // An empty day stays unpaid
        assert_eq!(settings.evaluate_amount(0.0, march_2024()), 0.0);

        let stored = PaymentSettings {
            hourly_rate: 0.0,
            min_daily_hours: 0.0,
            ..daily(1500.0, 5.0)
        }
        .with_fallbacks();
        assert_eq!(stored, daily(1500.0, 5.0));
    }

    #[test]
    fn test_update_flags() {
        assert!(SettingsUpdate::default().is_empty());
        let toggle_only = SettingsUpdate {
            show_hour_difference: Some(true),
            ..SettingsUpdate::default()
        };
        assert!(!toggle_only.is_empty());
        assert!(!toggle_only.affects_amounts());
    }

    #[test]
    fn test_payment_mode_parse() {
        assert_eq!("hourly".parse::<PaymentMode>().unwrap(), PaymentMode::Hourly);
        assert_eq!("Daily".parse::<PaymentMode>().unwrap(), PaymentMode::DailyMinimum);
        assert!("weekly".parse::<PaymentMode>().is_err());
    }

    #[test]
    fn test_settings_json_shape_and_defaults() {
        let json = serde_json::to_string(&daily(1500.0, 5.0)).unwrap();
        assert!(json.contains("\"mode\":\"daily\""));
        assert!(json.contains("\"hourlyRate\":15.0"));
        assert!(json.contains("\"minDailyHours\":5.0"));

        let partial: PaymentSettings = serde_json::from_str(r#"{"mode":"daily"}"#).unwrap();
        assert_eq!(partial.mode, PaymentMode::DailyMinimum);
        assert_eq!(partial.hourly_rate, 15.0);
    }
}
