//! Payment defaults loaded from `config.toml`.
//!
//! The `[payment]` section seeds the settings used until the user saves their
//! own. Every field is optional:
//!
//! ```toml
//! [payment]
//! mode = "daily"
//! hourly_rate = 18.5
//! monthly_pay = 2200
//! min_daily_hours = 6
//! show_hour_difference = true
//! ```

use crate::{
    core::pay::{
        DEFAULT_HOURLY_RATE, DEFAULT_MIN_DAILY_HOURS, DEFAULT_MONTHLY_PAY, PaymentMode,
        PaymentSettings, SettingsUpdate,
    },
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Used when `TIMESHEET_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// The whole config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Initial payment settings
    #[serde(default)]
    pub payment: PaymentConfig,
}

/// The `[payment]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaymentConfig {
    /// `"hourly"` or `"daily"`
    pub mode: String,
    /// Euros per hour
    pub hourly_rate: f64,
    /// Euros per month under the daily minimum policy
    pub monthly_pay: f64,
    /// Hours a day must reach to earn the daily rate
    pub min_daily_hours: f64,
    /// Show worked minus expected hours next to the total
    pub show_hour_difference: bool,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            mode: PaymentMode::Hourly.as_str().to_string(),
            hourly_rate: DEFAULT_HOURLY_RATE,
            monthly_pay: DEFAULT_MONTHLY_PAY,
            min_daily_hours: DEFAULT_MIN_DAILY_HOURS,
            show_hour_difference: false,
        }
    }
}

impl PaymentConfig {
    /// Validates the section and converts it into settings.
    pub fn to_settings(&self) -> Result<PaymentSettings> {
        let mut settings = PaymentSettings {
            mode: self.mode.parse()?,
            show_hour_difference: self.show_hour_difference,
            ..PaymentSettings::default()
        };
        settings.apply(&SettingsUpdate {
            hourly_rate: Some(self.hourly_rate),
            monthly_pay: Some(self.monthly_pay),
            min_daily_hours: Some(self.min_daily_hours),
            ..Default::default()
        })?;
        Ok(settings)
    }
}

/// Parses config.toml contents.
pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the configuration from `path`. A missing file yields defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    if !path.exists() {
        info!("No config file at {}; using defaults", path.display());
        return Ok(Config::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;
    parse_config(&contents)
}

/// Path named by `TIMESHEET_CONFIG`, or `config.toml`.
#[must_use]
pub fn config_path() -> PathBuf {
    std::env::var("TIMESHEET_CONFIG")
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Loads the default payment settings from the configured file.
pub fn load_default_settings() -> Result<PaymentSettings> {
    load_config(config_path())?.payment.to_settings()
}
