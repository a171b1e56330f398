//! Unified error types and result handling for `TimesheetBuddy`.
//!
//! User-typed numbers never produce errors (they coerce to zero); the variants
//! here cover configuration, storage, export and bot transport failures, plus
//! the few inputs the outer surface must reject outright.

use thiserror::Error;

/// Every error the crate can surface.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A month key was not in `YYYY-MM` form or named a month outside 1..=12
    #[error("Invalid month '{value}': expected YYYY-MM")]
    InvalidMonth {
        /// The rejected input
        value: String,
    },

    /// A day number does not exist in the active month
    #[error("Day {day} is outside the active month (1-{days_in_month})")]
    DayOutOfRange {
        /// The requested day
        day: u32,
        /// Number of days in the active month
        days_in_month: u32,
    },

    /// A payment setting was negative or not a finite number
    #[error("Invalid value {value} for setting '{name}'")]
    InvalidSetting {
        /// Setting name
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// An unknown payment mode name
    #[error("Unknown payment mode '{value}': use 'hourly' or 'daily'")]
    UnknownPaymentMode {
        /// The rejected input
        value: String,
    },

    /// An unknown export format name
    #[error("Unknown export format '{value}': use csv, html, word, excel or pdf")]
    UnknownExportFormat {
        /// The rejected input
        value: String,
    },

    /// A document could not be produced
    #[error("Export error: {message}")]
    Export {
        /// What went wrong
        message: String,
    },

    /// Database failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// JSON (de)serialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV writer failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Formatting into a `String` failed
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Missing environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Serenity/Poise framework failure
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
