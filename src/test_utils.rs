//! Shared test utilities for `TimesheetBuddy`.
//!
//! Helpers for setting up an in-memory database and filling a month with
//! typical entries.

use crate::{
    core::{calendar::MonthKey, pay::PaymentSettings, storage, timesheet::Timesheet},
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all storage and session tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds a month where every working day has `minutes` logged under default settings.
pub fn filled_month(year: i32, month: u32, minutes: u32) -> Result<Timesheet> {
    let settings = PaymentSettings::default();
    let key = MonthKey::new(year, month)?;
    let mut sheet = Timesheet::new(key);
    let workdays: Vec<u32> = sheet
        .entries()
        .iter()
        .filter(|entry| !entry.is_weekend())
        .map(crate::core::timesheet::DayEntry::day)
        .collect();
    for day in workdays {
        sheet.set_minutes(day, &minutes.to_string(), &settings)?;
    }
    Ok(sheet)
}

/// Sets up a database that already holds a saved month.
/// Returns (db, sheet) for reload scenarios.
pub async fn setup_with_month(
    year: i32,
    month: u32,
    minutes: u32,
) -> Result<(DatabaseConnection, Timesheet)> {
    let db = setup_test_db().await?;
    let sheet = filled_month(year, month, minutes)?;
    storage::save_month(&db, &sheet).await?;
    Ok((db, sheet))
}
