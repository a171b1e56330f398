//! Persistence adapter over the key-value `timesheet_state` table.
//!
//! Three kinds of keys are stored:
//! - `selectedMonth`: the last active month as `YYYY-MM`
//! - `timesheet_<YYYY-MM>`: a JSON array of day snapshots for that month
//! - `timesheetSettings`: the JSON payment settings
//!
//! An absent key means "no saved data". A present value that no longer
//! deserializes is logged and treated the same way, so a damaged snapshot
//! yields fresh default rows instead of an error.

use crate::{
    core::{
        calendar::MonthKey,
        pay::PaymentSettings,
        timesheet::{DayEntry, Timesheet},
    },
    entities::{TimesheetState, timesheet_state},
    errors::Result,
};
use chrono::{NaiveDate, Utc};
use sea_orm::{Set, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Key holding the last selected month
pub const SELECTED_MONTH_KEY: &str = "selectedMonth";
/// Key holding the payment settings
pub const SETTINGS_KEY: &str = "timesheetSettings";

/// Storage key for one month's rows, e.g. `timesheet_2024-03`.
#[must_use]
pub fn month_storage_key(month: MonthKey) -> String {
    format!("timesheet_{month}")
}

/// Persisted form of one row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySnapshot {
    /// Calendar date, `YYYY-MM-DD`
    pub date: NaiveDate,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Worked minutes
    #[serde(default)]
    pub minutes: u32,
    /// Worked decimal hours
    #[serde(default)]
    pub hours: f64,
    /// Amount at the time of saving
    #[serde(default)]
    pub amount: f64,
    /// Whether the amount was a manual override
    #[serde(default)]
    pub is_manual_amount: bool,
}

impl From<&DayEntry> for DaySnapshot {
    fn from(entry: &DayEntry) -> Self {
        Self {
            date: entry.date(),
            description: entry.description().to_string(),
            minutes: entry.minutes(),
            hours: entry.hours(),
            amount: entry.amount(),
            is_manual_amount: entry.is_manual_amount(),
        }
    }
}

impl From<DaySnapshot> for DayEntry {
    fn from(snapshot: DaySnapshot) -> Self {
        Self::restore(
            snapshot.date,
            snapshot.description,
            snapshot.minutes,
            snapshot.hours,
            snapshot.amount,
            snapshot.is_manual_amount,
        )
    }
}

/// Reads the raw value stored under `key`.
#[instrument(skip(db))]
pub async fn get_value<C>(db: &C, key: &str) -> Result<Option<String>>
where
    C: ConnectionTrait,
{
    let state = TimesheetState::find()
        .filter(timesheet_state::Column::Key.eq(key))
        .one(db)
        .await?;
    debug!("Stored value present for '{}': {}", key, state.is_some());
    Ok(state.map(|s| s.value))
}

/// Writes `value` under `key`, replacing any previous value.
#[instrument(skip(db, value))]
pub async fn set_value<C>(db: &C, key: &str, value: String) -> Result<()>
where
    C: ConnectionTrait,
{
    let now = Utc::now().naive_utc();

    let existing = TimesheetState::find()
        .filter(timesheet_state::Column::Key.eq(key))
        .one(db)
        .await?;

    if let Some(state) = existing {
        let mut active_model: timesheet_state::ActiveModel = state.into();
        active_model.value = Set(value);
        active_model.updated_at = Set(now);
        active_model.update(db).await?;
    } else {
        let new_state = timesheet_state::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value),
            updated_at: Set(now),
            ..Default::default()
        };
        new_state.insert(db).await?;
    }

    debug!("Stored value for '{}'", key);
    Ok(())
}

/// Loads the persisted payment settings, if any.
pub async fn load_settings<C>(db: &C) -> Result<Option<PaymentSettings>>
where
    C: ConnectionTrait,
{
    let Some(raw) = get_value(db, SETTINGS_KEY).await? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(settings) => Ok(Some(PaymentSettings::with_fallbacks(settings))),
        Err(e) => {
            warn!("Ignoring unreadable payment settings: {}", e);
            Ok(None)
        }
    }
}

/// Persists the payment settings.
pub async fn save_settings<C>(db: &C, settings: &PaymentSettings) -> Result<()>
where
    C: ConnectionTrait,
{
    set_value(db, SETTINGS_KEY, serde_json::to_string(settings)?).await
}

/// Loads the last selected month, if any.
pub async fn load_selected_month<C>(db: &C) -> Result<Option<MonthKey>>
where
    C: ConnectionTrait,
{
    let Some(raw) = get_value(db, SELECTED_MONTH_KEY).await? else {
        return Ok(None);
    };
    match raw.parse() {
        Ok(month) => Ok(Some(month)),
        Err(e) => {
            warn!("Ignoring unreadable selected month: {}", e);
            Ok(None)
        }
    }
}

/// Persists the selected month as `YYYY-MM`.
pub async fn save_selected_month<C>(db: &C, month: MonthKey) -> Result<()>
where
    C: ConnectionTrait,
{
    set_value(db, SELECTED_MONTH_KEY, month.to_string()).await
}

/// Loads the saved rows for `month`, if any.
pub async fn load_month_snapshot<C>(db: &C, month: MonthKey) -> Result<Option<Vec<DaySnapshot>>>
where
    C: ConnectionTrait,
{
    let key = month_storage_key(month);
    let Some(raw) = get_value(db, &key).await? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(rows) => Ok(Some(rows)),
        Err(e) => {
            warn!("Ignoring unreadable snapshot '{}': {}", key, e);
            Ok(None)
        }
    }
}

/// Persists every row of `sheet` under its month key.
pub async fn save_month<C>(db: &C, sheet: &Timesheet) -> Result<()>
where
    C: ConnectionTrait,
{
    let rows: Vec<DaySnapshot> = sheet.entries().iter().map(DaySnapshot::from).collect();
    set_value(db, &month_storage_key(sheet.month()), serde_json::to_string(&rows)?).await
}

/// Builds the grid for `month`: fresh default rows, overwritten by the saved
/// snapshot where one exists.
///
/// Saved rows are restored exactly, amounts included; re-evaluating them
/// against the current settings is the caller's job. Rows whose date falls
/// outside `month` are skipped with a warning, and an unreadable snapshot
/// yields an all-default month.
///
/// # Arguments
/// * `db` - Database connection
/// * `month` - The month to open
///
/// # Returns
/// * `Ok(Timesheet)` - One row per calendar day of `month`
/// * `Err(Error)` - The underlying database read failed
pub async fn open_month<C>(db: &C, month: MonthKey) -> Result<Timesheet>
where
    C: ConnectionTrait,
{
    let mut sheet = Timesheet::new(month);
    match load_month_snapshot(db, month).await? {
        Some(rows) => {
            let total = rows.len();
            let mut restored = 0;
            for row in rows {
                if sheet.restore_entry(DayEntry::from(row)) {
                    restored += 1;
                }
            }
            if restored != total {
                warn!(
                    "Snapshot for {} had {} rows outside the month",
                    month,
                    total - restored
                );
            }
            info!("Opened {} with {} saved rows", month, restored);
        }
        None => info!("Opened {} with fresh rows", month),
    }
    Ok(sheet)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{core::pay::PaymentMode, test_utils::*};

    fn march() -> MonthKey {
        MonthKey::new(2024, 3).unwrap()
    }

    #[tokio::test]
    async fn test_get_missing_key() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(get_value(&db, "nothing_here").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_set_value_overwrites_single_row() -> Result<()> {
        let db = setup_test_db().await?;
        set_value(&db, "k", "first".to_string()).await?;
        set_value(&db, "k", "second".to_string()).await?;

        assert_eq!(get_value(&db, "k").await?, Some("second".to_string()));
        let count = TimesheetState::find()
            .filter(timesheet_state::Column::Key.eq("k"))
            .count(&db)
            .await?;
        assert_eq!(count, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_settings_round_trip() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(load_settings(&db).await?.is_none());

        let settings = PaymentSettings {
            mode: PaymentMode::DailyMinimum,
            hourly_rate: 18.5,
            monthly_pay: 2000.0,
            min_daily_hours: 6.0,
            show_hour_difference: true,
        };
        save_settings(&db, &settings).await?;
        assert_eq!(load_settings(&db).await?, Some(settings));
        Ok(())
    }

    #[tokio::test]
    async fn test_zero_rate_and_threshold_load_as_defaults() -> Result<()> {
        let db = setup_test_db().await?;
        let raw = r#"{"mode":"daily","hourlyRate":0,"monthlyPay":1500,"minDailyHours":0}"#;
        set_value(&db, SETTINGS_KEY, raw.to_string()).await?;

        let settings = load_settings(&db).await?.unwrap();
        assert_eq!(settings.mode, PaymentMode::DailyMinimum);
        assert_eq!(settings.hourly_rate, 15.0);
        assert_eq!(settings.min_daily_hours, 5.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_corrupt_settings_count_as_absent() -> Result<()> {
        let db = setup_test_db().await?;
        set_value(&db, SETTINGS_KEY, "{not json".to_string()).await?;
        assert!(load_settings(&db).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_selected_month_round_trip() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(load_selected_month(&db).await?.is_none());

        save_selected_month(&db, march()).await?;
        assert_eq!(
            get_value(&db, SELECTED_MONTH_KEY).await?,
            Some("2024-03".to_string())
        );
        assert_eq!(load_selected_month(&db).await?, Some(march()));
        Ok(())
    }

    #[tokio::test]
    async fn test_month_round_trip_reproduces_rows() -> Result<()> {
        let db = setup_test_db().await?;
        let settings = PaymentSettings::default();

        let mut sheet = Timesheet::new(march());
        sheet.set_minutes(4, "95", &settings)?;
        sheet.set_hours(5, "7.25", &settings)?;
        sheet.set_description(5, "Release, \"hotfix\"")?;
        sheet.set_amount(6, "50.00", &settings)?;
        save_month(&db, &sheet).await?;

        let reopened = open_month(&db, march()).await?;
        assert_eq!(reopened, sheet);
        assert!(reopened.entry(6)?.is_manual_amount());
        assert_eq!(reopened.entry(4)?.hours(), 1.58);
        Ok(())
    }

    #[tokio::test]
    async fn test_open_month_without_snapshot_is_fresh() -> Result<()> {
        let db = setup_test_db().await?;
        let sheet = open_month(&db, march()).await?;
        assert_eq!(sheet, Timesheet::new(march()));
        Ok(())
    }

    #[tokio::test]
    async fn test_snapshot_key_per_month() -> Result<()> {
        let db = setup_test_db().await?;
        let settings = PaymentSettings::default();
        let mut sheet = Timesheet::new(march());
        sheet.set_minutes(1, "60", &settings)?;
        save_month(&db, &sheet).await?;

        assert!(get_value(&db, "timesheet_2024-03").await?.is_some());
        let april = open_month(&db, MonthKey::new(2024, 4).unwrap()).await?;
        assert!(april.entries().iter().all(|e| e.minutes() == 0));
        Ok(())
    }

    #[tokio::test]
    async fn test_partial_and_foreign_snapshot_rows() -> Result<()> {
        let db = setup_test_db().await?;
        let raw = r#"[
            {"date":"2024-03-02","minutes":30,"hours":0.5,"amount":7.5},
            {"date":"2024-04-01","minutes":60,"hours":1.0,"amount":15.0}
        ]"#;
        set_value(&db, "timesheet_2024-03", raw.to_string()).await?;

        let sheet = open_month(&db, march()).await?;
        assert_eq!(sheet.entry(2)?.minutes(), 30);
        assert_eq!(sheet.entry(2)?.description(), "");
        assert!(!sheet.entry(2)?.is_manual_amount());
        assert_eq!(sheet.entry(1)?.minutes(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_saved_month_reopens_with_totals() -> Result<()> {
        // February 2024 has 21 working days
        let (db, sheet) = setup_with_month(2024, 2, 480).await?;
        let reopened = open_month(&db, sheet.month()).await?;
        assert_eq!(reopened, sheet);
        let total: f64 = reopened.entries().iter().map(DayEntry::amount).sum();
        assert_eq!(total, 21.0 * 120.0);
        Ok(())
    }

    #[test]
    fn test_snapshot_json_shape() {
        let entry = DayEntry::restore(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            "Planning".to_string(),
            90,
            1.5,
            22.5,
            true,
        );
        let json = serde_json::to_string(&DaySnapshot::from(&entry)).unwrap();
        assert_eq!(
            json,
            r#"{"date":"2024-03-01","description":"Planning","minutes":90,"hours":1.5,"amount":22.5,"isManualAmount":true}"#
        );
    }
}
