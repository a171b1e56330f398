//! The editing session: one active month plus the process-wide settings.
//!
//! Each operation runs to completion: it mutates the in-memory model, and
//! when anything persisted changed it writes the affected keys before
//! returning. Callers read totals and render the grid from the session
//! afterwards rather than keeping copies.

use crate::{
    core::{
        calendar::MonthKey,
        export::{ExportFile, ExportFormat, export_timesheet},
        pay::{PaymentSettings, SettingsUpdate},
        report::MonthTotals,
        storage,
        timesheet::{DayEntry, Timesheet},
    },
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::ConnectionTrait;
use tracing::info;

/// Which time field the user typed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    /// Whole minutes; hours follow
    Minutes,
    /// Decimal hours; minutes follow
    Hours,
}

/// The state behind every command.
#[derive(Debug, Clone, PartialEq)]
pub struct TimesheetSession {
    settings: PaymentSettings,
    sheet: Timesheet,
}

impl TimesheetSession {
    /// Restores the previous session: persisted settings (or `default_settings`
    /// when none were saved) and the last selected month (or the month of `today`).
    pub async fn load<C>(db: &C, default_settings: PaymentSettings, today: NaiveDate) -> Result<Self>
    where
        C: ConnectionTrait,
    {
        let settings = match storage::load_settings(db).await? {
            Some(saved) => saved,
            None => {
                info!("No saved payment settings; using configured defaults");
                default_settings
            }
        };
        let month = storage::load_selected_month(db)
            .await?
            .unwrap_or_else(|| MonthKey::from_date(today));
        let sheet = open_priced(db, month, &settings).await?;
        storage::save_selected_month(db, month).await?;
        Ok(Self { settings, sheet })
    }

    /// Active payment settings
    #[must_use]
    pub const fn settings(&self) -> &PaymentSettings {
        &self.settings
    }

    /// Active month model
    #[must_use]
    pub const fn sheet(&self) -> &Timesheet {
        &self.sheet
    }

    /// Active month
    #[must_use]
    pub const fn month(&self) -> MonthKey {
        self.sheet.month()
    }

    /// Current totals for the active month.
    #[must_use]
    pub fn totals(&self) -> MonthTotals {
        MonthTotals::compute(&self.sheet, &self.settings)
    }

    /// Switches to `month`, loading its snapshot if one exists, and remembers the choice.
    pub async fn select_month<C>(&mut self, db: &C, month: MonthKey) -> Result<&Timesheet>
    where
        C: ConnectionTrait,
    {
        if month != self.sheet.month() {
            self.sheet = open_priced(db, month, &self.settings).await?;
        }
        storage::save_selected_month(db, month).await?;
        Ok(&self.sheet)
    }

    /// Records typed time for `day` and re-persists the month.
    pub async fn edit_time<C>(
        &mut self,
        db: &C,
        day: u32,
        field: TimeField,
        raw: &str,
    ) -> Result<DayEntry>
    where
        C: ConnectionTrait,
    {
        let entry = match field {
            TimeField::Minutes => self.sheet.set_minutes(day, raw, &self.settings)?,
            TimeField::Hours => self.sheet.set_hours(day, raw, &self.settings)?,
        }
        .clone();
        storage::save_month(db, &self.sheet).await?;
        Ok(entry)
    }

    /// Replaces the description for `day` and re-persists the month.
    pub async fn edit_description<C>(&mut self, db: &C, day: u32, text: &str) -> Result<DayEntry>
    where
        C: ConnectionTrait,
    {
        let entry = self.sheet.set_description(day, text)?.clone();
        storage::save_month(db, &self.sheet).await?;
        Ok(entry)
    }

    /// Sets or clears the manual amount for `day` and re-persists the month.
    pub async fn edit_amount<C>(&mut self, db: &C, day: u32, raw: &str) -> Result<DayEntry>
    where
        C: ConnectionTrait,
    {
        let entry = self.sheet.set_amount(day, raw, &self.settings)?.clone();
        storage::save_month(db, &self.sheet).await?;
        Ok(entry)
    }

    /// Applies a settings change. When it can affect pay, every auto row is
    /// re-evaluated and the month re-persisted.
    pub async fn update_settings<C>(&mut self, db: &C, update: &SettingsUpdate) -> Result<&PaymentSettings>
    where
        C: ConnectionTrait,
    {
        if update.is_empty() {
            return Ok(&self.settings);
        }
        self.settings.apply(update)?;
        storage::save_settings(db, &self.settings).await?;
        if update.affects_amounts() {
            let evaluated = self.sheet.recompute_amounts(&self.settings);
            storage::save_month(db, &self.sheet).await?;
            info!("Settings changed; re-evaluated {} rows", evaluated);
        }
        Ok(&self.settings)
    }

    /// Renders the active month in `format`. Neither the model nor storage changes.
    pub fn export(&self, format: ExportFormat) -> Result<ExportFile> {
        export_timesheet(&self.sheet, &self.settings, format)
    }
}

/// Opens `month` and re-prices its auto rows under `settings`, which may have
/// changed since the month was last saved. Manual rows are left alone.
async fn open_priced<C>(db: &C, month: MonthKey, settings: &PaymentSettings) -> Result<Timesheet>
where
    C: ConnectionTrait,
{
    let saved = storage::open_month(db, month).await?;
    let mut sheet = saved.clone();
    sheet.recompute_amounts(settings);
    if sheet != saved {
        info!("Re-priced {} under the current settings", month);
        storage::save_month(db, &sheet).await?;
    }
    Ok(sheet)
}
