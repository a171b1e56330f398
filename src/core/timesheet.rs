//! The in-memory month model.
//!
//! A [`Timesheet`] owns one [`DayEntry`] per calendar day of its month. All
//! edits go through it so that minutes, hours and amount stay consistent:
//! whichever of minutes/hours was edited last drives the other, and every time
//! edit re-evaluates the row's pay unless the amount is a manual override.

use crate::{
    core::{
        calendar::{MonthKey, is_weekend_date},
        pay::PaymentSettings,
        time::{hours_to_minutes, minutes_to_hours, parse_hours, parse_minutes, parse_number, round2},
    },
    errors::{Error, Result},
};
use chrono::{Datelike, NaiveDate};

/// Who owns a row's amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Amount {
    /// Computed by the pay policy; rewritten on every recompute
    Auto(f64),
    /// Typed by the user; the pay policy never writes it
    Manual(f64),
}

impl Amount {
    /// The monetary value regardless of owner.
    #[must_use]
    pub const fn value(self) -> f64 {
        match self {
            Self::Auto(value) | Self::Manual(value) => value,
        }
    }

    /// True for a user override.
    #[must_use]
    pub const fn is_manual(self) -> bool {
        matches!(self, Self::Manual(_))
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::Auto(0.0)
    }
}

/// One row of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DayEntry {
    date: NaiveDate,
    description: String,
    minutes: u32,
    hours: f64,
    amount: Amount,
}

impl DayEntry {
    /// A fresh row with empty description and zero time and pay.
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            description: String::new(),
            minutes: 0,
            hours: 0.0,
            amount: Amount::default(),
        }
    }

    /// Rebuilds a row from persisted values without re-evaluating pay.
    #[must_use]
    pub fn restore(
        date: NaiveDate,
        description: String,
        minutes: u32,
        hours: f64,
        amount: f64,
        is_manual_amount: bool,
    ) -> Self {
        let amount = if is_manual_amount {
            Amount::Manual(amount)
        } else {
            Amount::Auto(amount)
        };
        Self {
            date,
            description,
            minutes,
            hours,
            amount,
        }
    }

    /// Calendar date
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Day of month, 1-based
    #[must_use]
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// Saturday or Sunday
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        is_weekend_date(self.date)
    }

    /// Free-text description
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Worked minutes
    #[must_use]
    pub const fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Worked decimal hours
    #[must_use]
    pub const fn hours(&self) -> f64 {
        self.hours
    }

    /// Current amount value
    #[must_use]
    pub const fn amount(&self) -> f64 {
        self.amount.value()
    }

    /// Current amount with its owner
    #[must_use]
    pub const fn amount_state(&self) -> Amount {
        self.amount
    }

    /// Whether the amount is a manual override
    #[must_use]
    pub const fn is_manual_amount(&self) -> bool {
        self.amount.is_manual()
    }

    /// Date as shown in the grid and exports, `DD.MM.YYYY`.
    #[must_use]
    pub fn display_date(&self) -> String {
        self.date.format("%d.%m.%Y").to_string()
    }

    /// Re-evaluates pay for an auto row. Returns whether the row was evaluated.
    fn recompute(&mut self, settings: &PaymentSettings, month: MonthKey) -> bool {
        match self.amount {
            Amount::Auto(_) => {
                self.amount = Amount::Auto(settings.evaluate_amount(self.hours, month));
                true
            }
            Amount::Manual(_) => false,
        }
    }
}

/// One month of rows, in calendar order.
#[derive(Debug, Clone, PartialEq)]
pub struct Timesheet {
    month: MonthKey,
    entries: Vec<DayEntry>,
}

impl Timesheet {
    /// Generates one default row per day of `month`.
    #[must_use]
    pub fn new(month: MonthKey) -> Self {
        Self {
            month,
            entries: month.dates().map(DayEntry::new).collect(),
        }
    }

    /// The month this sheet covers
    #[must_use]
    pub const fn month(&self) -> MonthKey {
        self.month
    }

    /// All rows in calendar order
    #[must_use]
    pub fn entries(&self) -> &[DayEntry] {
        &self.entries
    }

    /// The row for `day`.
    pub fn entry(&self, day: u32) -> Result<&DayEntry> {
        let index = self.index_of(day)?;
        Ok(&self.entries[index])
    }

    fn index_of(&self, day: u32) -> Result<usize> {
        let days_in_month = self.month.days_in_month();
        if day == 0 || day > days_in_month {
            return Err(Error::DayOutOfRange { day, days_in_month });
        }
        Ok((day - 1) as usize)
    }

    fn entry_mut(&mut self, day: u32) -> Result<&mut DayEntry> {
        let index = self.index_of(day)?;
        Ok(&mut self.entries[index])
    }

    /// Replaces the row with the same date. Rows from another month are ignored.
    ///
    /// Returns whether the row was taken.
    pub fn restore_entry(&mut self, entry: DayEntry) -> bool {
        if MonthKey::from_date(entry.date) != self.month {
            return false;
        }
        match self.entries.iter_mut().find(|e| e.date == entry.date) {
            Some(slot) => {
                *slot = entry;
                true
            }
            None => false,
        }
    }

    /// Minutes edit: hours follow, then pay is re-evaluated.
    pub fn set_minutes(
        &mut self,
        day: u32,
        raw: &str,
        settings: &PaymentSettings,
    ) -> Result<&DayEntry> {
        let month = self.month;
        let entry = self.entry_mut(day)?;
        entry.minutes = parse_minutes(raw);
        entry.hours = minutes_to_hours(entry.minutes);
        entry.recompute(settings, month);
        Ok(&*entry)
    }

    /// Hours edit: minutes follow, then pay is re-evaluated.
    pub fn set_hours(
        &mut self,
        day: u32,
        raw: &str,
        settings: &PaymentSettings,
    ) -> Result<&DayEntry> {
        let month = self.month;
        let entry = self.entry_mut(day)?;
        entry.hours = parse_hours(raw);
        entry.minutes = hours_to_minutes(entry.hours);
        entry.recompute(settings, month);
        Ok(&*entry)
    }

    /// Description edit; pay is unaffected.
    pub fn set_description(&mut self, day: u32, text: &str) -> Result<&DayEntry> {
        let entry = self.entry_mut(day)?;
        entry.description = text.to_string();
        Ok(&*entry)
    }

    /// Amount edit.
    ///
    /// A blank or zero value hands the row back to the pay policy and
    /// re-evaluates it immediately; anything else becomes a manual override.
    pub fn set_amount(
        &mut self,
        day: u32,
        raw: &str,
        settings: &PaymentSettings,
    ) -> Result<&DayEntry> {
        let month = self.month;
        let entry = self.entry_mut(day)?;
        let typed = round2(parse_number(raw));
        if typed == 0.0 {
            entry.amount = Amount::Auto(0.0);
            entry.recompute(settings, month);
        } else {
            entry.amount = Amount::Manual(typed);
        }
        Ok(&*entry)
    }

    /// Re-evaluates every auto row. Returns how many rows were evaluated.
    pub fn recompute_amounts(&mut self, settings: &PaymentSettings) -> usize {
        let month = self.month;
        let mut evaluated = 0;
        for entry in &mut self.entries {
            if entry.recompute(settings, month) {
                evaluated += 1;
            }
        }
        evaluated
    }
}
