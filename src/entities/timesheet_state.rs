//! Timesheet state entity - the key-value store behind persistence.
//!
//! Every persisted value lives in one row keyed by a string: the selected
//! month (`selectedMonth`), one JSON snapshot per month (`timesheet_YYYY-MM`)
//! and the payment settings (`timesheetSettings`).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Key-value row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "timesheet_state")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Storage key (e.g., `"timesheet_2024-03"`)
    #[sea_orm(unique)]
    pub key: String,
    /// Stored value; JSON for snapshots and settings, `YYYY-MM` for the selected month
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// When this key was last written
    pub updated_at: DateTime,
}

/// `TimesheetState` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
