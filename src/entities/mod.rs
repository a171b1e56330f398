//! Entity module - Contains the SeaORM entity definitions for the database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod timesheet_state;

pub use timesheet_state::{
    Column as TimesheetStateColumn, Entity as TimesheetState, Model as TimesheetStateModel,
};
