//! Core business logic - framework-agnostic timesheet operations.
//! Nothing in here knows about Discord; the bot layer calls into these modules.

pub mod calendar;
pub mod export;
pub mod grid;
pub mod pay;
pub mod report;
pub mod session;
pub mod storage;
pub mod time;
pub mod timesheet;
