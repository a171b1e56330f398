//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Download commands
pub mod export;

/// General utility commands
pub mod general;

/// Payment settings commands
pub mod settings;

/// Month selection and row editing commands
pub mod timesheet;

// Export commands
pub use export::*;
pub use general::*;
pub use settings::*;
pub use timesheet::*;
