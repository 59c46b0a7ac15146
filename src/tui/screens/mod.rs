//! TUI screen implementations.

pub mod help;
pub mod inspection;

pub use help::{HelpState, draw_help};
pub use inspection::{Focus, InspectionState, SubmittedCheck, draw_inspection};
