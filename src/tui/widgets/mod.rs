//! Reusable TUI widgets.

pub mod checklist;
pub mod form;
pub mod toast;

pub use checklist::{CHECKLIST_HEIGHT, draw_checklist};
pub use form::{FormRow, ROW_HEIGHT, RowKind, draw_row};
pub use toast::{TOAST_TTL, Toasts, draw_toast};
