//! Actions returned by screen event handlers.

use crossterm::event::KeyEvent;

use crate::submission::{Notification, PendingSubmission};

use super::app::Screen;

/// An action that a screen handler returns to the [`App`](super::App).
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No state change needed.
    None,
    /// Send a check that passed local validation.
    Submit(PendingSubmission),
    /// Show a toast.
    Notify(Notification),
    /// Navigate to the given screen.
    Navigate(Screen),
    /// Quit the application.
    Quit,
}

/// Common behavior for all screen state types.
pub trait ScreenState {
    /// Process a key event and return an [`Action`] for the `App` to apply.
    fn handle_key(&mut self, key: KeyEvent) -> Action;
}
