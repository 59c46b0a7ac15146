//! Toast widget: the most recent notification, shown on the bottom line
//! until it expires.

use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::submission::{Notification, NotificationKind};

/// How long a toast stays visible.
pub const TOAST_TTL: Duration = Duration::from_secs(4);

/// Holds the current toast, if any.
#[derive(Debug, Clone, Default)]
pub struct Toasts {
    current: Option<(Notification, Instant)>,
}

impl Toasts {
    /// Shows `notification`, replacing any current toast.
    pub fn push(&mut self, notification: Notification) {
        self.push_at(notification, Instant::now());
    }

    pub fn push_at(&mut self, notification: Notification, now: Instant) {
        self.current = Some((notification, now));
    }

    /// Returns the toast still visible at `now`.
    pub fn visible_at(&self, now: Instant) -> Option<&Notification> {
        self.current
            .as_ref()
            .filter(|(_, shown)| now.saturating_duration_since(*shown) < TOAST_TTL)
            .map(|(n, _)| n)
    }

    /// Drops the toast once it has expired at `now`.
    pub fn expire(&mut self, now: Instant) {
        if self.visible_at(now).is_none() {
            self.current = None;
        }
    }
}

fn style_for(kind: NotificationKind) -> Style {
    let color = match kind {
        NotificationKind::Success => Color::Green,
        NotificationKind::Error => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Renders a one-line toast. Renders nothing when `toast` is `None`.
#[mutants::skip]
pub fn draw_toast(toast: Option<&Notification>, frame: &mut Frame, area: Rect) {
    let Some(toast) = toast else {
        return;
    };
    let line = Line::from(Span::styled(
        format!(" {} ", toast.message),
        style_for(toast.kind),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
        let mut s = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
            }
            s.push('\n');
        }
        s
    }

    fn render_toast(toast: Option<&Notification>) -> ratatui::buffer::Buffer {
        let backend = TestBackend::new(50, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| draw_toast(toast, frame, frame.area()))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    #[test]
    fn new_toast_is_visible() {
        let now = Instant::now();
        let mut toasts = Toasts::default();
        toasts.push_at(Notification::success("Check submitted"), now);
        assert_eq!(
            toasts.visible_at(now + Duration::from_secs(1)),
            Some(&Notification::success("Check submitted"))
        );
    }

    #[test]
    fn toast_expires_after_ttl() {
        let now = Instant::now();
        let mut toasts = Toasts::default();
        toasts.push_at(Notification::error("nope"), now);
        assert!(toasts.visible_at(now + TOAST_TTL).is_none());
        toasts.expire(now + TOAST_TTL);
        assert!(toasts.visible_at(now).is_none());
    }

    #[test]
    fn expire_keeps_fresh_toast() {
        let now = Instant::now();
        let mut toasts = Toasts::default();
        toasts.push_at(Notification::error("nope"), now);
        toasts.expire(now + Duration::from_millis(10));
        assert!(toasts.visible_at(now).is_some());
    }

    #[test]
    fn newer_toast_replaces_older() {
        let now = Instant::now();
        let mut toasts = Toasts::default();
        toasts.push_at(Notification::error("first"), now);
        toasts.push_at(Notification::success("second"), now);
        assert_eq!(toasts.visible_at(now).map(|n| n.message.as_str()), Some("second"));
    }

    #[test]
    fn renders_message() {
        let buf = render_toast(Some(&Notification::error("odometerKm: must be positive")));
        assert!(buffer_to_string(&buf).contains("odometerKm: must be positive"));
    }

    #[test]
    fn success_is_green_error_is_red() {
        let buf = render_toast(Some(&Notification::success("ok")));
        assert_eq!(buf[(1, 0)].fg, Color::Green);
        let buf = render_toast(Some(&Notification::error("bad")));
        assert_eq!(buf[(1, 0)].fg, Color::Red);
    }

    #[test]
    fn renders_nothing_without_toast() {
        let buf = render_toast(None);
        assert_eq!(buffer_to_string(&buf).trim(), "");
    }
}
