//! Bordered single-line form rows.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Height of one row, borders included.
pub const ROW_HEIGHT: u16 = 3;

/// How a row's value is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Free text; shows a cursor when focused.
    Text,
    /// A fixed set of options cycled with Left/Right.
    Choice,
}

/// Everything needed to render one row.
#[derive(Debug, Clone)]
pub struct FormRow<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub kind: RowKind,
    pub focused: bool,
    pub required: bool,
    /// Renders `value` dimmed, e.g. for a placeholder option.
    pub muted: bool,
    pub error: bool,
}

impl<'a> FormRow<'a> {
    pub fn text(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            kind: RowKind::Text,
            focused: false,
            required: false,
            muted: false,
            error: false,
        }
    }

    pub fn choice(label: &'a str, value: &'a str) -> Self {
        Self {
            kind: RowKind::Choice,
            ..Self::text(label, value)
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    pub fn error(mut self, error: bool) -> Self {
        self.error = error;
        self
    }

    /// Title shown in the row's border.
    pub fn title(&self) -> String {
        if self.required {
            format!("{} *", self.label)
        } else {
            self.label.to_string()
        }
    }

    fn border_color(&self) -> Color {
        if self.error {
            Color::Red
        } else if self.focused {
            Color::Yellow
        } else {
            Color::DarkGray
        }
    }
}

/// Renders a row within the given area.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_row(row: &FormRow, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(row.title())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(row.border_color()));

    let value_style = if row.muted {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    let mut spans = Vec::new();
    if row.kind == RowKind::Choice && row.focused {
        spans.push(Span::styled("\u{25c0} ", Style::default().fg(Color::Yellow)));
    }
    spans.push(Span::styled(row.value, value_style));
    match row.kind {
        RowKind::Text if row.focused => spans.push(Span::styled(
            "\u{2588}",
            Style::default().add_modifier(Modifier::SLOW_BLINK),
        )),
        RowKind::Choice if row.focused => {
            spans.push(Span::styled(" \u{25b6}", Style::default().fg(Color::Yellow)));
        }
        _ => {}
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
