//! Help screen: scrollable keybinding reference.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;

static INSPECTION_KEYS: &[(&str, &str)] = &[
    ("Tab / Shift-Tab", "next / prev field"),
    ("\u{2191}/\u{2193}", "next / prev field"),
    ("\u{2190}/\u{2192}", "change vehicle; toggle item"),
    ("Space", "toggle item OK / FAIL"),
    ("p / f", "mark item OK / FAIL"),
    ("Backspace", "delete character"),
    ("Enter", "submit check"),
    ("Esc / Ctrl+C", "quit"),
    ("F1", "help"),
];

static HELP_KEYS: &[(&str, &str)] = &[("\u{2191}/\u{2193}", "scroll"), ("q / Esc", "back")];

/// State for the help screen.
#[derive(Debug, Clone)]
pub struct HelpState {
    scroll: u16,
}

impl Default for HelpState {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpState {
    /// Scrolled to the top.
    pub fn new() -> Self {
        Self { scroll: 0 }
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn reset(&mut self) {
        self.scroll = 0;
    }
}

impl ScreenState for HelpState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                Action::None
            }
            KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                Action::None
            }
            KeyCode::Char('q') | KeyCode::Esc => Action::Navigate(Screen::Inspection),
            _ => Action::None,
        }
    }
}

fn build_section(title: &'static str, keys: &[(&'static str, &'static str)]) -> Vec<Line<'static>> {
    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(Color::Yellow);
    let dim_style = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(title, header_style)),
    ];
    for (key, desc) in keys {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:<20}"), key_style),
            Span::styled(*desc, dim_style),
        ]));
    }
    lines
}

fn help_content() -> Vec<Line<'static>> {
    let mut lines = build_section("Inspection", INSPECTION_KEYS);
    lines.extend(build_section("Help", HELP_KEYS));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Fields marked * are required. Odometer must be a positive number.",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

/// Renders the help screen.
#[mutants::skip]
pub fn draw_help(state: &HelpState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [content_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    let content_lines = help_content();
    let total = content_lines.len() as u16;
    let capped_scroll = state
        .scroll()
        .min(total.saturating_sub(content_area.height));

    let paragraph = Paragraph::new(content_lines).scroll((capped_scroll, 0));
    frame.render_widget(paragraph, content_area);

    let footer = Paragraph::new("\u{2191}/\u{2193}: scroll  q/Esc: back")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
