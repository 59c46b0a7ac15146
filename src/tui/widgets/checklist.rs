//! Checklist panel: one row per inspection item with its pass/fail status.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};

use crate::model::{CheckItemKey, CheckStatus, Checklist};

/// Rows plus borders.
pub const CHECKLIST_HEIGHT: u16 = 7;

fn status_style(status: CheckStatus) -> Style {
    match status {
        CheckStatus::Ok => Style::default().fg(Color::Green),
        CheckStatus::Fail => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

/// Renders the checklist, highlighting `focused` if it is one of the items.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_checklist(
    checklist: &Checklist,
    focused: Option<CheckItemKey>,
    frame: &mut Frame,
    area: Rect,
) {
    let border = if focused.is_some() {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .title("Checklist")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let rows: Vec<Row> = checklist
        .items()
        .iter()
        .map(|item| {
            let marker = if focused == Some(item.key) { "> " } else { "  " };
            let row = Row::new(vec![
                Cell::from(format!("{marker}{}", item.key.label())),
                Cell::from(format!("[{}]", item.status.label())).style(status_style(item.status)),
            ]);
            if focused == Some(item.key) {
                row.style(Style::default().add_modifier(Modifier::REVERSED))
            } else {
                row
            }
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(12), Constraint::Length(6)]).block(block);
    frame.render_widget(table, area);
}
