//! Inspection screen: the vehicle check form.

use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};

use crate::model::{
    Check, CheckItemKey, CheckStatus, ODOMETER_FIELD, VEHICLE_FIELD, VehicleDirectory,
};
use crate::submission::{Failure, SubmissionController, SubmitStart, TextField};
use crate::tui::action::{Action, ScreenState};
use crate::tui::widgets::{CHECKLIST_HEIGHT, FormRow, ROW_HEIGHT, draw_checklist, draw_row};

/// How many accepted checks the recent panel keeps.
const RECENT_LIMIT: usize = 3;

/// A focusable element of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Vehicle,
    Odometer,
    Item(CheckItemKey),
    Note,
}

static FOCUS_ORDER: &[Focus] = &[
    Focus::Vehicle,
    Focus::Odometer,
    Focus::Item(CheckItemKey::Tyres),
    Focus::Item(CheckItemKey::Brakes),
    Focus::Item(CheckItemKey::Lights),
    Focus::Item(CheckItemKey::Oil),
    Focus::Item(CheckItemKey::Coolant),
    Focus::Note,
];

/// Summary of an accepted check for the recent panel.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedCheck {
    pub registration: String,
    pub odometer_km: f64,
    pub failures: usize,
    pub submitted_at: DateTime<Utc>,
}

/// State for the inspection screen.
#[derive(Debug, Clone)]
pub struct InspectionState {
    controller: SubmissionController,
    directory: VehicleDirectory,
    focus: Focus,
    recent: Vec<SubmittedCheck>,
}

impl Default for InspectionState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl InspectionState {
    /// Creates an empty form; the vehicle list starts out loading.
    pub fn new(client_validation: bool) -> Self {
        Self {
            controller: SubmissionController::new(client_validation),
            directory: VehicleDirectory::Loading,
            focus: Focus::Vehicle,
            recent: Vec::new(),
        }
    }

    pub fn controller(&self) -> &SubmissionController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut SubmissionController {
        &mut self.controller
    }

    pub fn directory(&self) -> &VehicleDirectory {
        &self.directory
    }

    /// Replaces the vehicle list.
    pub fn set_directory(&mut self, directory: VehicleDirectory) {
        self.directory = directory;
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Accepted checks, newest first.
    pub fn recent(&self) -> &[SubmittedCheck] {
        &self.recent
    }

    /// Adds an accepted check to the recent panel.
    pub fn record_submission(&mut self, check: &Check, submitted_at: DateTime<Utc>) {
        let registration = self
            .directory
            .find(&check.vehicle_id)
            .map_or_else(|| check.vehicle_id.clone(), |v| v.registration.clone());
        let failures = check
            .items
            .iter()
            .filter(|item| item.status == CheckStatus::Fail)
            .count();
        self.recent.insert(
            0,
            SubmittedCheck {
                registration,
                odometer_km: check.odometer_km,
                failures,
                submitted_at,
            },
        );
        self.recent.truncate(RECENT_LIMIT);
    }

    /// Label of the selected vehicle, or the selector placeholder.
    pub fn vehicle_label(&self) -> String {
        if let Some(vehicle) = self.directory.find(self.controller.vehicle_id()) {
            return vehicle.label();
        }
        match &self.directory {
            VehicleDirectory::Loading => "Loading vehicles...".to_string(),
            VehicleDirectory::Unavailable(reason) => format!("No vehicles available ({reason})"),
            VehicleDirectory::Loaded(_) => "Select a vehicle".to_string(),
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let pos = FOCUS_ORDER
            .iter()
            .position(|&f| f == self.focus)
            .unwrap_or(0);
        let len = FOCUS_ORDER.len();
        let next = if forward {
            (pos + 1) % len
        } else {
            (pos + len - 1) % len
        };
        self.focus = FOCUS_ORDER[next];
    }

    fn cycle_vehicle(&mut self, forward: bool) {
        let current = Some(self.controller.vehicle_id()).filter(|id| !id.is_empty());
        let next = self
            .directory
            .cycle(current, forward)
            .map(|v| v.id.clone());
        self.controller.select_vehicle(next.as_deref());
    }

    fn submit(&mut self) -> Action {
        match self.controller.begin_submit() {
            SubmitStart::Dispatched(pending) => Action::Submit(pending),
            SubmitStart::Rejected(notification) => Action::Notify(notification),
            SubmitStart::Busy => Action::None,
        }
    }

    fn handle_field_key(&mut self, key: KeyEvent) {
        match (self.focus, key.code) {
            (Focus::Vehicle, KeyCode::Left) => self.cycle_vehicle(false),
            (Focus::Vehicle, KeyCode::Right) => self.cycle_vehicle(true),
            (Focus::Item(item), KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right) => {
                self.controller.toggle(item);
            }
            (Focus::Item(item), KeyCode::Char('p' | 'P')) => {
                self.controller.set_status(item, CheckStatus::Ok);
            }
            (Focus::Item(item), KeyCode::Char('f' | 'F')) => {
                self.controller.set_status(item, CheckStatus::Fail);
            }
            (Focus::Odometer, KeyCode::Char(ch)) => {
                self.controller.text_mut(TextField::Odometer).push(ch);
            }
            (Focus::Note, KeyCode::Char(ch)) => {
                self.controller.text_mut(TextField::Note).push(ch);
            }
            (Focus::Odometer, KeyCode::Backspace) => {
                self.controller.text_mut(TextField::Odometer).pop();
            }
            (Focus::Note, KeyCode::Backspace) => {
                self.controller.text_mut(TextField::Note).pop();
            }
            _ => {}
        }
    }
}

impl ScreenState for InspectionState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.move_focus(true);
                Action::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.move_focus(false);
                Action::None
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => Action::Quit,
            _ => {
                self.handle_field_key(key);
                Action::None
            }
        }
    }
}

/// Lines for the inline failure banner.
fn banner_lines(failure: Option<&Failure>) -> Vec<Line<'_>> {
    let style = Style::default().fg(Color::Red);
    match failure {
        None => Vec::new(),
        Some(Failure::Generic(message)) => vec![Line::from(Span::styled(message.as_str(), style))],
        Some(Failure::Validation(lines)) => lines
            .iter()
            .map(|line| Line::from(Span::styled(format!("\u{2022} {line}"), style)))
            .collect(),
    }
}

/// Renders the inspection screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_inspection(state: &InspectionState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Vehicle Inspection ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let controller = state.controller();
    let failure = controller.failure();
    let banner = banner_lines(failure);

    let [
        vehicle_area,
        odometer_area,
        checklist_area,
        note_area,
        banner_area,
        recent_area,
        footer_area,
    ] = Layout::vertical([
        Constraint::Length(ROW_HEIGHT),
        Constraint::Length(ROW_HEIGHT),
        Constraint::Length(CHECKLIST_HEIGHT),
        Constraint::Length(ROW_HEIGHT),
        Constraint::Length(banner.len() as u16),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    let field_has_error = |field: &str| {
        matches!(failure, Some(Failure::Validation(lines))
            if lines.iter().any(|l| l.starts_with(&format!("{field}:"))))
    };

    let vehicle_label = state.vehicle_label();
    draw_row(
        &FormRow::choice("Vehicle", &vehicle_label)
            .required()
            .focused(state.focus() == Focus::Vehicle)
            .muted(controller.vehicle_id().is_empty())
            .error(field_has_error(VEHICLE_FIELD)),
        frame,
        vehicle_area,
    );
    draw_row(
        &FormRow::text("Odometer (km)", controller.odometer())
            .required()
            .focused(state.focus() == Focus::Odometer)
            .error(field_has_error(ODOMETER_FIELD)),
        frame,
        odometer_area,
    );

    let focused_item = match state.focus() {
        Focus::Item(key) => Some(key),
        _ => None,
    };
    draw_checklist(controller.checklist(), focused_item, frame, checklist_area);

    draw_row(
        &FormRow::text("Note", controller.note()).focused(state.focus() == Focus::Note),
        frame,
        note_area,
    );

    frame.render_widget(Paragraph::new(banner), banner_area);

    draw_recent(state, frame, recent_area);

    let footer = if controller.is_submitting() {
        "Submitting...  Tab: next  F1: help  Esc: quit"
    } else {
        "Tab: next  \u{2190}/\u{2192}: change  Space: pass/fail  Enter: submit  F1: help  Esc: quit"
    };
    frame.render_widget(
        Paragraph::new(Line::from(footer)).style(Style::default().fg(Color::DarkGray)),
        footer_area,
    );
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn draw_recent(state: &InspectionState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Recent Checks ")
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.recent().is_empty() {
        return;
    }

    let rows: Vec<Row> = state
        .recent()
        .iter()
        .map(|check| {
            let failures = match check.failures {
                0 => "all OK".to_string(),
                n => format!("{n} failed"),
            };
            Row::new(vec![
                check.submitted_at.format("%H:%M").to_string(),
                check.registration.clone(),
                format!("{} km", check.odometer_km),
                failures,
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Min(8),
    ];
    frame.render_widget(Table::new(rows, widths), inner);
}
