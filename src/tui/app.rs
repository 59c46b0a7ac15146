use std::time::{Duration, Instant};

use chrono::Utc;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Layout};
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info};

use crate::api::{ApiClient, InspectionApi};
use crate::config::Config;
use crate::submission::{Notification, Outcome};
use crate::tasks::{TaskMessage, TaskSpawner, directory_from};

use super::action::{Action, ScreenState};
use super::error::AppError;
use super::screens::{HelpState, InspectionState, draw_help, draw_inspection};
use super::widgets::{Toasts, draw_toast};

/// Redraw interval while idle, so toasts expire on time.
const TICK: Duration = Duration::from_millis(250);

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// The vehicle check form.
    Inspection,
    /// Show keybinding help.
    Help,
}

/// What woke the event loop.
enum Incoming {
    Terminal(Event),
    Task(TaskMessage),
    Tick,
    Closed,
}

/// Top-level application state.
pub struct App<A> {
    screen: Screen,
    inspection: InspectionState,
    help: HelpState,
    toasts: Toasts,
    tasks: TaskSpawner<A>,
    inbox: UnboundedReceiver<TaskMessage>,
    vehicles_requested: bool,
    should_quit: bool,
}

impl App<ApiClient> {
    /// Creates an app talking HTTP to the configured backend.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let api = ApiClient::new(config)?;
        info!(api_url = api.base_url(), "using inspection backend");
        Ok(Self::new(api, config))
    }
}

impl<A: InspectionApi> App<A> {
    /// Creates a new `App` starting on the [`Screen::Inspection`] screen.
    pub fn new(api: A, config: &Config) -> Self {
        let (outbox, inbox) = mpsc::unbounded_channel();
        Self {
            screen: Screen::Inspection,
            inspection: InspectionState::new(config.client_validation),
            help: HelpState::new(),
            toasts: Toasts::default(),
            tasks: TaskSpawner::new(api, outbox),
            inbox,
            vehicles_requested: false,
            should_quit: false,
        }
    }

    /// Main event loop: draw, then wait for a key, a task result or a tick.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        self.start();
        let mut events = EventStream::new();
        let mut tick = tokio::time::interval(TICK);

        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;

            let incoming = tokio::select! {
                event = events.next() => match event {
                    Some(event) => Incoming::Terminal(event?),
                    None => Incoming::Closed,
                },
                Some(message) = self.inbox.recv() => Incoming::Task(message),
                _ = tick.tick() => Incoming::Tick,
            };

            match incoming {
                Incoming::Terminal(Event::Key(key)) => self.handle_key(key),
                Incoming::Terminal(_) => {}
                Incoming::Task(message) => self.handle_message(message),
                Incoming::Tick => self.toasts.expire(Instant::now()),
                Incoming::Closed => self.should_quit = true,
            }
        }

        self.shutdown();
        Ok(())
    }

    /// Kicks off the vehicle load. Only the first call has an effect.
    pub fn start(&mut self) {
        if self.vehicles_requested {
            return;
        }
        self.vehicles_requested = true;
        self.tasks.load_vehicles();
    }

    /// Cancels background work and forgets any in-flight submission.
    pub fn shutdown(&mut self) {
        debug!("shutting down");
        self.tasks.shutdown();
        self.inspection.controller_mut().abandon();
    }

    /// Renders the current screen with the toast line underneath.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let [main_area, toast_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

        match self.screen {
            Screen::Inspection => draw_inspection(&self.inspection, frame, main_area),
            Screen::Help => draw_help(&self.help, frame, main_area),
        }
        draw_toast(self.toast(), frame, toast_area);
    }

    /// Handles a key event: global keys first, then screen-specific.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('c') {
                self.should_quit = true;
            }
            return;
        }

        if key.code == KeyCode::F(1) && self.screen != Screen::Help {
            self.help.reset();
            self.screen = Screen::Help;
            return;
        }

        let action = match self.screen {
            Screen::Inspection => self.inspection.handle_key(key),
            Screen::Help => self.help.handle_key(key),
        };
        self.apply(action);
    }

    /// Applies a settled background request.
    pub fn handle_message(&mut self, message: TaskMessage) {
        match message {
            TaskMessage::VehiclesLoaded(result) => {
                self.inspection.set_directory(directory_from(result));
            }
            TaskMessage::SubmissionSettled { request, result } => {
                let Some(completion) = self.inspection.controller_mut().complete(request, result)
                else {
                    return;
                };
                if let Outcome::Success { check, .. } = &completion.outcome {
                    self.inspection.record_submission(check, Utc::now());
                    info!(vehicle_id = %check.vehicle_id, "check recorded");
                }
                self.toasts.push(completion.notification);
            }
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Submit(pending) => {
                self.tasks.submit(pending);
            }
            Action::Notify(notification) => self.toasts.push(notification),
            Action::Navigate(screen) => self.screen = screen,
            Action::Quit => self.should_quit = true,
        }
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn inspection(&self) -> &InspectionState {
        &self.inspection
    }

    /// The toast currently on screen, if any.
    pub fn toast(&self) -> Option<&Notification> {
        self.toasts.visible_at(Instant::now())
    }
}
