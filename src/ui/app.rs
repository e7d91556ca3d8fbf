//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::consts::cli_consts::display::SPLASH_DURATION_MS;
use crate::control::ControlModel;
use crate::environment::Environment;
use crate::events::{Event as WorkerEvent, EventType};
use crate::logging::LogLevel;
use crate::model::HistoryFilter;
use crate::ui::dashboard::sidebar::ClickTarget;
use crate::ui::dashboard::{Button, DashboardLayout, DashboardState, Hit, render_dashboard};
use crate::ui::splash::render_splash;
use crate::workers::UserCommand;
use crossterm::event::{self, Event, KeyCode, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal, backend::Backend};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{broadcast, mpsc};

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    pub control_model: ControlModel,
    pub history_filter: HistoryFilter,
}

impl UIConfig {
    pub fn new(
        with_background_color: bool,
        control_model: ControlModel,
        history_filter: HistoryFilter,
    ) -> Self {
        Self {
            with_background_color,
            control_model,
            history_filter,
        }
    }
}

/// The different screens in the application.
#[derive(Debug)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// Live dashboard.
    Dashboard(Box<DashboardState>),
}

/// What the loop should do after a key press on the dashboard.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyAction {
    None,
    Quit,
    Send(UserCommand),
}

/// Application state
#[derive(Debug)]
pub struct App {
    /// The backend the dashboard polls.
    environment: Environment,

    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Receives events from worker tasks.
    event_receiver: mpsc::Receiver<WorkerEvent>,

    /// Operator commands for the dispatcher.
    command_sender: mpsc::Sender<UserCommand>,

    /// Broadcasts shutdown signal to worker tasks.
    shutdown_sender: broadcast::Sender<()>,

    /// Events that arrived while the splash screen was up
    backlog: VecDeque<WorkerEvent>,

    ui_config: UIConfig,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        environment: Environment,
        event_receiver: mpsc::Receiver<WorkerEvent>,
        command_sender: mpsc::Sender<UserCommand>,
        shutdown_sender: broadcast::Sender<()>,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            environment,
            current_screen: Screen::Splash,
            event_receiver,
            command_sender,
            shutdown_sender,
            backlog: VecDeque::new(),
            ui_config,
        }
    }

    fn open_dashboard(&mut self) {
        let mut state = DashboardState::new(self.environment.clone(), self.ui_config.clone());
        for event in self.backlog.drain(..) {
            state.add_event(event);
        }
        self.current_screen = Screen::Dashboard(Box::new(state));
    }

    fn queue_event(&mut self, event: WorkerEvent) {
        match &mut self.current_screen {
            Screen::Splash => self.backlog.push_back(event),
            Screen::Dashboard(state) => state.add_event(event),
        }
    }

    /// Queues a command for the dispatcher. A full queue becomes a log line
    /// instead of blocking the UI.
    fn send_command(&mut self, command: UserCommand) {
        if let Err(e) = self.command_sender.try_send(command) {
            let msg = match e {
                TrySendError::Full(_) => "Command queue full, try again".to_string(),
                TrySendError::Closed(_) => "Command dispatcher stopped".to_string(),
            };
            if let Screen::Dashboard(state) = &mut self.current_screen {
                state.add_event(WorkerEvent::dispatcher_with_level(
                    msg,
                    EventType::Error,
                    LogLevel::Warn,
                ));
            }
        }
    }
}

/// Maps a key press on the dashboard to an action.
///
/// An open alert swallows the key that dismisses it. Control keys only act
/// when their button is currently on screen.
pub fn handle_dashboard_key(state: &mut DashboardState, code: KeyCode) -> KeyAction {
    if state.alert.is_some() {
        state.dismiss_alert();
        return KeyAction::None;
    }

    match code {
        KeyCode::Esc | KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Char('c') => {
            state.cycle_chart_field();
            KeyAction::None
        }
        KeyCode::Char('h') => {
            state.sidebar.toggle();
            KeyAction::None
        }
        KeyCode::Char(c) => Button::available(state)
            .into_iter()
            .find(|button| button.key() == c.to_ascii_lowercase())
            .map(|button| KeyAction::Send(button.command()))
            .unwrap_or(KeyAction::None),
        _ => KeyAction::None,
    }
}

/// Applies a left click at (`column`, `row`) and returns the command of the
/// button it landed on, if any.
pub fn handle_dashboard_click(
    state: &mut DashboardState,
    area: Rect,
    column: u16,
    row: u16,
) -> Option<UserCommand> {
    if state.alert.is_some() {
        state.dismiss_alert();
        return None;
    }

    let layout = DashboardLayout::compute(area, state);
    let hit = layout.hit_test(column, row);
    let target = match hit {
        Hit::Trigger => ClickTarget::Trigger,
        Hit::Sidebar => ClickTarget::Sidebar,
        Hit::Button(_) | Hit::Outside => ClickTarget::Outside,
    };
    state.sidebar.handle_click(area.width, target);

    match hit {
        Hit::Button(button) => Some(button.command()),
        _ => None,
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_millis(SPLASH_DURATION_MS);

    // UI event loop
    loop {
        // Queue all incoming events for processing
        while let Ok(event) = app.event_receiver.try_recv() {
            app.queue_event(event);
        }

        if let Screen::Dashboard(state) = &mut app.current_screen {
            state.update();
        }
        let server_url = app.environment.server_url();
        terminal.draw(|f| render(f, &app.current_screen, &server_url))?;

        // Handle splash-to-dashboard transition
        if let Screen::Splash = app.current_screen {
            if splash_start.elapsed() >= splash_duration {
                app.open_dashboard();
                continue;
            }
        }

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                let action = match &mut app.current_screen {
                    Screen::Splash if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) => {
                        KeyAction::Quit
                    }
                    Screen::Splash => KeyAction::None,
                    Screen::Dashboard(state) => handle_dashboard_key(state, key.code),
                };
                // Any other key skips the splash screen
                if matches!(app.current_screen, Screen::Splash) && action == KeyAction::None {
                    app.open_dashboard();
                }

                match action {
                    KeyAction::Quit => {
                        let _ = app.shutdown_sender.send(());
                        return Ok(());
                    }
                    KeyAction::Send(command) => app.send_command(command),
                    KeyAction::None => {}
                }
            }
            Event::Mouse(mouse) => {
                if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
                    continue;
                }
                let size = terminal.size()?;
                let area = Rect::new(0, 0, size.width, size.height);
                let command = match &mut app.current_screen {
                    Screen::Dashboard(state) => {
                        handle_dashboard_click(state, area, mouse.column, mouse.row)
                    }
                    Screen::Splash => None,
                };
                if let Some(command) = command {
                    app.send_command(command);
                }
            }
            _ => {}
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: &Screen, server_url: &str) {
    match screen {
        Screen::Splash => render_splash(f, server_url),
        Screen::Dashboard(state) => render_dashboard(f, state),
    }
}
