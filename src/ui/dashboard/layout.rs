//! Dashboard geometry
//!
//! One place computes where every panel and button sits, so rendering and
//! mouse hit-testing always agree.

use super::sidebar::SidebarState;
use super::state::DashboardState;
use crate::consts::cli_consts::display::SIDEBAR_WIDTH;
use crate::control::{ActiveControl, ControlModel};
use crate::model::{ManualCommand, TargetMode};
use crate::workers::UserCommand;
use ratatui::layout::{Constraint, Layout, Margin, Position, Rect};

const BUTTON_WIDTH: u16 = 14;
const TRIGGER_WIDTH: u16 = 5;

/// A clickable control.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Button {
    Auto,
    Manual,
    Off,
    Open,
    Close,
    /// Legacy ON/OFF switch
    Toggle,
}

impl Button {
    pub fn key(&self) -> char {
        match self {
            Button::Auto => '1',
            Button::Manual => '2',
            Button::Off => '3',
            Button::Open => 'b',
            Button::Close => 't',
            Button::Toggle => 's',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Button::Auto => "AUTO",
            Button::Manual => "MANUAL",
            Button::Off => "MATIKAN",
            Button::Open => "BUKA",
            Button::Close => "TUTUP",
            Button::Toggle => "ON/OFF",
        }
    }

    pub fn command(&self) -> UserCommand {
        match self {
            Button::Auto => UserCommand::SetMode(TargetMode::Auto),
            Button::Manual => UserCommand::SetMode(TargetMode::Manual),
            Button::Off => UserCommand::SetMode(TargetMode::Off),
            Button::Open => UserCommand::Manual(ManualCommand::Open),
            Button::Close => UserCommand::Manual(ManualCommand::Close),
            Button::Toggle => UserCommand::ToggleSystem,
        }
    }

    /// Whether this button is the highlighted control
    pub fn is_active(&self, active: Option<ActiveControl>) -> bool {
        matches!(
            (self, active),
            (Button::Auto, Some(ActiveControl::Auto))
                | (Button::Manual, Some(ActiveControl::Manual))
                | (Button::Off, Some(ActiveControl::Off))
                | (Button::Toggle, Some(ActiveControl::Toggle(_)))
        )
    }

    /// Buttons available for the current state, in display order.
    pub fn available(state: &DashboardState) -> Vec<Button> {
        match state.control_model {
            ControlModel::Binary => vec![Button::Toggle],
            ControlModel::TriState if state.manual_panel_visible() => vec![
                Button::Auto,
                Button::Manual,
                Button::Off,
                Button::Open,
                Button::Close,
            ],
            ControlModel::TriState => vec![Button::Auto, Button::Manual, Button::Off],
        }
    }
}

/// What a mouse click landed on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Hit {
    Trigger,
    Sidebar,
    Button(Button),
    Outside,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardLayout {
    pub header: Rect,
    /// Menu trigger; only present while the sidebar can collapse
    pub trigger: Option<Rect>,
    pub sidebar: Option<Rect>,
    /// Sidebar drawn over the content instead of beside it
    pub sidebar_overlay: bool,
    pub readings: Rect,
    pub controls: Rect,
    pub buttons: Vec<(Button, Rect)>,
    pub status_line: Option<Rect>,
    pub chart: Rect,
    pub table: Rect,
    pub logs: Rect,
    pub footer: Rect,
}

impl DashboardLayout {
    pub fn compute(area: Rect, state: &DashboardState) -> Self {
        let outer = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(area);
        let (header, body, footer) = (outer[0], outer[1], outer[2]);

        let collapsible = SidebarState::is_collapsible(area.width);
        let trigger = collapsible.then(|| Rect {
            width: TRIGGER_WIDTH.min(header.width),
            ..header
        });

        let (sidebar, main) = if !state.sidebar.is_visible(area.width) {
            (None, body)
        } else if collapsible {
            let overlay = Rect {
                width: SIDEBAR_WIDTH.min(body.width),
                ..body
            };
            (Some(overlay), body)
        } else {
            let split = Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Fill(1)])
                .split(body);
            (Some(split[0]), split[1])
        };

        let main_chunks = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Fill(1),
            Constraint::Length(8),
        ])
        .split(main);
        let data_chunks =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(main_chunks[2]);

        let controls = main_chunks[1];
        let inner = controls.inner(Margin::new(1, 1));
        let button_row = Rect {
            height: inner.height.min(1),
            ..inner
        };
        let available = Button::available(state);
        let button_rects = Layout::horizontal(
            available
                .iter()
                .map(|_| Constraint::Length(BUTTON_WIDTH))
                .chain(std::iter::once(Constraint::Fill(1))),
        )
        .spacing(1)
        .split(button_row);
        let buttons = available
            .into_iter()
            .zip(button_rects.iter().copied())
            .filter(|(_, rect)| rect.width > 0 && rect.height > 0)
            .collect();
        let status_line = (inner.height >= 3).then(|| Rect {
            y: inner.y + 2,
            height: 1,
            ..inner
        });

        Self {
            header,
            trigger,
            sidebar,
            sidebar_overlay: collapsible && sidebar.is_some(),
            readings: main_chunks[0],
            controls,
            buttons,
            status_line,
            chart: data_chunks[0],
            table: data_chunks[1],
            logs: main_chunks[3],
            footer,
        }
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Hit {
        let position = Position::new(column, row);
        if self.trigger.is_some_and(|rect| rect.contains(position)) {
            return Hit::Trigger;
        }
        if self.sidebar.is_some_and(|rect| rect.contains(position)) {
            return Hit::Sidebar;
        }
        self.buttons
            .iter()
            .find(|(_, rect)| rect.contains(position))
            .map(|(button, _)| Hit::Button(*button))
            .unwrap_or(Hit::Outside)
    }
}
