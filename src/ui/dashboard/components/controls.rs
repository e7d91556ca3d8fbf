//! Mode and actuator controls

use super::super::layout::{Button, DashboardLayout};
use super::super::state::DashboardState;
use super::super::utils::{AMBER, GREEN, RED};
use crate::control::ActiveControl;
use crate::model::PowerStatus;
use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

fn button_color(button: Button) -> Color {
    match button {
        Button::Auto => GREEN,
        Button::Manual => AMBER,
        Button::Off => RED,
        Button::Open | Button::Close => Color::LightBlue,
        Button::Toggle => GREEN,
    }
}

/// Label for a button; the legacy switch shows its confirmed position.
fn button_text(button: Button, active: Option<ActiveControl>) -> String {
    match (button, active) {
        (Button::Toggle, Some(ActiveControl::Toggle(PowerStatus::On))) => {
            format!("[{}] MATIKAN", button.key())
        }
        (Button::Toggle, Some(ActiveControl::Toggle(PowerStatus::Off))) => {
            format!("[{}] NYALAKAN", button.key())
        }
        _ => format!("[{}] {}", button.key(), button.label()),
    }
}

pub fn render_controls(f: &mut Frame, layout: &DashboardLayout, state: &DashboardState) {
    let block = Block::default()
        .title("KONTROL")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(block, layout.controls);

    let active = state.active_control();
    for (button, rect) in &layout.buttons {
        let color = match (button, active) {
            (Button::Toggle, Some(ActiveControl::Toggle(PowerStatus::Off))) => RED,
            _ => button_color(*button),
        };
        let style = if button.is_active(active) {
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        };
        f.render_widget(
            Paragraph::new(button_text(*button, active))
                .alignment(Alignment::Center)
                .style(style),
            *rect,
        );
    }

    if let (Some(area), Some(message)) = (layout.status_line, &state.status_message) {
        f.render_widget(
            Paragraph::new(message.as_str()).style(Style::default().fg(Color::Gray)),
            area,
        );
    }
}
