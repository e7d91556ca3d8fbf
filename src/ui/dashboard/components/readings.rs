//! Latest reading slots

use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub fn render_readings(f: &mut Frame, area: Rect, state: &DashboardState) {
    let readings = &state.readings;
    let slots = [
        ("Waktu", readings.timestamp.as_str()),
        ("Suhu (°C)", readings.temperature.as_str()),
        ("Kelembaban (%)", readings.humidity.as_str()),
        ("Hujan", readings.rain_value.as_str()),
        ("Cahaya", readings.light_value.as_str()),
        ("Jemuran", readings.rack_status.as_str()),
    ];

    let chunks = Layout::horizontal([
        Constraint::Fill(2),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ])
    .split(area);

    for ((title, value), chunk) in slots.into_iter().zip(chunks.iter()) {
        let slot = Paragraph::new(value.to_string())
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        f.render_widget(slot, *chunk);
    }
}
