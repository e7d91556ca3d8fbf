//! Sidebar panel: connection, mode and key help

use super::super::state::DashboardState;
use super::super::utils::mode_color;
use super::header::connectivity_color;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap};

const KEY_HELP: [(&str, &str); 7] = [
    ("1 / 2 / 3", "AUTO / MANUAL / OFF"),
    ("b / t", "BUKA / TUTUP"),
    ("s", "ON/OFF (lama)"),
    ("c", "Suhu / Kelembaban"),
    ("h", "Menu"),
    ("apa saja", "Tutup peringatan"),
    ("q", "Keluar"),
];

pub fn render_sidebar(f: &mut Frame, area: Rect, state: &DashboardState, overlay: bool) {
    if overlay {
        f.render_widget(Clear, area);
    }

    let mode = state.mode_display();
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                "● ",
                Style::default().fg(connectivity_color(state.connectivity)),
            ),
            Span::raw(state.connectivity.label()),
        ]),
        Line::from(""),
        Line::from(Span::styled("Status", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            mode.label(),
            Style::default()
                .fg(mode_color(mode))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Server: {}", state.environment.server_url()),
            Style::default().fg(Color::LightBlue),
        )),
        Line::from(Span::styled(
            format!("Model: {}", state.control_model),
            Style::default().fg(Color::LightBlue),
        )),
    ];
    if let Some(last_poll) = &state.last_poll {
        lines.push(Line::from(Span::styled(
            format!("Update: {}", last_poll),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));
    for (key, action) in KEY_HELP {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<10}", key), Style::default().fg(Color::Cyan)),
            Span::raw(action),
        ]));
    }

    let block = Block::default()
        .title("JEMURAN")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
