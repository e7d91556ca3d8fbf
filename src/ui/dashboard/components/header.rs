//! Dashboard header component
//!
//! Renders the menu trigger, the title and the connection indicator

use super::super::layout::DashboardLayout;
use super::super::state::{Connectivity, DashboardState};
use super::super::utils::{GREEN, RED, mode_color};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub fn connectivity_color(connectivity: Connectivity) -> Color {
    match connectivity {
        Connectivity::Online => GREEN,
        Connectivity::Offline => RED,
        Connectivity::Connecting => Color::DarkGray,
    }
}

/// Render header with title, mode chip and connection state.
pub fn render_header(f: &mut Frame, layout: &DashboardLayout, state: &DashboardState) {
    let area = layout.header;
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_type(BorderType::Thick);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let trigger_width = layout.trigger.map(|rect| rect.width).unwrap_or(0);
    let chunks = Layout::horizontal([
        Constraint::Length(trigger_width),
        Constraint::Fill(1),
        Constraint::Length(24),
    ])
    .split(inner);

    if layout.trigger.is_some() {
        let style = if state.sidebar.is_open() {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::Cyan)
        };
        f.render_widget(Paragraph::new(" ☰ ").style(style), chunks[0]);
    }

    let mode = state.mode_display();
    let title = Line::from(vec![
        Span::styled(
            format!("JEMURAN DASHBOARD v{}  ", env!("CARGO_PKG_VERSION")),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default()
                .fg(Color::Black)
                .bg(mode_color(mode))
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(title).alignment(Alignment::Center), chunks[1]);

    let connection = Line::from(vec![
        Span::styled(
            "● ",
            Style::default().fg(connectivity_color(state.connectivity)),
        ),
        Span::raw(state.connectivity.label()),
    ]);
    f.render_widget(
        Paragraph::new(connection).alignment(Alignment::Right),
        chunks[2],
    );
}
