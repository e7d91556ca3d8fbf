//! Blocking alert modal

use super::super::utils::RED;
use crate::consts::cli_consts::display::ALERT_DISMISS_HINT;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap};

/// Centered rectangle of at most `width` x `height` inside `area`
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub fn render_alert(f: &mut Frame, message: &str) {
    let area = centered_rect(f.area(), 60, 9);
    f.render_widget(Clear, area);

    let text = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(ALERT_DISMISS_HINT).style(Style::default().fg(Color::DarkGray)),
    ];
    let block = Block::default()
        .title("PERINGATAN")
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(RED).add_modifier(Modifier::BOLD))
        .padding(Padding::uniform(1));
    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_alert_shows_message_and_dismiss_hint() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|f| render_alert(f, "Gagal mengubah mode"))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Gagal mengubah mode"));
        assert!(text.contains(ALERT_DISMISS_HINT));
        assert!(!text.contains("[Enter]"));
    }

    #[test]
    fn test_centered_rect_fits_small_areas() {
        assert_eq!(
            centered_rect(Rect::new(0, 0, 100, 40), 60, 9),
            Rect::new(20, 15, 60, 9)
        );
        assert_eq!(
            centered_rect(Rect::new(0, 0, 40, 5), 60, 9),
            Rect::new(0, 0, 40, 5)
        );
    }
}
