//! Dashboard main renderer

use super::components::{
    alert, chart_panel, controls, footer, header, logs, readings, sidebar_panel, table,
};
use super::layout::DashboardLayout;
use super::state::DashboardState;
use ratatui::Frame;
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let layout = DashboardLayout::compute(f.area(), state);

    header::render_header(f, &layout, state);
    readings::render_readings(f, layout.readings, state);
    controls::render_controls(f, &layout, state);
    chart_panel::render_chart(f, layout.chart, state);
    table::render_history_table(f, layout.table, state);
    logs::render_logs_panel(f, layout.logs, state);
    footer::render_footer(f, layout.footer, state);

    // Drawn last so the collapsed sidebar covers the content
    if let Some(area) = layout.sidebar {
        sidebar_panel::render_sidebar(f, area, state, layout.sidebar_overlay);
    }
    if let Some(message) = &state.alert {
        alert::render_alert(f, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{ControlModel, SystemState};
    use crate::environment::Environment;
    use crate::events::{Event, StateUpdate};
    use crate::model::{
        ControlMode, DashboardData, HistoryFilter, HistoryRecord, PowerStatus, SensorSnapshot,
    };
    use crate::ui::app::UIConfig;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn polled_state(mode: ControlMode) -> DashboardState {
        let mut state = DashboardState::new(
            Environment::Local,
            UIConfig::new(true, ControlModel::TriState, HistoryFilter::All),
        );
        let history = vec![
            HistoryRecord {
                id: Some(2),
                reading: SensorSnapshot {
                    timestamp: Some("2026-10-18 10:00:05".to_string()),
                    temperature: Some(30.0),
                    humidity: Some(60.0),
                    ..Default::default()
                },
                system_status: Some("ON".to_string()),
            },
            HistoryRecord {
                id: Some(1),
                reading: SensorSnapshot {
                    timestamp: Some("2026-10-18 10:00:00".to_string()),
                    temperature: Some(32.0),
                    humidity: Some(58.0),
                    ..Default::default()
                },
                system_status: Some("ON".to_string()),
            },
        ];
        state.add_event(Event::state_change(
            StateUpdate::Poll(Box::new(DashboardData {
                latest: history.first().map(|record| record.reading.clone()),
                history,
                system: SystemState::TriState {
                    system: PowerStatus::On,
                    mode,
                },
            })),
            "poll".to_string(),
        ));
        state.update();
        state
    }

    #[test]
    fn test_render_wide_dashboard() {
        let state = polled_state(ControlMode::Manual);
        let mut terminal = Terminal::new(TestBackend::new(160, 48)).unwrap();
        terminal.draw(|f| render_dashboard(f, &state)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("MODE MANUAL"));
        assert!(text.contains("[b] BUKA"));
        assert!(text.contains("Kontrol manual aktif."));
        assert!(text.contains("RIWAYAT (2)"));
        assert!(text.contains("Online"));
    }

    #[test]
    fn test_render_narrow_dashboard_with_alert() {
        let mut state = polled_state(ControlMode::Auto);
        state.alert = Some("Gagal mengubah status sistem".to_string());
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        terminal.draw(|f| render_dashboard(f, &state)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("PERINGATAN"));
        assert!(text.contains("Gagal mengubah status sistem"));
        assert!(text.contains("Tekan tombol apa saja untuk menutup"));
        assert!(!text.contains("[b] BUKA"));
    }

    #[test]
    // The axis title uses the zone resolved when the state was built.
    fn test_chart_axis_names_cached_timezone() {
        let mut state = polled_state(ControlMode::Auto);
        state.timezone = "Asia/Jakarta".to_string();
        let mut terminal = Terminal::new(TestBackend::new(160, 48)).unwrap();
        terminal.draw(|f| render_dashboard(f, &state)).unwrap();

        assert!(buffer_text(&terminal).contains("Waktu (Asia/Jakarta)"));
    }

    #[test]
    // Tiny terminals must not panic.
    fn test_render_tiny_terminal() {
        let state = polled_state(ControlMode::Auto);
        let mut terminal = Terminal::new(TestBackend::new(20, 6)).unwrap();
        terminal.draw(|f| render_dashboard(f, &state)).unwrap();
    }
}
