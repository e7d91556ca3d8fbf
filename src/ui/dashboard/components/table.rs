//! History table

use super::super::state::DashboardState;
use super::super::utils::history_row_cells;
use crate::consts::cli_consts::display::EMPTY_HISTORY;
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Row, Table};

const HEADERS: [&str; 7] = [
    "Waktu",
    "Suhu",
    "Lembab",
    "Hujan",
    "Cahaya",
    "Jemuran",
    "Sistem",
];

/// Header plus one row per record, or a single placeholder row.
pub fn table_rows(state: &DashboardState) -> (Vec<&'static str>, Vec<Vec<String>>) {
    let with_id = state.history.iter().any(|record| record.id.is_some());
    let mut headers = Vec::with_capacity(HEADERS.len() + 1);
    if with_id {
        headers.push("ID");
    }
    headers.extend(HEADERS);

    if state.history.is_empty() {
        return (headers, vec![vec![EMPTY_HISTORY.to_string()]]);
    }

    let rows = state
        .history
        .iter()
        .map(|record| {
            let mut cells = Vec::with_capacity(headers.len());
            if with_id {
                cells.push(record.id.map(|id| id.to_string()).unwrap_or_default());
            }
            cells.extend(history_row_cells(record));
            cells
        })
        .collect();
    (headers, rows)
}

pub fn render_history_table(f: &mut Frame, area: Rect, state: &DashboardState) {
    let (headers, rows) = table_rows(state);
    let with_id = headers.first() == Some(&"ID");

    let mut widths = Vec::with_capacity(headers.len());
    if with_id {
        widths.push(Constraint::Length(5));
    }
    widths.push(Constraint::Length(19));
    widths.extend([Constraint::Fill(1); 6]);

    // Header row plus borders
    let visible = area.height.saturating_sub(3) as usize;
    let header = Row::new(headers.into_iter().map(Cell::from)).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    let rows: Vec<Row> = rows.into_iter().take(visible).map(Row::new).collect();

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(format!("RIWAYAT ({})", state.history.len()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::ControlModel;
    use crate::environment::Environment;
    use crate::model::{HistoryFilter, HistoryRecord};
    use crate::ui::app::UIConfig;

    fn dashboard() -> DashboardState {
        DashboardState::new(
            Environment::Local,
            UIConfig::new(false, ControlModel::TriState, HistoryFilter::All),
        )
    }

    #[test]
    fn test_empty_history_has_placeholder_row() {
        let (headers, rows) = table_rows(&dashboard());
        assert_eq!(headers.len(), 7);
        assert_eq!(rows, vec![vec!["Belum ada data".to_string()]]);
    }

    #[test]
    fn test_id_column_only_when_present() {
        let mut state = dashboard();
        state.history = vec![HistoryRecord {
            id: Some(12),
            ..Default::default()
        }];
        let (headers, rows) = table_rows(&state);
        assert_eq!(headers[0], "ID");
        assert_eq!(rows[0][0], "12");
        assert_eq!(rows[0].len(), 8);
    }
}
