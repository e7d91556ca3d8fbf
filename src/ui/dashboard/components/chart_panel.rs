//! History chart panel

use super::super::chart::ChartSeries;
use super::super::state::DashboardState;
use crate::consts::cli_consts::display::EMPTY_HISTORY;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::{Color, Style};
use ratatui::symbols;
use ratatui::widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, Paragraph};

/// First, middle and last time labels
fn x_labels(series: &ChartSeries) -> Vec<String> {
    let labels = &series.labels;
    match labels.len() {
        0 => Vec::new(),
        1 => vec![labels[0].clone()],
        2 => vec![labels[0].clone(), labels[1].clone()],
        n => vec![
            labels[0].clone(),
            labels[n / 2].clone(),
            labels[n - 1].clone(),
        ],
    }
}

pub fn render_chart(f: &mut Frame, area: Rect, state: &DashboardState) {
    let field = state.chart_field();
    let block = Block::default()
        .title(format!("GRAFIK - {} [C]", field.label()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    let Some(instance) = state.chart().instance() else {
        f.render_widget(
            Paragraph::new(EMPTY_HISTORY)
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    };

    let series = &instance.series;
    let points = series.points();
    let [y_min, y_max] = series.y_bounds();
    let x_max = (series.values.len().saturating_sub(1)).max(1) as f64;

    let dataset = Dataset::default()
        .name(field.label())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(field.color()))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .title(format!("Waktu ({})", state.timezone))
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(x_labels(series)),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([y_min, y_max])
                .labels([
                    format!("{:.1}", y_min),
                    format!("{:.1}", (y_min + y_max) / 2.0),
                    format!("{:.1}", y_max),
                ]),
        );
    f.render_widget(chart, area);
}
