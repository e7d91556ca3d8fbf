//! History chart model
//!
//! Builds the line series for the selected field and owns the single chart
//! instance the dashboard draws.

use super::utils::format_time_label;
use crate::model::{HistoryRecord, SensorSnapshot};
use ratatui::prelude::Color;

/// The value plotted over time.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum ChartField {
    #[default]
    Temperature,
    Humidity,
}

impl ChartField {
    pub fn label(&self) -> &'static str {
        match self {
            ChartField::Temperature => "Suhu (°C)",
            ChartField::Humidity => "Kelembaban (%)",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            ChartField::Temperature => Color::Rgb(239, 68, 68),
            ChartField::Humidity => Color::Rgb(59, 130, 246),
        }
    }

    pub fn value(&self, reading: &SensorSnapshot) -> Option<f64> {
        match self {
            ChartField::Temperature => reading.temperature,
            ChartField::Humidity => reading.humidity,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ChartField::Temperature => ChartField::Humidity,
            ChartField::Humidity => ChartField::Temperature,
        }
    }
}

/// One labelled line, oldest point first.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub field: ChartField,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    /// Builds the series from newest-first history. Rows without a value are skipped.
    pub fn from_history(history: &[HistoryRecord], field: ChartField) -> Self {
        let (labels, values) = history
            .iter()
            .rev()
            .filter_map(|record| {
                let value = field.value(&record.reading)?;
                let label = record
                    .reading
                    .timestamp
                    .as_deref()
                    .map(format_time_label)
                    .unwrap_or_default();
                Some((label, value))
            })
            .unzip();
        Self {
            field,
            labels,
            values,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(x, y)` pairs for the chart widget, x being the point index.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, value)| (i as f64, *value))
            .collect()
    }

    /// Y bounds with a little headroom; a flat line gets a band around it.
    pub fn y_bounds(&self) -> [f64; 2] {
        let min = self.values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !min.is_finite() || !max.is_finite() {
            return [0.0, 1.0];
        }
        let pad = ((max - min) * 0.1).max(1.0);
        [min - pad, max + pad]
    }
}

/// A drawn chart. Only the renderer creates and disposes these.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartInstance {
    pub id: u64,
    pub series: ChartSeries,
}

/// Owns at most one chart instance and replaces it on every rebuild.
#[derive(Debug, Default)]
pub struct ChartRenderer {
    instance: Option<ChartInstance>,
    next_id: u64,
    disposed: usize,
}

impl ChartRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disposes the current chart, then draws a new one unless there is nothing to plot.
    pub fn rebuild(&mut self, history: &[HistoryRecord], field: ChartField) {
        self.dispose();
        if history.is_empty() {
            return;
        }
        self.next_id += 1;
        self.instance = Some(ChartInstance {
            id: self.next_id,
            series: ChartSeries::from_history(history, field),
        });
    }

    pub fn dispose(&mut self) {
        if self.instance.take().is_some() {
            self.disposed += 1;
        }
    }

    pub fn instance(&self) -> Option<&ChartInstance> {
        self.instance.as_ref()
    }

    /// How many instances have been torn down so far.
    pub fn disposed_count(&self) -> usize {
        self.disposed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(waktu: &str, temperature: Option<f64>, humidity: Option<f64>) -> HistoryRecord {
        HistoryRecord {
            id: None,
            reading: SensorSnapshot {
                timestamp: Some(waktu.to_string()),
                temperature,
                humidity,
                ..Default::default()
            },
            system_status: Some("ON".to_string()),
        }
    }

    fn newest_first() -> Vec<HistoryRecord> {
        vec![
            record("2026-10-18 10:00:05", Some(30.0), Some(60.0)),
            record("2026-10-18 10:00:00", Some(32.0), Some(58.0)),
        ]
    }

    #[test]
    // Newest-first history plots oldest-first.
    fn test_series_is_chronological() {
        let series = ChartSeries::from_history(&newest_first(), ChartField::Temperature);
        assert_eq!(series.values, vec![32.0, 30.0]);
        assert_eq!(series.labels, vec!["10:00:00", "10:00:05"]);
        assert_eq!(series.points(), vec![(0.0, 32.0), (1.0, 30.0)]);
    }

    #[test]
    fn test_missing_values_are_skipped() {
        let history = vec![
            record("2026-10-18 10:00:10", None, Some(61.0)),
            record("2026-10-18 10:00:05", Some(30.0), None),
        ];
        let series = ChartSeries::from_history(&history, ChartField::Temperature);
        assert_eq!(series.values, vec![30.0]);
        assert_eq!(series.labels, vec!["10:00:05"]);
    }

    #[test]
    // Switching field disposes the old instance and plots only the new field.
    fn test_rebuild_replaces_instance() {
        let mut renderer = ChartRenderer::new();
        renderer.rebuild(&newest_first(), ChartField::Temperature);
        let first_id = renderer.instance().unwrap().id;
        assert_eq!(renderer.disposed_count(), 0);

        renderer.rebuild(&newest_first(), ChartField::Humidity);
        let instance = renderer.instance().unwrap();
        assert_ne!(instance.id, first_id);
        assert_eq!(instance.series.field, ChartField::Humidity);
        assert_eq!(instance.series.values, vec![58.0, 60.0]);
        assert_eq!(renderer.disposed_count(), 1);
    }

    #[test]
    fn test_empty_history_disposes_chart() {
        let mut renderer = ChartRenderer::new();
        renderer.rebuild(&newest_first(), ChartField::Temperature);
        renderer.rebuild(&[], ChartField::Temperature);
        assert!(renderer.instance().is_none());
        assert_eq!(renderer.disposed_count(), 1);

        // Nothing left to dispose
        renderer.dispose();
        assert_eq!(renderer.disposed_count(), 1);
    }

    #[test]
    fn test_y_bounds() {
        let series = ChartSeries::from_history(&newest_first(), ChartField::Temperature);
        assert_eq!(series.y_bounds(), [29.0, 33.0]);
        let flat = ChartSeries {
            field: ChartField::Humidity,
            labels: vec![],
            values: vec![],
        };
        assert_eq!(flat.y_bounds(), [0.0, 1.0]);
    }
}
