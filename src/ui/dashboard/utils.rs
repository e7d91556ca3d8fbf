//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::consts::cli_consts::display::PLACEHOLDER;
use crate::control::ModeDisplay;
use crate::events::Worker;
use crate::model::HistoryRecord;
use chrono::{DateTime, Local, NaiveDateTime};
use ratatui::prelude::Color;

pub const GREEN: Color = Color::Rgb(16, 185, 129);
pub const AMBER: Color = Color::Rgb(251, 191, 36);
pub const RED: Color = Color::Rgb(239, 68, 68);

/// Get a ratatui color for a worker based on its type
pub fn get_worker_color(worker: &Worker) -> Color {
    match worker {
        Worker::Poller => Color::Cyan,
        Worker::Dispatcher => Color::Yellow,
    }
}

/// Indicator color for each mode label
pub fn mode_color(mode: ModeDisplay) -> Color {
    match mode {
        ModeDisplay::Auto | ModeDisplay::SystemOn => GREEN,
        ModeDisplay::Manual => AMBER,
        ModeDisplay::SystemOff | ModeDisplay::Disconnected => RED,
        ModeDisplay::Connecting => Color::DarkGray,
    }
}

/// Local time of day (`HH:MM:SS`) for a server timestamp.
///
/// Accepts RFC 3339, RFC 2822 (Flask's default) and naive
/// `YYYY-MM-DD HH:MM:SS`, which is taken as local time already. Anything else
/// is returned unchanged.
pub fn format_time_label(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format("%H:%M:%S").to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return dt.with_timezone(&Local).format("%H:%M:%S").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return dt.format("%H:%M:%S").to_string();
    }
    raw.to_string()
}

/// IANA name of the local zone, for the chart's time axis
pub fn local_timezone_name() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "lokal".to_string())
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // "YYYY-MM-DD HH:MM:SS" -> "MM-DD HH:MM"
    let mut parts = timestamp.split(' ');
    if let (Some(date_part), Some(time_part)) = (parts.next(), parts.next()) {
        if let (Some(month_day), Some(hour_min)) = (date_part.get(5..10), time_part.get(0..5)) {
            return format!("{} {}", month_day, hour_min);
        }
    }
    timestamp.to_string()
}

/// Reading value as shown in a slot or cell
pub fn format_value(value: Option<f64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

pub fn format_text(value: Option<&str>) -> String {
    value.unwrap_or(PLACEHOLDER).to_string()
}

/// Table cells for one history row: time, temperature, humidity, rain, light,
/// rack status and system status.
pub fn history_row_cells(record: &HistoryRecord) -> [String; 7] {
    let reading = &record.reading;
    [
        format_text(reading.timestamp.as_deref()),
        format_value(reading.temperature),
        format_value(reading.humidity),
        format_value(reading.rain_value),
        format_value(reading.light_value),
        format_text(reading.rack_status.as_deref()),
        format_text(record.system_status.as_deref()),
    ]
}

/// Clean HTTP error messages, keeping whatever context precedes the transport error
pub fn clean_http_error_message(msg: &str) -> String {
    let Some(idx) = msg.find("Reqwest error") else {
        return msg.to_string();
    };
    let reason = if msg.contains("timed out") {
        "request timed out - retrying..."
    } else {
        "backend unreachable - retrying..."
    };
    format!("{}{}", &msg[..idx], reason)
}
