//! Wire types for the drying-rack backend.
//!
//! Field names follow the backend's JSON exactly (`waktu`, `rain_value`,
//! `ldr_value`, `status_jemuran`, `status_system`, ...). Every reading field is
//! optional: the dashboard only checks for presence and renders a placeholder
//! for anything missing.

use crate::control::SystemState;
use serde::{Deserialize, Serialize};

/// ON/OFF as reported in `flask_system_status` and `status_system`.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum PowerStatus {
    On,
    Off,
}

impl PowerStatus {
    pub fn toggled(self) -> Self {
        match self {
            PowerStatus::On => PowerStatus::Off,
            PowerStatus::Off => PowerStatus::On,
        }
    }
}

/// Control mode as reported in `control_mode`.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum ControlMode {
    Auto,
    Manual,
}

/// Mode requested through `/set_mode`.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum TargetMode {
    Auto,
    Manual,
    Off,
}

/// Actuator command sent through `/manual_control`.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum ManualCommand {
    Open,
    Close,
}

impl ManualCommand {
    /// Operator feedback shown once the backend accepted the command.
    pub fn sent_message(&self) -> &'static str {
        match self {
            ManualCommand::Open => "Perintah BUKA dikirim.",
            ManualCommand::Close => "Perintah TUTUP dikirim.",
        }
    }
}

/// The most recent sensor reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    #[serde(rename = "waktu", default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub rain_value: Option<f64>,
    #[serde(rename = "ldr_value", default)]
    pub light_value: Option<f64>,
    /// Older backends send this as `status`.
    #[serde(rename = "status_jemuran", alias = "status", default)]
    pub rack_status: Option<String>,
}

/// One row of the server's reading history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(flatten)]
    pub reading: SensorSnapshot,
    #[serde(rename = "status_system", default)]
    pub system_status: Option<String>,
}

impl HistoryRecord {
    pub fn is_system_on(&self) -> bool {
        self.system_status.as_deref() == Some("ON")
    }
}

/// Body of `GET /data` on the current backend.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DataResponse {
    #[serde(default)]
    pub latest: Option<SensorSnapshot>,
    #[serde(default)]
    pub history: Option<Vec<HistoryRecord>>,
    #[serde(default)]
    pub flask_system_status: Option<PowerStatus>,
    #[serde(default)]
    pub control_mode: Option<ControlMode>,
}

/// Either body shape `GET /data` is known to return.
///
/// `Rows` is tried first: a derived struct also accepts the sequence form, so
/// a short array would otherwise be misread as a positional `DataResponse`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DataPayload {
    /// Older backend: a bare array of rows, newest first.
    Rows(Vec<HistoryRecord>),
    /// `{ latest, history, flask_system_status, control_mode }`
    Dashboard(DataResponse),
}

/// Body of `GET /system_status` (older backend).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SystemStatusResponse {
    pub status: PowerStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SetModeRequest {
    pub mode: TargetMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ManualControlRequest {
    pub command: ManualCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToggleSystemRequest {
    pub status_system: PowerStatus,
}

/// Body of `POST /toggle_system`: `{}`/`{message}` on success, `{error}` on failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ToggleSystemResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Which history rows reach the table and chart.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum HistoryFilter {
    #[default]
    All,
    /// Only rows recorded while the system was ON.
    SystemOn,
}

impl HistoryFilter {
    pub fn apply(&self, history: &[HistoryRecord]) -> Vec<HistoryRecord> {
        match self {
            HistoryFilter::All => history.to_vec(),
            HistoryFilter::SystemOn => history
                .iter()
                .filter(|record| record.is_system_on())
                .cloned()
                .collect(),
        }
    }
}

/// A poll result after both payload shapes have been normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub latest: Option<SensorSnapshot>,
    /// Newest first, as served.
    pub history: Vec<HistoryRecord>,
    pub system: SystemState,
}
