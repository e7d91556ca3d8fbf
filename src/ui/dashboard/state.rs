//! Dashboard state management
//!
//! Contains the main dashboard state struct and related enums

use super::chart::{ChartField, ChartRenderer};
use super::sidebar::SidebarState;
use super::utils::{format_text, format_value, local_timezone_name};
use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::consts::cli_consts::display::PLACEHOLDER;
use crate::control::{ActiveControl, ControlModel, ModeDisplay, SystemState};
use crate::environment::Environment;
use crate::events::Event as WorkerEvent;
use crate::model::{HistoryFilter, HistoryRecord, SensorSnapshot};
use crate::ui::app::UIConfig;

use std::collections::VecDeque;

/// Outcome of the most recent poll
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Connectivity {
    /// No poll has completed yet.
    Connecting,
    Online,
    Offline,
}

impl Connectivity {
    pub fn label(&self) -> &'static str {
        match self {
            Connectivity::Connecting => "Connecting",
            Connectivity::Online => "Online",
            Connectivity::Offline => "Offline",
        }
    }
}

/// Text shown in each reading slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingSlots {
    pub timestamp: String,
    pub temperature: String,
    pub humidity: String,
    pub rain_value: String,
    pub light_value: String,
    pub rack_status: String,
}

impl ReadingSlots {
    pub fn placeholder() -> Self {
        Self {
            timestamp: PLACEHOLDER.to_string(),
            temperature: PLACEHOLDER.to_string(),
            humidity: PLACEHOLDER.to_string(),
            rain_value: PLACEHOLDER.to_string(),
            light_value: PLACEHOLDER.to_string(),
            rack_status: PLACEHOLDER.to_string(),
        }
    }

    pub fn from_snapshot(snapshot: &SensorSnapshot) -> Self {
        Self {
            timestamp: format_text(snapshot.timestamp.as_deref()),
            temperature: format_value(snapshot.temperature),
            humidity: format_value(snapshot.humidity),
            rain_value: format_value(snapshot.rain_value),
            light_value: format_value(snapshot.light_value),
            rack_status: format_text(snapshot.rack_status.as_deref()),
        }
    }
}

/// View state owned by the UI loop. Workers only reach it through events.
#[derive(Debug)]
pub struct DashboardState {
    /// The backend the dashboard is connected to.
    pub environment: Environment,
    pub control_model: ControlModel,
    pub history_filter: HistoryFilter,
    /// Local zone name for the chart's time axis, resolved once
    pub timezone: String,
    /// Whether to enable background colors
    pub with_background_color: bool,

    pub connectivity: Connectivity,
    pub readings: ReadingSlots,
    /// Feedback line under the controls
    pub status_message: Option<String>,
    /// Last filtered history, newest first; kept so the chart can be redrawn
    /// without waiting for the next poll.
    pub history: Vec<HistoryRecord>,
    pub sidebar: SidebarState,
    /// Blocking alert; cleared by a key press.
    pub alert: Option<String>,
    /// Timestamp of the last successful poll
    pub last_poll: Option<String>,

    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<WorkerEvent>,
    /// Activity logs for display
    pub activity_logs: VecDeque<WorkerEvent>,

    /// State confirmed by the last successful poll
    system: Option<SystemState>,
    chart_field: ChartField,
    chart: ChartRenderer,
}

impl DashboardState {
    /// Creates a new instance of the dashboard state.
    pub fn new(environment: Environment, ui_config: UIConfig) -> Self {
        Self {
            environment,
            control_model: ui_config.control_model,
            history_filter: ui_config.history_filter,
            timezone: local_timezone_name(),
            with_background_color: ui_config.with_background_color,
            connectivity: Connectivity::Connecting,
            readings: ReadingSlots::placeholder(),
            status_message: None,
            history: Vec::new(),
            sidebar: SidebarState::default(),
            alert: None,
            last_poll: None,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            system: None,
            chart_field: ChartField::default(),
            chart: ChartRenderer::new(),
        }
    }

    pub fn system(&self) -> Option<SystemState> {
        self.system
    }

    pub(super) fn set_system(&mut self, system: SystemState) {
        self.system = Some(system);
    }

    pub fn chart_field(&self) -> ChartField {
        self.chart_field
    }

    pub(super) fn set_chart_field_value(&mut self, field: ChartField) {
        self.chart_field = field;
    }

    pub fn chart(&self) -> &ChartRenderer {
        &self.chart
    }

    /// Redraws the chart from the cached history and the selected field.
    pub(super) fn rebuild_chart(&mut self) {
        self.chart.rebuild(&self.history, self.chart_field);
    }

    /// Mode indicator: connectivity first, then the confirmed state.
    pub fn mode_display(&self) -> ModeDisplay {
        match (self.connectivity, self.system) {
            (Connectivity::Offline, _) => ModeDisplay::Disconnected,
            (_, Some(system)) => system.mode_display(),
            (_, None) => ModeDisplay::Connecting,
        }
    }

    /// Highlighted control; keeps its last confirmed value while offline.
    pub fn active_control(&self) -> Option<ActiveControl> {
        self.system.map(|system| system.active_control())
    }

    pub fn manual_panel_visible(&self) -> bool {
        self.system
            .is_some_and(|system| system.manual_panel_visible())
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: WorkerEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: WorkerEvent) {
        self.pending_events.push_back(event);
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }
}
