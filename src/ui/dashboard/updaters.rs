//! Dashboard state update logic
//!
//! Contains all methods for updating dashboard state from events

use super::chart::ChartField;
use super::state::{Connectivity, DashboardState, ReadingSlots};

use crate::events::{Event as WorkerEvent, EventType, StateUpdate};
use crate::model::DashboardData;

impl DashboardState {
    /// Apply every queued event in arrival order.
    pub fn update(&mut self) {
        while let Some(event) = self.pending_events.pop_front() {
            self.process_event(&event);
            self.add_to_activity_log(event);
        }
    }

    /// Process a single event and update relevant state
    pub fn process_event(&mut self, event: &WorkerEvent) {
        match event.event_type {
            EventType::Alert => self.alert = Some(event.msg.clone()),
            EventType::StateChange => match &event.update {
                Some(StateUpdate::Poll(data)) => {
                    self.apply_poll(data);
                    self.last_poll = Some(event.timestamp.clone());
                }
                Some(StateUpdate::Disconnected) => self.apply_disconnected(),
                Some(StateUpdate::StatusMessage(msg)) => self.status_message = Some(msg.clone()),
                None => {}
            },
            EventType::Success | EventType::Error => {}
        }
    }

    /// Reconcile the view with a successful poll.
    pub fn apply_poll(&mut self, data: &DashboardData) {
        self.connectivity = Connectivity::Online;
        self.readings = data
            .latest
            .as_ref()
            .map(ReadingSlots::from_snapshot)
            .unwrap_or_else(ReadingSlots::placeholder);

        self.set_system(data.system);
        self.status_message = data
            .system
            .mode_display()
            .status_message()
            .map(str::to_string);

        self.history = self.history_filter.apply(&data.history);
        self.rebuild_chart();
    }

    /// A failed poll only flips connectivity; everything else stays as last seen.
    pub fn apply_disconnected(&mut self) {
        self.connectivity = Connectivity::Offline;
    }

    pub fn set_chart_field(&mut self, field: ChartField) {
        self.set_chart_field_value(field);
        self.rebuild_chart();
    }

    pub fn cycle_chart_field(&mut self) {
        self.set_chart_field(self.chart_field().next());
    }
}
