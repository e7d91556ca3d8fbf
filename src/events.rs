//! Event System
//!
//! Types and implementations for worker events and logging

use crate::logging::{LogLevel, is_visible_with_env};
use crate::model::DashboardData;
use chrono::Local;
use std::fmt::Display;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Worker {
    /// Worker that polls `/data` and reports the reconciled dashboard.
    Poller,
    /// Worker that sends operator commands to the backend.
    Dispatcher,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    StateChange,
    /// Blocking alert the operator must dismiss.
    Alert,
}

/// View-state change carried by a `StateChange` event
#[derive(Debug, Clone, PartialEq)]
pub enum StateUpdate {
    /// A poll succeeded.
    Poll(Box<DashboardData>),
    /// A poll failed; only connectivity changes.
    Disconnected,
    /// Feedback line under the controls.
    StatusMessage(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub worker: Worker,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
    /// Set on `StateChange` events
    pub update: Option<StateUpdate>,
}

impl Event {
    fn new(worker: Worker, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            worker,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
            update: None,
        }
    }

    pub fn state_change(update: StateUpdate, msg: String) -> Self {
        Self {
            update: Some(update),
            ..Self::new(Worker::Poller, msg, EventType::StateChange, LogLevel::Info)
        }
    }

    pub fn status_message(msg: String) -> Self {
        Self {
            update: Some(StateUpdate::StatusMessage(msg.clone())),
            ..Self::new(
                Worker::Dispatcher,
                msg,
                EventType::StateChange,
                LogLevel::Info,
            )
        }
    }

    pub fn alert(msg: String) -> Self {
        Self::new(Worker::Dispatcher, msg, EventType::Alert, LogLevel::Error)
    }

    pub fn poller_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::Poller, msg, event_type, log_level)
    }

    pub fn dispatcher_with_level(
        msg: String,
        event_type: EventType,
        log_level: LogLevel,
    ) -> Self {
        Self::new(Worker::Dispatcher, msg, event_type, log_level)
    }

    pub fn should_display(&self) -> bool {
        // StateChange events update the view, they are not log lines
        if self.event_type == EventType::StateChange {
            return false;
        }
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        is_visible_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg)
    }
}
