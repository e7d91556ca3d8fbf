//! Core worker utilities

use crate::control::ControlModel;
use crate::environment::Environment;
use crate::events::{Event, EventType};
use crate::logging::LogLevel;
use std::time::Duration;
use tokio::sync::mpsc;

/// Common event sending utilities for workers
#[derive(Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Send a generic event
    pub async fn send_event(&self, event: Event) {
        let _ = self.sender.send(event).await;
    }

    pub async fn send_poll_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        let _ = self
            .sender
            .send(Event::poller_with_level(message, event_type, log_level))
            .await;
    }

    pub async fn send_command_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        let _ = self
            .sender
            .send(Event::dispatcher_with_level(message, event_type, log_level))
            .await;
    }
}

/// Worker configuration shared across all worker types
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub environment: Environment,
    pub control_model: ControlModel,
    pub poll_interval: Duration,
}

impl WorkerConfig {
    pub fn new(environment: Environment, control_model: ControlModel) -> Self {
        Self {
            environment,
            control_model,
            poll_interval: control_model.default_poll_interval(),
        }
    }
}
