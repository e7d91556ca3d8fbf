//! Operator command dispatch

use super::core::EventSender;
use crate::backend::Backend;
use crate::consts::cli_consts::commands;
use crate::control::SystemState;
use crate::error_classifier::ErrorClassifier;
use crate::events::{Event, EventType};
use crate::logging::LogLevel;
use crate::model::{ManualCommand, TargetMode};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, broadcast, mpsc, watch};
use tokio::task::JoinHandle;

/// A control action requested from the dashboard.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UserCommand {
    SetMode(TargetMode),
    Manual(ManualCommand),
    /// Flip the legacy ON/OFF switch.
    ToggleSystem,
}

/// Sends commands to the backend and asks the poller to read the result back.
///
/// Never touches view state: outcomes travel as events and the displayed
/// state only changes once a poll confirms it.
pub struct Dispatcher {
    backend: Arc<dyn Backend>,
    event_sender: EventSender,
    confirmed: watch::Receiver<Option<SystemState>>,
    refresh: Arc<Notify>,
    classifier: ErrorClassifier,
    settle_delay: Duration,
}

impl Dispatcher {
    pub fn new(
        backend: Arc<dyn Backend>,
        event_sender: EventSender,
        confirmed: watch::Receiver<Option<SystemState>>,
        refresh: Arc<Notify>,
    ) -> Self {
        Self {
            backend,
            event_sender,
            confirmed,
            refresh,
            classifier: ErrorClassifier::new(),
            settle_delay: commands::manual_settle_delay(),
        }
    }

    #[cfg(test)]
    fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub async fn dispatch(&self, command: UserCommand) {
        match command {
            UserCommand::SetMode(mode) => self.set_mode(mode).await,
            UserCommand::Manual(command) => self.manual_control(command).await,
            UserCommand::ToggleSystem => self.toggle_system().await,
        }
    }

    async fn set_mode(&self, mode: TargetMode) {
        match self.backend.set_mode(mode).await {
            Ok(()) => {
                self.event_sender
                    .send_command_event(
                        format!("Mode set to {}", mode),
                        EventType::Success,
                        LogLevel::Info,
                    )
                    .await;
                self.refresh.notify_one();
            }
            Err(e) => {
                let log_level = self.classifier.classify_backend_error(&e);
                self.event_sender
                    .send_command_event(
                        format!("Failed to set mode {}: {}", mode, e),
                        EventType::Error,
                        log_level,
                    )
                    .await;
            }
        }
    }

    async fn manual_control(&self, command: ManualCommand) {
        match self.backend.manual_control(command).await {
            Ok(()) => {
                self.event_sender
                    .send_event(Event::status_message(command.sent_message().to_string()))
                    .await;
                self.event_sender
                    .send_command_event(
                        format!("{} command accepted", command),
                        EventType::Success,
                        LogLevel::Info,
                    )
                    .await;

                // Read back only after the actuator had time to move
                let refresh = self.refresh.clone();
                let delay = self.settle_delay;
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    refresh.notify_one();
                });
            }
            Err(e) => {
                let log_level = self.classifier.classify_backend_error(&e);
                self.event_sender
                    .send_command_event(
                        format!("Failed to send {} command: {}", command, e),
                        EventType::Error,
                        log_level,
                    )
                    .await;
            }
        }
    }

    async fn toggle_system(&self) {
        let confirmed = *self.confirmed.borrow();
        let Some(state) = confirmed else {
            let msg = "Status sistem belum diketahui. Tunggu data dari server.".to_string();
            self.event_sender
                .send_command_event(
                    "Toggle refused: no confirmed system state yet".to_string(),
                    EventType::Error,
                    LogLevel::Warn,
                )
                .await;
            self.event_sender.send_event(Event::alert(msg)).await;
            return;
        };

        let target = state.power().toggled();
        match self.backend.toggle_system(target).await {
            Ok(()) => {
                self.event_sender
                    .send_command_event(
                        format!("System switched {}", target),
                        EventType::Success,
                        LogLevel::Info,
                    )
                    .await;
                self.refresh.notify_one();
            }
            Err(e) => {
                let log_level = self.classifier.classify_backend_error(&e);
                self.event_sender
                    .send_command_event(
                        format!("Failed to switch system {}: {}", target, e),
                        EventType::Error,
                        log_level,
                    )
                    .await;
                self.event_sender
                    .send_event(Event::alert(format!(
                        "Gagal mengubah status sistem: {}",
                        e
                    )))
                    .await;
            }
        }
    }

    /// Start the dispatch loop. Commands are handled one at a time, in order.
    pub fn run(
        self,
        mut commands: mpsc::Receiver<UserCommand>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                let command = tokio::select! {
                    _ = shutdown.recv() => break,
                    command = commands.recv() => match command {
                        Some(command) => command,
                        None => break,
                    },
                };
                // A request still in flight at shutdown is abandoned
                tokio::select! {
                    _ = shutdown.recv() => break,
                    _ = self.dispatch(command) => {}
                }
            }
        })
    }
}
