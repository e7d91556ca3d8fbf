//! Session setup and initialization

use crate::backend::{Backend, BackendClient};
use crate::config::Settings;
use crate::environment::Environment;
use crate::events::Event;
use crate::runtime::{WorkerHandles, start_workers};
use crate::workers::UserCommand;
use crate::workers::core::WorkerConfig;
use std::error::Error;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Session data for both TUI and headless modes
#[derive(Debug)]
pub struct SessionData {
    /// Event receiver for worker events
    pub event_receiver: mpsc::Receiver<Event>,
    /// Operator commands for the dispatcher
    pub command_sender: mpsc::Sender<UserCommand>,
    /// Join handles for worker tasks
    pub join_handles: Vec<JoinHandle<()>>,
    /// Shutdown sender to stop all workers
    pub shutdown_sender: broadcast::Sender<()>,
    /// Backend being polled
    pub environment: Environment,
    /// Effective settings for this run
    pub settings: Settings,
}

/// Sets up a dashboard session
///
/// This function handles all the common setup required for both TUI and headless modes:
/// 1. Creates the HTTP client for the backend
/// 2. Sets up shutdown channel
/// 3. Starts the poller and the command dispatcher
///
/// # Arguments
/// * `settings` - Resolved settings (server URL, control model, poll interval)
///
/// # Returns
/// * `Ok(SessionData)` - Successfully set up session
/// * `Err` - The HTTP client could not be built
pub fn setup_session(settings: Settings) -> Result<SessionData, Box<dyn Error>> {
    let environment = settings.environment.clone();
    let backend: Arc<dyn Backend> = Arc::new(BackendClient::new(environment.clone())?);

    let mut config = WorkerConfig::new(environment.clone(), settings.control_model);
    config.poll_interval = settings.poll_interval;

    // Create shutdown channel - only one shutdown signal needed
    let (shutdown_sender, _) = broadcast::channel(1);

    let WorkerHandles {
        event_receiver,
        command_sender,
        join_handles,
    } = start_workers(backend, config, &shutdown_sender);

    log::debug!(
        "Session started against {} ({}, every {:?})",
        environment.server_url(),
        settings.control_model,
        settings.poll_interval
    );

    Ok(SessionData {
        event_receiver,
        command_sender,
        join_handles,
        shutdown_sender,
        environment,
        settings,
    })
}

/// Signals shutdown and waits for every worker task to exit.
pub async fn stop_workers(
    shutdown_sender: &broadcast::Sender<()>,
    join_handles: Vec<JoinHandle<()>>,
) {
    let _ = shutdown_sender.send(());
    for handle in join_handles {
        let _ = handle.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn test_stop_workers_signals_and_joins() {
        let (shutdown_sender, _) = broadcast::channel(1);
        let stopped = Arc::new(AtomicBool::new(false));
        let flag = stopped.clone();
        let mut shutdown = shutdown_sender.subscribe();
        let handle = tokio::spawn(async move {
            let _ = shutdown.recv().await;
            flag.store(true, Ordering::SeqCst);
        });

        stop_workers(&shutdown_sender, vec![handle]).await;

        assert!(stopped.load(Ordering::SeqCst));
    }
}
