//! Snapshot polling against `/data`

use super::core::{EventSender, WorkerConfig};
use crate::backend::{Backend, fetch_dashboard};
use crate::control::SystemState;
use crate::error_classifier::ErrorClassifier;
use crate::events::{Event, EventType, StateUpdate};
use crate::logging::LogLevel;
use std::sync::Arc;
use tokio::sync::{Notify, broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Polls the backend one request at a time and publishes every result.
pub struct Poller {
    backend: Arc<dyn Backend>,
    event_sender: EventSender,
    config: WorkerConfig,
    /// Last confirmed state, read by the dispatcher for the toggle
    confirmed: watch::Sender<Option<SystemState>>,
    /// Re-poll requests; several requests during one poll collapse into one
    refresh: Arc<Notify>,
    classifier: ErrorClassifier,
    online: Option<bool>,
}

impl Poller {
    pub fn new(
        backend: Arc<dyn Backend>,
        event_sender: EventSender,
        config: WorkerConfig,
        confirmed: watch::Sender<Option<SystemState>>,
        refresh: Arc<Notify>,
    ) -> Self {
        Self {
            backend,
            event_sender,
            config,
            confirmed,
            refresh,
            classifier: ErrorClassifier::new(),
            online: None,
        }
    }

    /// Issue one `GET /data` and report the outcome. Returns whether it succeeded.
    pub async fn poll_once(&mut self) -> bool {
        let server_url = self.config.environment.server_url();
        match fetch_dashboard(self.backend.as_ref(), self.config.control_model).await {
            Ok(data) => {
                self.confirmed.send_replace(Some(data.system));
                if self.online != Some(true) {
                    self.event_sender
                        .send_poll_event(
                            format!("Connected to {}", server_url),
                            EventType::Success,
                            LogLevel::Info,
                        )
                        .await;
                }
                self.online = Some(true);

                let msg = format!(
                    "Polled {} history rows, mode {}",
                    data.history.len(),
                    data.system.mode_display().label()
                );
                self.event_sender
                    .send_event(Event::state_change(StateUpdate::Poll(Box::new(data)), msg))
                    .await;
                true
            }
            Err(e) => {
                // Repeats of an ongoing outage drop to debug
                let log_level = if self.online == Some(false) {
                    LogLevel::Debug
                } else {
                    self.classifier.classify_backend_error(&e)
                };
                self.online = Some(false);
                self.event_sender
                    .send_poll_event(
                        format!("Failed to poll {}: {}", server_url, e),
                        EventType::Error,
                        log_level,
                    )
                    .await;
                self.event_sender
                    .send_event(Event::state_change(
                        StateUpdate::Disconnected,
                        "Backend unreachable".to_string(),
                    ))
                    .await;
                false
            }
        }
    }

    /// Start the poll loop: once immediately, then on every interval tick or re-poll request.
    pub fn run(mut self, mut shutdown: broadcast::Receiver<()>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let refresh = self.refresh.clone();
            let mut ticker = tokio::time::interval(self.config.poll_interval);
            // Ticks that elapse while a poll is in flight are dropped, not queued
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = shutdown.recv() => break,
                    _ = ticker.tick() => {}
                    _ = refresh.notified() => {}
                }
                // A poll still in flight at shutdown is abandoned
                tokio::select! {
                    _ = shutdown.recv() => break,
                    _ = self.poll_once() => {}
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::backend::error::BackendError;
    use crate::backend::testing::SlowBackend;
    use crate::control::ControlModel;
    use crate::environment::Environment;
    use crate::model::{ControlMode, DataPayload, DataResponse, PowerStatus};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn dashboard_payload(mode: ControlMode) -> DataPayload {
        DataPayload::Dashboard(DataResponse {
            flask_system_status: Some(PowerStatus::On),
            control_mode: Some(mode),
            ..Default::default()
        })
    }

    fn server_error() -> BackendError {
        BackendError::Http {
            status: 500,
            message: "Koneksi database gagal".to_string(),
        }
    }

    fn poller_with(
        backend: MockBackend,
        interval: Duration,
    ) -> (
        Poller,
        mpsc::Receiver<Event>,
        watch::Receiver<Option<SystemState>>,
        Arc<Notify>,
    ) {
        poller_on(Arc::new(backend), interval)
    }

    fn poller_on(
        backend: Arc<dyn Backend>,
        interval: Duration,
    ) -> (
        Poller,
        mpsc::Receiver<Event>,
        watch::Receiver<Option<SystemState>>,
        Arc<Notify>,
    ) {
        let (event_tx, event_rx) = mpsc::channel(64);
        let (confirmed_tx, confirmed_rx) = watch::channel(None);
        let refresh = Arc::new(Notify::new());
        let mut config = WorkerConfig::new(Environment::Local, ControlModel::TriState);
        config.poll_interval = interval;
        let poller = Poller::new(
            backend,
            EventSender::new(event_tx),
            config,
            confirmed_tx,
            refresh.clone(),
        );
        (poller, event_rx, confirmed_rx, refresh)
    }

    fn drain(rx: &mut mpsc::Receiver<Event>) -> Vec<Event> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_successful_poll_publishes_state() {
        let mut backend = MockBackend::new();
        backend
            .expect_fetch_data()
            .returning(|| Ok(dashboard_payload(ControlMode::Manual)));
        let (mut poller, mut events, confirmed, _) = poller_with(backend, Duration::from_secs(60));

        assert!(poller.poll_once().await);

        assert_eq!(
            *confirmed.borrow(),
            Some(SystemState::TriState {
                system: PowerStatus::On,
                mode: ControlMode::Manual
            })
        );
        let events = drain(&mut events);
        assert_eq!(events[0].event_type, EventType::Success);
        assert!(matches!(events[1].update, Some(StateUpdate::Poll(_))));
    }

    #[tokio::test]
    // A failed poll reports the outage but keeps the last confirmed state.
    async fn test_failed_poll_reports_disconnect() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut backend = MockBackend::new();
        backend.expect_fetch_data().returning(move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(dashboard_payload(ControlMode::Auto))
            } else {
                Err(server_error())
            }
        });
        let (mut poller, mut events, confirmed, _) = poller_with(backend, Duration::from_secs(60));

        assert!(poller.poll_once().await);
        drain(&mut events);
        assert!(!poller.poll_once().await);

        let first = drain(&mut events);
        assert_eq!(first[0].event_type, EventType::Error);
        assert_eq!(first[0].log_level, LogLevel::Warn);
        assert_eq!(first[1].update, Some(StateUpdate::Disconnected));
        assert!(confirmed.borrow().is_some());

        // Still down: logged again, but quietly
        assert!(!poller.poll_once().await);
        let repeat = drain(&mut events);
        assert_eq!(repeat[0].log_level, LogLevel::Debug);
    }

    #[tokio::test]
    // The loop survives failures and the next tick still polls.
    async fn test_poll_loop_continues_after_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut backend = MockBackend::new();
        backend.expect_fetch_data().returning(move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(server_error())
            } else {
                Ok(dashboard_payload(ControlMode::Auto))
            }
        });
        let (poller, mut events, confirmed, _) = poller_with(backend, Duration::from_millis(20));
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let handle = poller.run(shutdown_rx);
        tokio::time::sleep(Duration::from_millis(150)).await;
        let _ = shutdown_tx.send(());
        handle.await.unwrap();

        assert!(calls.load(Ordering::SeqCst) >= 2);
        assert!(confirmed.borrow().is_some());
        let events = drain(&mut events);
        assert_eq!(events[1].update, Some(StateUpdate::Disconnected));
        assert!(
            events
                .iter()
                .any(|event| matches!(event.update, Some(StateUpdate::Poll(_))))
        );
    }

    #[tokio::test]
    // Several re-poll requests before the loop gets to them cause one extra poll.
    async fn test_refresh_requests_coalesce() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut backend = MockBackend::new();
        backend.expect_fetch_data().returning(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(dashboard_payload(ControlMode::Auto))
        });
        let (poller, _events, _, refresh) = poller_with(backend, Duration::from_secs(60));
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        refresh.notify_one();
        refresh.notify_one();
        refresh.notify_one();
        let handle = poller.run(shutdown_rx);
        tokio::time::sleep(Duration::from_millis(100)).await;
        let _ = shutdown_tx.send(());
        handle.await.unwrap();

        // Startup tick plus a single follow-up
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    // Shutdown does not wait for a hanging request to finish.
    async fn test_shutdown_interrupts_poll_in_flight() {
        let backend = Arc::new(SlowBackend::new(Duration::from_secs(5)));
        let (poller, _events, confirmed, _) =
            poller_on(backend.clone(), Duration::from_secs(60));
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let handle = poller.run(shutdown_rx);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(backend.calls(), 1);

        let _ = shutdown_tx.send(());
        let joined = tokio::time::timeout(Duration::from_millis(500), handle).await;
        assert!(joined.is_ok());
        assert!(confirmed.borrow().is_none());
    }

    #[tokio::test]
    // Polls slower than the interval run back to back, never side by side.
    async fn test_slow_polls_never_overlap() {
        let backend = Arc::new(SlowBackend::new(Duration::from_millis(50)));
        let (poller, _events, _, _) = poller_on(backend.clone(), Duration::from_millis(10));
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let handle = poller.run(shutdown_rx);
        tokio::time::sleep(Duration::from_millis(300)).await;
        let _ = shutdown_tx.send(());
        handle.await.unwrap();

        assert_eq!(backend.max_in_flight(), 1);
        // Bounded by poll duration, not by the 10 ms interval
        let calls = backend.calls();
        assert!(calls >= 2, "only {} polls", calls);
        assert!(calls <= 7, "{} polls in 300 ms", calls);
    }
}
