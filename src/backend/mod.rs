use crate::backend::error::BackendError;
use crate::control::{ControlModel, SystemState};
use crate::environment::Environment;
use crate::model::{DashboardData, DataPayload, ManualCommand, PowerStatus, TargetMode};

pub(crate) mod client;
pub use client::BackendClient;
pub mod error;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    fn environment(&self) -> &Environment;

    /// Latest reading, history and system state (`GET /data`).
    async fn fetch_data(&self) -> Result<DataPayload, BackendError>;

    /// ON/OFF switch position on the older backend (`GET /system_status`).
    async fn system_status(&self) -> Result<PowerStatus, BackendError>;

    /// Switches between AUTO, MANUAL and OFF (`POST /set_mode`).
    async fn set_mode(&self, mode: TargetMode) -> Result<(), BackendError>;

    /// Moves the rack while in MANUAL (`POST /manual_control`).
    async fn manual_control(&self, command: ManualCommand) -> Result<(), BackendError>;

    /// Sets the ON/OFF switch on the older backend (`POST /toggle_system`).
    async fn toggle_system(&self, target: PowerStatus) -> Result<(), BackendError>;
}

/// Polls `/data` once and normalizes either payload shape.
///
/// For the bare-rows payload the newest row doubles as the latest reading and
/// the switch position comes from `/system_status`, falling back to the newest
/// row's `status_system` when that endpoint is unavailable.
pub async fn fetch_dashboard(
    backend: &dyn Backend,
    model: ControlModel,
) -> Result<DashboardData, BackendError> {
    match backend.fetch_data().await? {
        DataPayload::Dashboard(response) => Ok(DashboardData {
            latest: response.latest,
            history: response.history.unwrap_or_default(),
            system: SystemState::from_fields(
                model,
                response.flask_system_status,
                response.control_mode,
            ),
        }),
        DataPayload::Rows(rows) => {
            let system = match backend.system_status().await {
                Ok(status) => Some(status),
                Err(e) => {
                    log::debug!("/system_status unavailable, using newest row: {}", e);
                    rows.first()
                        .and_then(|row| row.system_status.as_deref())
                        .and_then(|status| status.parse::<PowerStatus>().ok())
                }
            };
            Ok(DashboardData {
                latest: rows.first().map(|row| row.reading.clone()),
                system: SystemState::from_fields(model, system, None),
                history: rows,
            })
        }
    }
}

/// Test backend whose every call succeeds after a fixed delay.
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::model::DataResponse;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    pub struct SlowBackend {
        environment: Environment,
        delay: Duration,
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl SlowBackend {
        pub fn new(delay: Duration) -> Self {
            Self {
                environment: Environment::Local,
                delay,
                calls: AtomicUsize::new(0),
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
            }
        }

        /// Calls started so far.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// Most calls ever running at the same time.
        pub fn max_in_flight(&self) -> usize {
            self.max_in_flight.load(Ordering::SeqCst)
        }

        async fn call(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(running, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
        }
    }

    #[async_trait::async_trait]
    impl Backend for SlowBackend {
        fn environment(&self) -> &Environment {
            &self.environment
        }

        async fn fetch_data(&self) -> Result<DataPayload, BackendError> {
            self.call().await;
            Ok(DataPayload::Dashboard(DataResponse::default()))
        }

        async fn system_status(&self) -> Result<PowerStatus, BackendError> {
            self.call().await;
            Ok(PowerStatus::On)
        }

        async fn set_mode(&self, _mode: TargetMode) -> Result<(), BackendError> {
            self.call().await;
            Ok(())
        }

        async fn manual_control(&self, _command: ManualCommand) -> Result<(), BackendError> {
            self.call().await;
            Ok(())
        }

        async fn toggle_system(&self, _target: PowerStatus) -> Result<(), BackendError> {
            self.call().await;
            Ok(())
        }
    }
}
