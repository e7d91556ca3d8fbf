//! Drying-rack backend client
//!
//! JSON-over-HTTP client for the Flask backend that owns the sensors and the
//! rack motor.

use crate::backend::Backend;
use crate::backend::error::BackendError;
use crate::consts::cli_consts::polling;
use crate::environment::Environment;
use crate::model::{
    DataPayload, ManualCommand, ManualControlRequest, PowerStatus, SetModeRequest,
    SystemStatusResponse, TargetMode, ToggleSystemRequest, ToggleSystemResponse,
};
use reqwest::{Client, ClientBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

// User-Agent string with dashboard version
const USER_AGENT: &str = concat!("jemuran-dashboard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    environment: Environment,
}

impl BackendClient {
    pub fn new(environment: Environment) -> Result<Self, BackendError> {
        let client = ClientBuilder::new()
            .connect_timeout(polling::connect_timeout())
            .timeout(polling::request_timeout())
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            environment,
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.server_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    async fn handle_response_status(response: Response) -> Result<Response, BackendError> {
        if !response.status().is_success() {
            return Err(BackendError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, BackendError> {
        let url = self.build_url(endpoint);
        let response = self.client.get(&url).send().await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&response_bytes)?)
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<Response, BackendError> {
        let url = self.build_url(endpoint);
        let response = self.client.post(&url).json(body).send().await?;

        Self::handle_response_status(response).await
    }
}

#[async_trait::async_trait]
impl Backend for BackendClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn fetch_data(&self) -> Result<DataPayload, BackendError> {
        self.get_json("data").await
    }

    async fn system_status(&self) -> Result<PowerStatus, BackendError> {
        let response: SystemStatusResponse = self.get_json("system_status").await?;
        Ok(response.status)
    }

    async fn set_mode(&self, mode: TargetMode) -> Result<(), BackendError> {
        self.post_json("set_mode", &SetModeRequest { mode }).await?;
        Ok(())
    }

    async fn manual_control(&self, command: ManualCommand) -> Result<(), BackendError> {
        self.post_json("manual_control", &ManualControlRequest { command })
            .await?;
        Ok(())
    }

    async fn toggle_system(&self, target: PowerStatus) -> Result<(), BackendError> {
        let response = self
            .post_json(
                "toggle_system",
                &ToggleSystemRequest {
                    status_system: target,
                },
            )
            .await?;

        // A 2xx may still carry `{ "error": ... }`; an empty or non-JSON body counts as accepted
        let response_bytes = response.bytes().await?;
        let body: ToggleSystemResponse =
            serde_json::from_slice(&response_bytes).unwrap_or_default();
        match body.error {
            Some(error) => Err(BackendError::Rejected(error)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
/// These are ignored by default since they require a live backend to run.
mod live_backend_tests {
    use crate::backend::Backend;
    use crate::environment::Environment;

    #[tokio::test]
    #[ignore] // This test requires a live backend instance.
    /// Should return the dashboard payload from the local backend.
    async fn test_fetch_data() {
        let client = super::BackendClient::new(Environment::Local).unwrap();
        match client.fetch_data().await {
            Ok(payload) => println!("Got payload: {:?}", payload),
            Err(e) => panic!("Failed to fetch data: {}", e),
        }
    }

    #[tokio::test]
    #[ignore] // This test requires a live backend instance.
    /// Should read the switch position from the local backend.
    async fn test_system_status() {
        let client = super::BackendClient::new(Environment::Local).unwrap();
        match client.system_status().await {
            Ok(status) => println!("System status: {}", status),
            Err(e) => panic!("Failed to read system status: {}", e),
        }
    }
}
