//! HTTP GameBackend adapter.
//!
//! Speaks the game REST API over reqwest, for presentation layers that run
//! in a separate process from the backend.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpBackendConfig::new("http://localhost:8080")
//!     .with_timeout(Duration::from_secs(5));
//! let backend = HttpGameBackend::new(config);
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::domain::foundation::{ChoiceCode, DilemmaId, SessionId, SharePercentage};
use crate::ports::{BackendError, GameBackend};

/// Configuration for the HTTP backend adapter.
#[derive(Debug, Clone)]
pub struct HttpBackendConfig {
    /// Base URL of the game API (without trailing slash).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl HttpBackendConfig {
    /// Creates a configuration for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Wire shape of a created session.
#[derive(Debug, Deserialize)]
struct SessionCreated {
    id: SessionId,
}

/// Wire shape of a recorded choice.
#[derive(Debug, Deserialize)]
struct ChoiceRecorded {
    percentage_same: f64,
}

/// Wire shape of an API error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// GameBackend over the HTTP API.
pub struct HttpGameBackend {
    config: HttpBackendConfig,
    client: Client,
}

impl HttpGameBackend {
    /// Creates a new HTTP backend adapter.
    pub fn new(config: HttpBackendConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }
}

#[async_trait]
impl GameBackend for HttpGameBackend {
    async fn create_session(&self) -> Result<SessionId, BackendError> {
        let response = self
            .client
            .post(self.url("/game/sessions"))
            .send()
            .await
            .map_err(transport_error)?;

        let created: SessionCreated = parse_success(response).await?;
        Ok(created.id)
    }

    async fn record_choice(
        &self,
        session_id: &SessionId,
        dilemma_id: &DilemmaId,
        choice: ChoiceCode,
    ) -> Result<SharePercentage, BackendError> {
        let response = self
            .client
            .post(self.url(&format!("/game/sessions/{}/choices", session_id)))
            .json(&json!({
                "dilemma_id": dilemma_id.as_str(),
                "choice": choice.as_str(),
            }))
            .send()
            .await
            .map_err(transport_error)?;

        let recorded: ChoiceRecorded = parse_success(response).await?;
        SharePercentage::try_new(recorded.percentage_same).map_err(|e| {
            BackendError::Rejected(format!("backend returned an invalid percentage: {}", e))
        })
    }

    async fn complete_session(&self, session_id: &SessionId) -> Result<(), BackendError> {
        let response = self
            .client
            .post(self.url(&format!("/game/sessions/{}/complete", session_id)))
            .send()
            .await
            .map_err(transport_error)?;

        ensure_success(response).await?;
        Ok(())
    }
}

fn transport_error(error: reqwest::Error) -> BackendError {
    BackendError::Unavailable(error.to_string())
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => format!("HTTP {}", status),
    };
    Err(BackendError::Rejected(format!(
        "HTTP {}: {}",
        status.as_u16(),
        message
    )))
}

async fn parse_success<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, BackendError> {
    ensure_success(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| BackendError::Rejected(format!("malformed backend response: {}", e)))
}
