//! HTTP Calling Agent Implementation
//!
//! Forwards call batches to the external agent's `/calls/init` endpoint using reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use haggle::{AgentCall, CallAgent, DomainError};

/// HTTP implementation of CallAgent
pub struct HttpCallAgent {
    client: Client,
    init_url: String,
}

impl HttpCallAgent {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            init_url: format!("{}/calls/init", base_url.trim_end_matches('/')),
        })
    }

    pub fn init_url(&self) -> &str {
        &self.init_url
    }
}

#[async_trait]
impl CallAgent for HttpCallAgent {
    async fn init_calls(&self, calls: &[AgentCall]) -> Result<serde_json::Value, DomainError> {
        tracing::debug!("Calling agent service at {} with {} call(s)", self.init_url, calls.len());

        let response = self
            .client
            .post(&self.init_url)
            .json(calls)
            .send()
            .await
            .map_err(|e| DomainError::ExternalService(format!("failed to execute request: {e}")))?;

        let status = response.status();
        if !is_accepted(status) {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::ExternalService(format!(
                "agent service returned status {}: {}",
                status.as_u16(),
                body
            )));
        }

        let payload = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| DomainError::ExternalService(format!("failed to parse agent response: {e}")))?;

        tracing::info!("Successfully initiated {} call(s) with agent service", calls.len());
        Ok(payload)
    }
}

/// The agent answers 200 or 201; anything else is a failed hand-off
fn is_accepted(status: StatusCode) -> bool {
    status == StatusCode::OK || status == StatusCode::CREATED
}
