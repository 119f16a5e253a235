//! Calling Agent Port
//!
//! Abstract interface for the external service that places dealer calls.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, AgentCall};

/// Service interface for the outbound calling agent
#[async_trait]
pub trait CallAgent: Send + Sync {
    /// Ask the agent to place every call in the batch.
    ///
    /// Returns the agent's JSON response untouched. Transport failures,
    /// non-success statuses and unparseable bodies are `ExternalService` errors.
    async fn init_calls(&self, calls: &[AgentCall]) -> Result<serde_json::Value, DomainError>;
}
