//! Boundary adapter between agents and the external reasoning service.

use crate::error::ServiceError;
use crate::models::{AgentDescriptor, AgentResult};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// An external service that completes a system role plus a user payload.
#[async_trait]
pub trait ReasoningService: Send + Sync {
    async fn complete(&self, system_role: &str, user_payload: &str) -> Result<String, ServiceError>;
}

/// Sends an agent's role, the serialized context and a prompt to the
/// reasoning service, bounded by a per-call deadline.
#[derive(Clone)]
pub struct AgentInvoker {
    service: Arc<dyn ReasoningService>,
    timeout: Duration,
}

impl AgentInvoker {
    pub fn new(service: Arc<dyn ReasoningService>, timeout: Duration) -> Self {
        Self { service, timeout }
    }

    /// Invoke one agent. Never fails: service errors become a failed result.
    pub async fn invoke<C>(&self, descriptor: &AgentDescriptor, context: &C, prompt: &str) -> AgentResult
    where
        C: Serialize + ?Sized,
    {
        match self.try_invoke(descriptor, context, prompt).await {
            Ok(response) => {
                debug!("Agent {} responded ({} chars)", descriptor.id, response.len());
                AgentResult::success(descriptor, response)
            }
            Err(e) => {
                warn!("Agent {} error: {}", descriptor.id, e);
                AgentResult::failure(descriptor, e.to_string())
            }
        }
    }

    async fn try_invoke<C>(
        &self,
        descriptor: &AgentDescriptor,
        context: &C,
        prompt: &str,
    ) -> Result<String, ServiceError>
    where
        C: Serialize + ?Sized,
    {
        let payload = build_payload(context, prompt)?;

        tokio::time::timeout(self.timeout, self.service.complete(&descriptor.role, &payload))
            .await
            .map_err(|_| ServiceError::Timeout(self.timeout))?
    }
}

/// The user message: pretty-printed context followed by the question.
pub fn build_payload<C>(context: &C, prompt: &str) -> Result<String, ServiceError>
where
    C: Serialize + ?Sized,
{
    let context_json = serde_json::to_string_pretty(context)
        .map_err(|e| ServiceError::Request(format!("Failed to serialize context: {}", e)))?;

    Ok(format!("Context:\n{}\n\nQuestion: {}", context_json, prompt))
}
