//! OpenAI-compatible chat completions client.

use crate::agent::invoker::ReasoningService;
use crate::error::ServiceError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Configuration for the chat completions client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub model_name: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1".to_string(),
            model_name: "gpt-4-turbo-preview".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            temperature: 0.3,
            max_tokens: 1500,
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Chat completions request.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

/// Chat completions response.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct OpenAiClient {
    config: ClientConfig,
    api_key: Option<String>,
    http_client: reqwest::Client,
}

impl OpenAiClient {
    /// Create a client, reading the API key from the configured variable.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        Self::with_api_key(config, api_key)
    }

    pub fn with_api_key(config: ClientConfig, api_key: Option<String>) -> Result<Self> {
        info!(
            "Initializing reasoning client with model {} at {}",
            config.model_name, config.api_url
        );

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            config,
            api_key,
            http_client,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.api_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ReasoningService for OpenAiClient {
    async fn complete(&self, system_role: &str, user_payload: &str) -> Result<String, ServiceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ServiceError::MissingApiKey(self.config.api_key_env.clone()))?;

        let request = ChatRequest {
            model: &self.config.model_name,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_role.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_payload.to_string(),
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        debug!("Sending chat request to {}", self.endpoint());

        let response = self
            .http_client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ServiceError::Timeout(Duration::from_secs(self.config.timeout_seconds))
                } else if e.is_connect() {
                    ServiceError::Connection(self.config.api_url.clone())
                } else {
                    ServiceError::Request(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Api { status, body });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;

        extract_content(chat_response)
    }
}

fn extract_content(response: ChatResponse) -> Result<String, ServiceError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| ServiceError::MalformedResponse("response has no message content".to_string()))
}
