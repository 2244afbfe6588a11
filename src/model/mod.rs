pub mod relay;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::AppConfig;
use crate::web::models::Message;

pub use relay::{ConversationRelay, RelayReply};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("request to generation service failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("generation service returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed response from generation service: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub content: String,
    /// Token accounting exactly as the service reported it, `null` if absent.
    pub usage: Value,
}

/// Anything that can turn a message sequence into a reply.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, GenerationError>;
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl OpenAiClient {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        info!("Using generation service at: {}", config.base_url);

        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            client,
        })
    }
}

#[async_trait]
impl GenerationService for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, GenerationError> {
        let url = format!("{}/chat/completions", self.base_url);

        let payload = json!({
            "model": request.model,
            "messages": request.messages,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
        });

        info!(
            "Sending {} messages to {} (max_tokens: {})",
            request.messages.len(),
            request.model,
            request.max_tokens
        );
        debug!("Payload: {}", payload);

        let mut builder = self.client.post(&url).json(&payload);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(GenerationError::Status { status, body });
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;
        debug!("Response JSON: {}", response_json);

        parse_completion(&response_json)
    }
}

fn parse_completion(response_json: &Value) -> Result<Completion, GenerationError> {
    let content = response_json
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .ok_or_else(|| {
            GenerationError::MalformedResponse("missing choices[0].message.content".to_string())
        })?;

    Ok(Completion {
        content: content.to_string(),
        usage: response_json.get("usage").cloned().unwrap_or(Value::Null),
    })
}
