//! Hosted text-generation client and the mock/live switch.
//!
//! We only call an OpenAI-compatible `chat/completions` endpoint with a single user
//! message and read back plain text. Calls are instrumented and log model name,
//! latency and token usage (not contents). The API key is never logged.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, instrument};

use crate::config::ModelSettings;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum ModelError {
  #[error("HTTP error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("API error (status {status}): {message}")]
  Api { status: u16, message: String },

  #[error("JSON parse error: {0}")]
  Parse(#[from] serde_json::Error),

  #[error("model returned empty content")]
  EmptyContent,
}

/// "Generate text from prompt". The only operation the core needs from a model.
#[async_trait]
pub trait TextGenerator: Send + Sync {
  async fn generate(&self, prompt: &str) -> Result<String, ModelError>;

  /// Short label for logs and the health endpoint.
  fn describe(&self) -> String {
    "custom".into()
  }
}

/// Chosen once at startup and shared read-only by every request.
#[derive(Clone)]
pub enum ModelMode {
  Mock,
  Live(Arc<dyn TextGenerator>),
}

impl ModelMode {
  /// Live when settings are present and the HTTP client builds; otherwise mock.
  pub fn from_settings(settings: Option<&ModelSettings>) -> Self {
    let Some(settings) = settings else {
      info!(target: "airis_backend", "Model disabled (no NVIDIA_API_KEY). Using mock responses.");
      return ModelMode::Mock;
    };
    match ChatCompletionsClient::new(settings.clone()) {
      Ok(client) => {
        info!(target: "airis_backend", base_url = %settings.base_url, model = %settings.model, temperature = settings.temperature, "Model enabled.");
        ModelMode::Live(Arc::new(client))
      }
      Err(e) => {
        error!(target: "airis_backend", error = %e, "Failed to build model client. Using mock responses.");
        ModelMode::Mock
      }
    }
  }

  pub fn is_live(&self) -> bool {
    matches!(self, ModelMode::Live(_))
  }

  pub fn label(&self) -> &'static str {
    match self {
      ModelMode::Mock => "mock",
      ModelMode::Live(_) => "live",
    }
  }
}

impl std::fmt::Debug for ModelMode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ModelMode::Mock => f.write_str("Mock"),
      ModelMode::Live(g) => f.debug_tuple("Live").field(&g.describe()).finish(),
    }
  }
}

#[derive(Clone)]
pub struct ChatCompletionsClient {
  client: reqwest::Client,
  settings: ModelSettings,
}

impl ChatCompletionsClient {
  pub fn new(settings: ModelSettings) -> Result<Self, ModelError> {
    let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
    Ok(Self { client, settings })
  }
}

#[async_trait]
impl TextGenerator for ChatCompletionsClient {
  #[instrument(level = "info", skip(self, prompt), fields(model = %self.settings.model, prompt_len = prompt.len()))]
  async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
    let url = format!("{}/chat/completions", self.settings.base_url.trim_end_matches('/'));
    let req = ChatCompletionRequest {
      model: &self.settings.model,
      messages: vec![ChatMessageReq { role: "user", content: prompt }],
      temperature: self.settings.temperature,
    };

    let start = std::time::Instant::now();
    let res = self.client.post(&url)
      .header(USER_AGENT, "airis-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.settings.api_key))
      .json(&req).send().await?;

    let status = res.status();
    if !status.is_success() {
      let body = res.text().await.unwrap_or_default();
      let message = extract_api_error(&body).unwrap_or(body);
      return Err(ModelError::Api { status: status.as_u16(), message });
    }

    let body = res.text().await?;
    let parsed: ChatCompletionResponse = serde_json::from_str(&body)?;
    if let Some(usage) = &parsed.usage {
      info!(prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, "Model usage");
    }
    let text = first_choice_text(parsed)?;
    debug!(elapsed = ?start.elapsed(), reply_len = text.len(), "Model response received");
    Ok(text)
  }

  fn describe(&self) -> String {
    format!("{} @ {}", self.settings.model, self.settings.base_url)
  }
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
  model: &'a str,
  messages: Vec<ChatMessageReq<'a>>,
  temperature: f32,
}
#[derive(Serialize)]
struct ChatMessageReq<'a> { role: &'a str, content: &'a str }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  #[serde(default)] choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
  #[serde(default)] total_tokens: Option<u32>,
}

fn first_choice_text(resp: ChatCompletionResponse) -> Result<String, ModelError> {
  resp.choices
    .into_iter()
    .next()
    .and_then(|c| c.message.content)
    .map(|t| t.trim().to_string())
    .filter(|t| !t.is_empty())
    .ok_or(ModelError::EmptyContent)
}

/// Try to extract a clean error message from a provider error body.
/// Handles both `{"error": {"message": ..}}` and `{"detail": ..}` shapes.
fn extract_api_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  #[derive(Deserialize)]
  struct Detail { detail: String }

  serde_json::from_str::<EWrap>(body)
    .map(|w| w.error.message)
    .or_else(|_| serde_json::from_str::<Detail>(body).map(|d| d.detail))
    .ok()
}
