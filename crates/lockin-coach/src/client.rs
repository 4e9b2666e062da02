//! Async HTTP client for the coaching chat service.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{
  Error, Result,
  prompt::{
    EMPTY_REPLY_FALLBACK, ERROR_FALLBACK, SYSTEM_PROMPT, UNREACHABLE_FALLBACK,
    user_message,
  },
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Where and how to reach the chat service.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CoachConfig {
  /// Full URL of the chat endpoint.
  pub url:          String,
  /// Model identifier passed through to the service.
  pub model:        String,
  /// Upper bound on a whole request/response exchange.
  pub timeout_secs: u64,
}

impl Default for CoachConfig {
  fn default() -> Self {
    Self {
      url:          "http://127.0.0.1:11434/api/chat".to_string(),
      model:        "llama3.1:8b".to_string(),
      timeout_secs: 120,
    }
  }
}

// ─── Wire format ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
  model:    &'a str,
  messages: [ChatMessage<'a>; 2],
  stream:   bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
  role:    &'static str,
  content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
  /// May be absent, but `null` is a malformed reply.
  #[serde(default, deserialize_with = "present")]
  message: Option<ReplyMessage>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
  content: Option<String>,
}

// ─── Client ───────────────────────────────────────────────────────────────────

/// Client for the coaching service.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
pub struct CoachClient {
  client: Client,
  config: CoachConfig,
}

impl CoachClient {
  pub fn new(config: CoachConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .map_err(Error::Request)?;
    Ok(Self { client, config })
  }

  /// Send one exchange to the chat service and return the reply text.
  ///
  /// A well-formed response without `message.content` yields
  /// [`EMPTY_REPLY_FALLBACK`]. No retries are attempted.
  pub async fn chat(&self, streak: i64, user_input: &str) -> Result<String> {
    let user_content = user_message(streak, user_input);
    let request = ChatRequest {
      model:    &self.config.model,
      messages: [
        ChatMessage { role: "system", content: SYSTEM_PROMPT },
        ChatMessage { role: "user", content: &user_content },
      ],
      stream:   false,
    };

    let resp = self
      .client
      .post(&self.config.url)
      .json(&request)
      .send()
      .await?
      .error_for_status()?;

    let body: ChatResponse = resp.json().await?;
    Ok(
      body
        .message
        .and_then(|m| m.content)
        .unwrap_or_else(|| EMPTY_REPLY_FALLBACK.to_string()),
    )
  }

  /// Like [`chat`](Self::chat), but every failure becomes a static fallback
  /// reply.
  pub async fn respond(&self, streak: i64, user_input: &str) -> String {
    match self.chat(streak, user_input).await {
      Ok(reply) => reply,
      Err(Error::Unreachable(e)) => {
        tracing::warn!(url = %self.config.url, error = %e, "coaching service unreachable");
        UNREACHABLE_FALLBACK.to_string()
      }
      Err(e) => {
        tracing::warn!(url = %self.config.url, error = %e, "coaching request failed");
        ERROR_FALLBACK.to_string()
      }
    }
  }
}
