//! Messages API client used by the tailoring service.
//!
//! One operation matters here: send a prompt, get the answer back as JSON. Transport
//! failures, 429 and 5xx answers are retried with a doubling delay. The endpoint is
//! configurable so a proxy or compatible gateway can stand in for the hosted API.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1/messages";
pub const MODEL: &str = "claude-sonnet-4-5";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;
const MAX_ATTEMPTS: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned no text")]
    EmptyContent,
}

#[derive(Serialize)]
struct Request<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [Turn<'a>; 1],
}

#[derive(Serialize)]
struct Turn<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct Reply {
    content: Vec<ReplyBlock>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct ReplyBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl Reply {
    fn into_text(self) -> Result<String, LlmError> {
        self.content
            .into_iter()
            .filter(|b| b.kind == "text")
            .find_map(|b| b.text)
            .ok_or(LlmError::EmptyContent)
    }
}

/// How a single request ended when it did not fail for good.
enum Attempt {
    Answer(String),
    Retry(LlmError),
}

#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: String) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    /// Asks the model and deserializes its answer, tolerating a Markdown code fence.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
    ) -> Result<T, LlmError> {
        let text = self.complete(prompt, system).await?;
        Ok(serde_json::from_str(strip_json_fences(&text))?)
    }

    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let request = Request {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: [Turn {
                role: "user",
                content: prompt,
            }],
        };

        let mut attempt = 1;
        loop {
            match self.send(&request).await? {
                Attempt::Answer(text) => return Ok(text),
                Attempt::Retry(err) if attempt < MAX_ATTEMPTS => {
                    let delay = backoff(attempt);
                    warn!(attempt, delay_ms = delay.as_millis() as u64, error = %err, "retrying LLM call");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Attempt::Retry(err) => return Err(err),
            }
        }
    }

    async fn send(&self, request: &Request<'_>) -> Result<Attempt, LlmError> {
        let sent = self
            .client
            .post(&self.base_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(request)
            .send()
            .await;
        let response = match sent {
            Ok(response) => response,
            Err(e) => return Ok(Attempt::Retry(e.into())),
        };

        let status = response.status();
        if status.is_success() {
            let reply: Reply = response.json().await?;
            if let Some(usage) = &reply.usage {
                debug!(
                    input_tokens = usage.input_tokens,
                    output_tokens = usage.output_tokens,
                    "LLM call succeeded"
                );
            }
            return reply.into_text().map(Attempt::Answer);
        }

        let err = LlmError::Api {
            status: status.as_u16(),
            message: error_message(response.text().await.unwrap_or_default()),
        };
        if is_transient(status) {
            Ok(Attempt::Retry(err))
        } else {
            Err(err)
        }
    }
}

fn is_transient(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Delay before attempt `attempt + 1`: 1s, 2s, 4s, ...
fn backoff(attempt: u32) -> Duration {
    Duration::from_secs(1 << (attempt - 1))
}

/// The API's `error.message` when the body carries one, else the body itself.
fn error_message(body: String) -> String {
    #[derive(Deserialize)]
    struct Envelope {
        error: Detail,
    }
    #[derive(Deserialize)]
    struct Detail {
        message: String,
    }

    match serde_json::from_str::<Envelope>(&body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => body,
    }
}

/// Strips a ```json ... ``` or ``` ... ``` fence around the answer.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(inner) = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
    else {
        return text;
    };
    let inner = inner.trim_start();
    inner.strip_suffix("```").map_or(inner, str::trim)
}
