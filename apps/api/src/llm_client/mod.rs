//! LLM client: the single point of entry for every oracle call in the service.
//!
//! No other module may call the Anthropic API directly. Every call carries an
//! output schema, sent as a single forced tool, and returns the tool's `input`
//! object. A reply that ignores the tool and answers in text is parsed as JSON
//! instead.
//!
//! Model: claude-sonnet-4-5 (hardcoded so scoring behaviour does not drift between deploys)
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
/// The model used for all oracle calls.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 8192;
const MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Gave up after {attempts} attempts")]
    Exhausted { attempts: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// JSON Schema the model must fill in, exposed to it as a tool.
#[derive(Debug, Clone)]
pub struct OutputSchema {
    pub tool_name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [UserMessage<'a>; 1],
    tools: [ToolDefinition<'a>; 1],
    tool_choice: ToolChoice<'a>,
}

#[derive(Debug, Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ToolDefinition<'a> {
    name: &'a str,
    description: &'a str,
    input_schema: &'a Value,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ToolChoice<'a> {
    Tool { name: &'a str },
}

impl<'a> MessagesRequest<'a> {
    fn new(prompt: &'a str, system: &'a str, schema: &'a OutputSchema) -> Self {
        Self {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: [UserMessage {
                role: "user",
                content: prompt,
            }],
            tools: [ToolDefinition {
                name: schema.tool_name,
                description: schema.description,
                input_schema: &schema.input_schema,
            }],
            tool_choice: ToolChoice::Tool {
                name: schema.tool_name,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        name: String,
        input: Value,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl MessagesResponse {
    /// The named tool's input, or else the first text block parsed as JSON.
    fn into_structured(self, tool_name: &str) -> Result<Value, LlmError> {
        let mut text_reply = None;
        for block in self.content {
            match block {
                ContentBlock::ToolUse { name, input } if name == tool_name => return Ok(input),
                ContentBlock::Text { text } if text_reply.is_none() => text_reply = Some(text),
                _ => {}
            }
        }

        let text = text_reply.ok_or(LlmError::EmptyContent)?;
        let json = strip_json_fences(&text);
        if json.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Outcome of one HTTP round trip.
enum Attempt {
    Done(MessagesResponse),
    Retry(LlmError),
    Fail(LlmError),
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// 1s before the second attempt, 2s before the third.
fn backoff(attempt: u32) -> Duration {
    Duration::from_millis(1000 << (attempt - 1))
}

/// Anthropic Messages API client with retries and schema-constrained output.
#[derive(Clone)]
pub struct LlmClient {
    http: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            http: Client::builder().timeout(timeout).build()?,
            api_key,
        })
    }

    /// Sends one prompt with `schema` as the forced tool and returns the JSON
    /// object the model produced for it.
    pub async fn call_structured(
        &self,
        prompt: &str,
        system: &str,
        schema: &OutputSchema,
    ) -> Result<Value, LlmError> {
        let request = MessagesRequest::new(prompt, system, schema);
        let response = self.send_with_retry(&request).await?;
        debug!(
            "LLM call '{}' succeeded: input_tokens={}, output_tokens={}",
            schema.tool_name, response.usage.input_tokens, response.usage.output_tokens
        );
        response.into_structured(schema.tool_name)
    }

    /// Retries 429 and 5xx answers and transport errors; other statuses fail at once.
    async fn send_with_retry(
        &self,
        request: &MessagesRequest<'_>,
    ) -> Result<MessagesResponse, LlmError> {
        let mut last_error = None;
        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                tokio::time::sleep(backoff(attempt)).await;
            }
            match self.attempt(request).await {
                Attempt::Done(response) => return Ok(response),
                Attempt::Fail(e) => return Err(e),
                Attempt::Retry(e) => {
                    warn!("LLM attempt {} of {MAX_ATTEMPTS} failed: {e}", attempt + 1);
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or(LlmError::Exhausted {
            attempts: MAX_ATTEMPTS,
        }))
    }

    async fn attempt(&self, request: &MessagesRequest<'_>) -> Attempt {
        let sent = self
            .http
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(request)
            .send()
            .await;
        let response = match sent {
            Ok(r) => r,
            Err(e) => return Attempt::Retry(LlmError::Http(e)),
        };

        let status = response.status();
        if status.is_success() {
            return match response.json::<MessagesResponse>().await {
                Ok(body) => Attempt::Done(body),
                Err(e) => Attempt::Fail(LlmError::Http(e)),
            };
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);
        let error = LlmError::Api {
            status: status.as_u16(),
            message,
        };
        if is_retryable(status) {
            Attempt::Retry(error)
        } else {
            Attempt::Fail(error)
        }
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest).trim_start();
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
