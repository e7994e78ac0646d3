/// LLM Client — the single point of entry for all chat-completion calls.
///
/// ARCHITECTURAL RULE: No other module may call the Groq API directly.
/// All LLM interactions MUST go through this module.
///
/// Model: deepseek-r1-distill-llama-70b (hardcoded — do not make configurable to prevent drift)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// The model used for every analysis.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "deepseek-r1-distill-llama-70b";
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed completion response: {0}")]
    Decode(#[from] serde_json::Error),

    /// No choices, or a choice whose `content` is null. A blank string is
    /// still a reply and is returned as-is.
    #[error("LLM response carried no message content")]
    MissingContent,
}

/// Sampling parameters sent with every completion request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingConfig {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub stream: bool,
}

impl SamplingConfig {
    /// Low temperature keeps the JSON output consistent between runs.
    pub const ANALYSIS: SamplingConfig = SamplingConfig {
        temperature: 0.2,
        max_tokens: 2000,
        top_p: 1.0,
        stream: false,
    };

    /// Used by the connectivity check; the reply is a single word.
    pub const PING: SamplingConfig = SamplingConfig {
        temperature: 0.2,
        max_tokens: 10,
        top_p: 1.0,
        stream: false,
    };
}

/// The seam between the analysis pipeline and the remote model.
///
/// Carried in `AppState` as `Arc<dyn ChatCompletion>` so tests can swap in a fake.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn send_chat_completion(
        &self,
        model: &str,
        system: &str,
        user: &str,
        sampling: SamplingConfig,
    ) -> Result<String, LlmError>;

    /// Connectivity check: asks the model for a one-word greeting.
    async fn ping(&self) -> Result<String, LlmError> {
        self.send_chat_completion(MODEL, "", "Say hello in one word", SamplingConfig::PING)
            .await
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Extracts the trimmed text of the first choice.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// OpenAI-compatible chat-completions client (Groq by default).
/// One instance is built at startup and shared by every request.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, api_url: String) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            api_key,
            api_url,
        })
    }

    /// Makes a single call to the completions endpoint. No retries: any failure
    /// is returned to the caller as-is.
    pub async fn call(
        &self,
        model: &str,
        system: &str,
        user: &str,
        sampling: SamplingConfig,
    ) -> Result<ChatResponse, LlmError> {
        let request_body = build_request(model, system, user, sampling);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let chat_response: ChatResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat_response)
    }
}

#[async_trait]
impl ChatCompletion for LlmClient {
    async fn send_chat_completion(
        &self,
        model: &str,
        system: &str,
        user: &str,
        sampling: SamplingConfig,
    ) -> Result<String, LlmError> {
        let response = self.call(model, system, user, sampling).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::MissingContent)
    }
}

fn build_request<'a>(
    model: &'a str,
    system: &'a str,
    user: &'a str,
    sampling: SamplingConfig,
) -> ChatRequest<'a> {
    let mut messages = Vec::with_capacity(2);
    if !system.is_empty() {
        messages.push(ChatMessage {
            role: "system",
            content: system,
        });
    }
    messages.push(ChatMessage {
        role: "user",
        content: user,
    });

    ChatRequest {
        model,
        messages,
        temperature: sampling.temperature,
        max_tokens: sampling.max_tokens,
        top_p: sampling.top_p,
        stream: sampling.stream,
    }
}

/// Pulls `error.message` out of a provider error body, falling back to the raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}
