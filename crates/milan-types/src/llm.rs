//! LLM request/response types for Milan.
//!
//! These types model the data shapes for provider interactions: completion
//! requests, generation parameters, usage tracking, and error handling.
//! They are provider-agnostic; the Gemini wire format lives in milan-infra.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" | "bot" | "model" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single message in a conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Default cap on generated tokens per reply.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2048;
/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
/// Default nucleus sampling threshold.
pub const DEFAULT_TOP_P: f64 = 0.8;
/// Default top-k sampling cutoff.
pub const DEFAULT_TOP_K: u32 = 40;

/// Fixed generation parameters sent with every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_top_p")]
    pub top_p: f64,
    #[serde(default = "default_top_k")]
    pub top_k: u32,
}

fn default_max_output_tokens() -> u32 {
    DEFAULT_MAX_OUTPUT_TOKENS
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

fn default_top_p() -> f64 {
    DEFAULT_TOP_P
}

fn default_top_k() -> u32 {
    DEFAULT_TOP_K
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// Request to an LLM provider for a completion.
///
/// `messages` carries the full conversation history to date, ending with
/// the new user turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub generation: GenerationConfig,
}

/// Response from an LLM provider for a completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub content: String,
    pub model: String,
    pub finish_reason: FinishReason,
    pub usage: Usage,
}

/// Reason why the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    MaxTokens,
    Safety,
    Recitation,
    Other,
}

impl fmt::Display for FinishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinishReason::Stop => write!(f, "stop"),
            FinishReason::MaxTokens => write!(f, "max_tokens"),
            FinishReason::Safety => write!(f, "safety"),
            FinishReason::Recitation => write!(f, "recitation"),
            FinishReason::Other => write!(f, "other"),
        }
    }
}

impl FromStr for FinishReason {
    type Err = String;

    /// Accepts both the snake_case form and Gemini's SCREAMING_CASE form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stop" => Ok(FinishReason::Stop),
            "max_tokens" => Ok(FinishReason::MaxTokens),
            "safety" => Ok(FinishReason::Safety),
            "recitation" => Ok(FinishReason::Recitation),
            "other" | "finish_reason_unspecified" => Ok(FinishReason::Other),
            other => Err(format!("invalid finish reason: '{other}'")),
        }
    }
}

/// Token usage for a completion request/response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Errors from LLM provider operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("provider overloaded: {0}")]
    Overloaded(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("response was blocked: {0}")]
    Blocked(String),

    #[error("provider returned an empty response")]
    EmptyResponse,

    #[error("request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("request cancelled")]
    Cancelled,
}
