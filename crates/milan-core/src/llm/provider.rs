//! LlmProvider trait definition.
//!
//! This is the core abstraction that all LLM providers implement.

use milan_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for LLM provider backends (Gemini, test doubles).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). Wrap an
/// implementation in [`BoxLlmProvider`](super::box_provider::BoxLlmProvider)
/// when runtime dispatch is needed.
///
/// Implementations live in milan-infra (e.g., `GeminiProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
