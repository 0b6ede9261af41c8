//! LLM provider implementations.
//!
//! Contains the Gemini implementation of the [`LlmProvider`] trait defined
//! in `milan-core`, a factory ([`create_provider`]) that builds it from an
//! [`AppConfig`], and a connection test ([`test_provider_connection`]).
//!
//! [`LlmProvider`]: milan_core::llm::provider::LlmProvider

pub mod gemini;

use secrecy::SecretString;

use milan_core::llm::box_provider::BoxLlmProvider;
use milan_types::config::AppConfig;
use milan_types::llm::{CompletionRequest, GenerationConfig, LlmError, Message};

use self::gemini::GeminiProvider;

/// Create a [`BoxLlmProvider`] from the application config.
pub fn create_provider(config: &AppConfig, api_key: SecretString) -> Result<BoxLlmProvider, LlmError> {
    let mut provider = GeminiProvider::new(api_key, config.model.clone(), config.request_timeout())?;
    if let Some(base_url) = config.base_url.as_deref() {
        provider = provider.with_base_url(base_url.to_string());
    }
    Ok(BoxLlmProvider::new(provider))
}

/// Test provider connectivity by sending a minimal completion request.
///
/// Used by `milan check` to verify the API key and endpoint. Sends a tiny
/// "Hello" message with a minimal token budget.
pub async fn test_provider_connection(provider: &BoxLlmProvider) -> Result<(), LlmError> {
    let request = CompletionRequest {
        model: String::new(), // Provider uses its configured default
        messages: vec![Message::user("Hello")],
        system: None,
        generation: GenerationConfig {
            max_output_tokens: 10,
            temperature: 0.0,
            ..GenerationConfig::default()
        },
    };
    provider.complete(&request).await?;
    Ok(())
}
