//! Remote conversation client.
//!
//! Holds the conversation history on the client side and retransmits it in
//! full with every turn, the way the hosted SDK's chat object does. Only
//! successful exchanges are retained; a failed turn leaves history untouched.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{Instrument, debug, info_span};

use milan_types::llm::{CompletionRequest, GenerationConfig, LlmError, Message};

use crate::llm::box_provider::BoxLlmProvider;

/// A stateful conversation with a remote model.
///
/// Callers must not run two `send_turn` calls concurrently; the session
/// manager guarantees this with its in-flight flag.
pub struct RemoteConversation {
    provider: BoxLlmProvider,
    model: String,
    generation: GenerationConfig,
    history: Mutex<Vec<Message>>,
}

impl RemoteConversation {
    pub fn new(provider: BoxLlmProvider, model: String, generation: GenerationConfig) -> Self {
        Self {
            provider,
            model,
            generation,
            history: Mutex::new(Vec::new()),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Snapshot of the retained history (includes any priming turn).
    pub fn history(&self) -> Vec<Message> {
        self.lock_history().clone()
    }

    /// Send one user turn and return the model's reply text.
    ///
    /// Blank replies are reported as [`LlmError::EmptyResponse`].
    pub async fn send_turn(&self, text: &str) -> Result<String, LlmError> {
        let request = self.build_request(text);

        let span = info_span!(
            "gen_ai.chat",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.generation.max_output_tokens,
            gen_ai.request.temperature = request.generation.temperature,
            history_len = request.messages.len() - 1,
        );

        let response = self.provider.complete(&request).instrument(span).await?;

        if response.content.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        debug!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            finish_reason = %response.finish_reason,
            "Turn completed"
        );

        let mut history = self.lock_history();
        history.push(Message::user(text));
        history.push(Message::assistant(response.content.clone()));

        Ok(response.content)
    }

    fn build_request(&self, text: &str) -> CompletionRequest {
        let mut messages = self.lock_history().clone();
        messages.push(Message::user(text));

        CompletionRequest {
            model: self.model.clone(),
            messages,
            system: None,
            generation: self.generation.clone(),
        }
    }

    fn lock_history(&self) -> MutexGuard<'_, Vec<Message>> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
