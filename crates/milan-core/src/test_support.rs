//! Scripted provider double shared by the unit tests in this crate.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use milan_types::llm::{
    CompletionRequest, CompletionResponse, FinishReason, LlmError, Usage,
};

use crate::llm::provider::LlmProvider;

#[derive(Debug, Clone)]
enum Step {
    Reply(String),
    Fail(String),
}

#[derive(Default)]
struct Inner {
    script: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<CompletionRequest>>,
    delay: Mutex<Duration>,
}

/// Replays queued replies/failures in order, then answers "ok" forever.
#[derive(Clone, Default)]
pub struct ScriptedProvider {
    inner: Arc<Inner>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: &str) -> Self {
        self.push(Step::Reply(text.to_string()));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.push(Step::Fail(message.to_string()));
        self
    }

    pub fn with_delay(self, delay: Duration) -> Self {
        *self.inner.delay.lock().unwrap() = delay;
        self
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.inner.requests.lock().unwrap().clone()
    }

    fn push(&self, step: Step) {
        self.inner.script.lock().unwrap().push_back(step);
    }
}

impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.inner.requests.lock().unwrap().push(request.clone());

        let delay = *self.inner.delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let step = self
            .inner
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Step::Reply("ok".to_string()));

        match step {
            Step::Reply(content) => Ok(CompletionResponse {
                id: None,
                content,
                model: request.model.clone(),
                finish_reason: FinishReason::Stop,
                usage: Usage {
                    input_tokens: 10,
                    output_tokens: 5,
                },
            }),
            Step::Fail(message) => Err(LlmError::Provider { message }),
        }
    }
}
