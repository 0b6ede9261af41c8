//! GeminiProvider -- concrete [`LlmProvider`] implementation for Google Gemini.
//!
//! Sends requests to `POST {base}/v1beta/models/{model}:generateContent`
//! with the key in the `x-goog-api-key` header. The full conversation is in
//! every request body; the endpoint itself is stateless.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use milan_core::llm::provider::LlmProvider;
use milan_types::llm::{
    CompletionRequest, CompletionResponse, FinishReason, LlmError, MessageRole, Usage,
};

use super::types::{
    GeminiContent, GeminiErrorEnvelope, GeminiGenerationConfig, GeminiPart, GeminiRequest,
    GeminiResponse,
};

/// Public Gemini endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Google Gemini LLM provider.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider.
    ///
    /// `timeout` bounds each HTTP request; the session applies its own
    /// timeout on top of this.
    pub fn new(api_key: SecretString, model: String, timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model,
        })
    }

    /// The default model for this provider.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn url(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }

    /// Convert a generic [`CompletionRequest`] into a [`GeminiRequest`].
    fn to_gemini_request(request: &CompletionRequest) -> GeminiRequest {
        let contents = request
            .messages
            .iter()
            .map(|m| GeminiContent {
                role: Some(
                    match m.role {
                        MessageRole::User => "user",
                        MessageRole::Assistant => "model",
                    }
                    .to_string(),
                ),
                parts: vec![GeminiPart {
                    text: m.content.clone(),
                }],
            })
            .collect();

        let system_instruction = request.system.as_ref().map(|s| GeminiContent {
            role: None,
            parts: vec![GeminiPart { text: s.clone() }],
        });

        GeminiRequest {
            contents,
            system_instruction,
            generation_config: GeminiGenerationConfig {
                max_output_tokens: request.generation.max_output_tokens,
                temperature: request.generation.temperature,
                top_p: request.generation.top_p,
                top_k: request.generation.top_k,
            },
        }
    }

    /// Map a parsed response into a [`CompletionResponse`].
    fn to_completion(response: GeminiResponse, model: &str) -> Result<CompletionResponse, LlmError> {
        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
        {
            return Err(LlmError::Blocked(reason));
        }

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or(LlmError::EmptyResponse)?;

        let finish_reason = candidate
            .finish_reason
            .as_deref()
            .map(|r| r.parse().unwrap_or(FinishReason::Other))
            .unwrap_or(FinishReason::Stop);

        let content: String = candidate
            .content
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        if content.is_empty() && finish_reason == FinishReason::Safety {
            return Err(LlmError::Blocked("SAFETY".to_string()));
        }

        let usage = response.usage_metadata.unwrap_or_default();

        Ok(CompletionResponse {
            id: response.response_id,
            content,
            model: response.model_version.unwrap_or_else(|| model.to_string()),
            finish_reason,
            usage: Usage {
                input_tokens: usage.prompt_token_count,
                output_tokens: usage.candidates_token_count,
            },
        })
    }

    fn status_error(status: u16, retry_after: Option<&str>, body: &str) -> LlmError {
        let message = serde_json::from_str::<GeminiErrorEnvelope>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| body.to_string());

        match status {
            400 => LlmError::InvalidRequest(message),
            401 | 403 => LlmError::AuthenticationFailed,
            429 => LlmError::RateLimited {
                retry_after_ms: retry_after
                    .and_then(|v| v.trim().parse::<u64>().ok())
                    .map(|secs| secs * 1000),
            },
            503 | 529 => LlmError::Overloaded(message),
            _ => LlmError::Provider {
                message: format!("HTTP {status}: {message}"),
            },
        }
    }
}

// GeminiProvider does not derive Debug; the HTTP client and key stay out of logs.

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let model = if request.model.is_empty() {
            self.model.as_str()
        } else {
            request.model.as_str()
        };
        let body = Self::to_gemini_request(request);

        let response = self
            .client
            .post(self.url(model))
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let error_body = response.text().await.unwrap_or_default();
            return Err(Self::status_error(
                status.as_u16(),
                retry_after.as_deref(),
                &error_body,
            ));
        }

        let gemini_resp: GeminiResponse = response.json().await.map_err(|e| {
            LlmError::Deserialization(format!("failed to parse response: {e}"))
        })?;

        Self::to_completion(gemini_resp, model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use milan_types::llm::{GenerationConfig, Message};

    fn make_provider() -> GeminiProvider {
        GeminiProvider::new(
            SecretString::from("test-key-not-real"),
            "gemini-2.0-flash-lite".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn parse(body: &str) -> GeminiResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(make_provider().name(), "gemini");
    }

    #[test]
    fn test_url_and_base_url_override() {
        let provider = make_provider();
        assert_eq!(
            provider.url("gemini-2.0-flash-lite"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash-lite:generateContent"
        );

        let provider = provider.with_base_url("http://localhost:8080/".to_string());
        assert_eq!(
            provider.url("m"),
            "http://localhost:8080/v1beta/models/m:generateContent"
        );
    }

    #[test]
    fn test_to_gemini_request_maps_roles_and_config() {
        let request = CompletionRequest {
            model: "m".to_string(),
            messages: vec![
                Message::user("persona"),
                Message::assistant("ok"),
                Message::user("hi"),
            ],
            system: Some("Be brief".to_string()),
            generation: GenerationConfig::default(),
        };

        let req = GeminiProvider::to_gemini_request(&request);
        let roles: Vec<&str> = req
            .contents
            .iter()
            .map(|c| c.role.as_deref().unwrap())
            .collect();
        assert_eq!(roles, vec!["user", "model", "user"]);
        assert_eq!(req.contents[2].parts[0].text, "hi");
        assert_eq!(
            req.system_instruction.unwrap().parts[0].text,
            "Be brief"
        );
        assert_eq!(req.generation_config.max_output_tokens, 2048);
        assert_eq!(req.generation_config.top_k, 40);
    }

    #[test]
    fn test_to_completion_joins_parts() {
        let resp = parse(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Yeah, "},{"text":"LLM stuff."}]},"finishReason":"STOP"}],
                "usageMetadata":{"promptTokenCount":100,"candidatesTokenCount":6}}"#,
        );
        let completion = GeminiProvider::to_completion(resp, "m").unwrap();
        assert_eq!(completion.content, "Yeah, LLM stuff.");
        assert_eq!(completion.finish_reason, FinishReason::Stop);
        assert_eq!(completion.model, "m");
        assert_eq!(completion.usage.input_tokens, 100);
        assert_eq!(completion.usage.output_tokens, 6);
    }

    #[test]
    fn test_to_completion_blocked_prompt() {
        let resp = parse(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#);
        let err = GeminiProvider::to_completion(resp, "m").unwrap_err();
        assert!(matches!(err, LlmError::Blocked(reason) if reason == "SAFETY"));
    }

    #[test]
    fn test_to_completion_no_candidates() {
        let err = GeminiProvider::to_completion(parse("{}"), "m").unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse));
    }

    #[test]
    fn test_to_completion_safety_stop_without_text() {
        let resp = parse(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#);
        let err = GeminiProvider::to_completion(resp, "m").unwrap_err();
        assert!(matches!(err, LlmError::Blocked(_)));
    }

    #[test]
    fn test_status_error_mapping() {
        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        assert!(matches!(
            GeminiProvider::status_error(400, None, body),
            LlmError::InvalidRequest(m) if m == "API key not valid"
        ));
        assert!(matches!(
            GeminiProvider::status_error(403, None, ""),
            LlmError::AuthenticationFailed
        ));
        assert!(matches!(
            GeminiProvider::status_error(429, Some("7"), ""),
            LlmError::RateLimited {
                retry_after_ms: Some(7000)
            }
        ));
        assert!(matches!(
            GeminiProvider::status_error(503, None, "busy"),
            LlmError::Overloaded(_)
        ));
        assert!(matches!(
            GeminiProvider::status_error(500, None, "oops"),
            LlmError::Provider { message } if message == "HTTP 500: oops"
        ));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_provider_error() {
        let provider = make_provider().with_base_url("http://127.0.0.1:1".to_string());
        let request = CompletionRequest {
            model: String::new(),
            messages: vec![Message::user("hi")],
            system: None,
            generation: GenerationConfig::default(),
        };
        let err = provider.complete(&request).await.unwrap_err();
        assert!(matches!(err, LlmError::Provider { .. }));
    }
}
