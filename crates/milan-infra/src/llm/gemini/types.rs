//! Gemini `generateContent` API types.
//!
//! These are Gemini-specific request/response structures used for HTTP
//! communication. They are NOT the generic LLM types from milan-types --
//! those are provider-agnostic.

use serde::{Deserialize, Serialize};

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<GeminiContent>,
    pub generation_config: GeminiGenerationConfig,
}

/// One turn of the conversation. Roles are `user` or `model`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    pub max_output_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
}

/// Response body for `generateContent`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    pub usage_metadata: Option<GeminiUsage>,
    #[serde(default)]
    pub prompt_feedback: Option<GeminiPromptFeedback>,
    #[serde(default)]
    pub model_version: Option<String>,
    #[serde(default)]
    pub response_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: Option<GeminiContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiUsage {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiPromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Error envelope returned with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiErrorEnvelope {
    pub error: GeminiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiErrorBody {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_camel_case() {
        let req = GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: "hi".to_string(),
                }],
            }],
            system_instruction: None,
            generation_config: GeminiGenerationConfig {
                max_output_tokens: 2048,
                temperature: 0.7,
                top_p: 0.8,
                top_k: 40,
            },
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 2048);
        assert_eq!(json["generationConfig"]["topK"], 40);
        assert!(json.get("systemInstruction").is_none());
    }

    #[test]
    fn test_response_deserializes() {
        let body = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Yeah, "}, {"text": "mechatronics."}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 4, "totalTokenCount": 16},
            "modelVersion": "gemini-2.0-flash-lite",
            "responseId": "abc"
        }"#;
        let resp: GeminiResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.candidates.len(), 1);
        let parts = &resp.candidates[0].content.as_ref().unwrap().parts;
        assert_eq!(parts.len(), 2);
        assert_eq!(resp.candidates[0].finish_reason.as_deref(), Some("STOP"));
        assert_eq!(resp.usage_metadata.unwrap().candidates_token_count, 4);
    }

    #[test]
    fn test_blocked_response_deserializes() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let resp: GeminiResponse = serde_json::from_str(body).unwrap();
        assert!(resp.candidates.is_empty());
        assert_eq!(
            resp.prompt_feedback.unwrap().block_reason.as_deref(),
            Some("SAFETY")
        );
    }
}
