//! OpenAI-compatible chat-completions backend.
//!
//! Each operation is a single blocking request with a fixed model,
//! temperature, and token budget. There is no retry, backoff, or streaming;
//! the configured timeout is the only bound on a stalled upstream.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use mindmate_core::defaults::{
    CHAT_MAX_TOKENS, CHAT_TEMPERATURE, GEN_MODEL, GEN_TIMEOUT_SECS, OPENAI_BASE_URL,
    QUIZ_MAX_TOKENS, STRUCTURED_TEMPERATURE, SUMMARY_MAX_TOKENS,
};
use mindmate_core::{AiBackend, Error, Result};

use crate::prompts;

/// OpenAI-compatible generation backend.
pub struct OpenAiBackend {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout_secs: u64,
}

impl OpenAiBackend {
    /// Create a backend with explicit configuration.
    pub fn with_config(base_url: String, api_key: String, model: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        info!(
            subsystem = "ai",
            component = "openai",
            model = %model,
            base_url = %base_url,
            "Initializing OpenAI backend"
        );

        Self {
            client,
            base_url,
            api_key,
            model,
            timeout_secs,
        }
    }

    /// Create from environment variables.
    ///
    /// `OPENAI_API_KEY` is required; `OPENAI_BASE_URL`, `OPENAI_MODEL`, and
    /// `OPENAI_TIMEOUT_SECS` fall back to defaults.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| Error::Config("OPENAI_API_KEY is not set".to_string()))?;
        let base_url =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| OPENAI_BASE_URL.to_string());
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| GEN_MODEL.to_string());
        let timeout_secs = std::env::var("OPENAI_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(GEN_TIMEOUT_SECS);

        Ok(Self::with_config(base_url, api_key, model, timeout_secs))
    }

    /// The model this backend generates with.
    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// Internal generation method shared by all three operations.
    async fn generate_internal(
        &self,
        system: &str,
        prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String> {
        let start = Instant::now();

        debug!(
            subsystem = "ai",
            component = "openai",
            model = %self.model,
            prompt_len = prompt.len(),
            "Starting generation"
        );

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            max_tokens,
            temperature,
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .timeout(Duration::from_secs(self.timeout_secs))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Generation(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Generation(format!(
                "Upstream returned {}: {}",
                status, body
            )));
        }

        let result: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Generation(format!("Failed to parse response: {}", e)))?;

        let content = result
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::Generation("Upstream returned no choices".to_string()))?;

        let elapsed = start.elapsed().as_millis() as u64;
        debug!(
            subsystem = "ai",
            component = "openai",
            response_len = content.len(),
            duration_ms = elapsed,
            "Generation complete"
        );
        if elapsed > 30000 {
            warn!(
                subsystem = "ai",
                component = "openai",
                duration_ms = elapsed,
                prompt_len = prompt.len(),
                slow = true,
                "Slow generation operation"
            );
        }
        Ok(content)
    }
}

#[async_trait]
impl AiBackend for OpenAiBackend {
    async fn summarize(&self, content: &str, title: Option<&str>) -> Result<String> {
        let prompt = prompts::summary_prompt(content, title);
        self.generate_internal(
            prompts::SUMMARY_SYSTEM,
            &prompt,
            STRUCTURED_TEMPERATURE,
            SUMMARY_MAX_TOKENS,
        )
        .await
    }

    async fn quiz(&self, content: &str, title: Option<&str>) -> Result<String> {
        let prompt = prompts::quiz_prompt(content, title);
        self.generate_internal(
            prompts::QUIZ_SYSTEM,
            &prompt,
            STRUCTURED_TEMPERATURE,
            QUIZ_MAX_TOKENS,
        )
        .await
    }

    async fn chat(&self, message: &str, context: Option<&str>) -> Result<String> {
        let system = prompts::chat_system(context);
        self.generate_internal(&system, message, CHAT_TEMPERATURE, CHAT_MAX_TOKENS)
            .await
    }
}

/// Chat message for the completions API.
#[derive(Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Request payload for `/v1/chat/completions`.
#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

/// One completion choice.
#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Response from `/v1/chat/completions`.
#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_expected_fields() {
        let request = ChatCompletionRequest {
            model: "gpt-4o".to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "hello".to_string(),
            }],
            max_tokens: 500,
            temperature: 0.3,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"model\":\"gpt-4o\""));
        assert!(json.contains("\"max_tokens\":500"));
        assert!(json.contains("\"temperature\":0.3"));
    }

    #[test]
    fn test_response_parses_first_choice() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"A summary."}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content, "A summary.");
    }
}
