//! Mock AI backend for deterministic testing.
//!
//! Provides fixed or per-input responses, an optional forced failure, and a
//! call log for assertions — no network access.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mindmate_ai::mock::MockAiBackend;
//!
//! let backend = MockAiBackend::new().with_fixed_response("Test summary");
//! let text = backend.summarize("note content", None).await.unwrap();
//! assert_eq!(text, "Test summary");
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use mindmate_core::{AiBackend, Error, Result};

/// Mock AI backend for testing.
#[derive(Clone)]
pub struct MockAiBackend {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Debug, Clone, Default)]
struct MockConfig {
    fixed_responses: HashMap<String, String>,
    default_response: String,
    fail: bool,
}

/// One recorded backend invocation.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub operation: String,
    pub input: String,
}

impl MockAiBackend {
    /// Create a new mock backend with a generic default response.
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig {
                default_response: "Mock response".to_string(),
                ..Default::default()
            }),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set a fixed response for all operations.
    pub fn with_fixed_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).default_response = response.into();
        self
    }

    /// Add a response mapping for a specific input.
    pub fn with_response_mapping(
        mut self,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Arc::make_mut(&mut self.config)
            .fixed_responses
            .insert(input.into(), output.into());
        self
    }

    /// Force every operation to fail with a generation error.
    pub fn with_failure(mut self) -> Self {
        Arc::make_mut(&mut self.config).fail = true;
        self
    }

    /// Get all logged calls for assertion.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Number of calls recorded for one operation.
    pub fn call_count(&self, operation: &str) -> usize {
        self.call_log
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    fn respond(&self, operation: &str, input: &str) -> Result<String> {
        self.call_log.lock().unwrap().push(MockCall {
            operation: operation.to_string(),
            input: input.to_string(),
        });

        if self.config.fail {
            return Err(Error::Generation("Mock backend failure".to_string()));
        }

        Ok(self
            .config
            .fixed_responses
            .get(input)
            .cloned()
            .unwrap_or_else(|| self.config.default_response.clone()))
    }
}

impl Default for MockAiBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiBackend for MockAiBackend {
    async fn summarize(&self, content: &str, _title: Option<&str>) -> Result<String> {
        self.respond("summarize", content)
    }

    async fn quiz(&self, content: &str, _title: Option<&str>) -> Result<String> {
        self.respond("quiz", content)
    }

    async fn chat(&self, message: &str, _context: Option<&str>) -> Result<String> {
        self.respond("chat", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_response_and_call_log() {
        let backend = MockAiBackend::new().with_fixed_response("A summary");

        let text = backend.summarize("content", Some("Title")).await.unwrap();
        assert_eq!(text, "A summary");
        assert_eq!(backend.call_count("summarize"), 1);
        assert_eq!(backend.get_calls()[0].input, "content");
    }

    #[tokio::test]
    async fn test_response_mapping_wins_over_default() {
        let backend = MockAiBackend::new()
            .with_fixed_response("default")
            .with_response_mapping("special", "mapped");

        assert_eq!(backend.chat("special", None).await.unwrap(), "mapped");
        assert_eq!(backend.chat("other", None).await.unwrap(), "default");
    }

    #[tokio::test]
    async fn test_forced_failure() {
        let backend = MockAiBackend::new().with_failure();
        let err = backend.quiz("content", None).await.unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
        // Calls are still logged on failure
        assert_eq!(backend.call_count("quiz"), 1);
    }
}
