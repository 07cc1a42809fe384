//! Mock implementations for testing
//!
//! These mocks enable driving the counselor without a real backend.

use crate::generator::Generator;
use crate::llm::LlmError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Mock generator that returns queued outputs in order
pub struct MockGenerator {
    outputs: Mutex<VecDeque<Result<String, LlmError>>>,
    delay: Option<Duration>,
    /// Record of all prompts received
    pub prompts: Mutex<Vec<String>>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self {
            outputs: Mutex::new(VecDeque::new()),
            delay: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Sleep before answering, to widen race windows in concurrency tests
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new()
        }
    }

    /// Queue a successful generation
    pub fn queue_text(&self, text: impl Into<String>) {
        self.outputs.lock().unwrap().push_back(Ok(text.into()));
    }

    /// Queue a failed generation
    pub fn queue_error(&self, error: LlmError) {
        self.outputs.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded prompts
    pub fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outputs
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock output queued")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_generator() {
        let mock = MockGenerator::new();
        mock.queue_text("Hello");

        assert_eq!(mock.generate("first").await.unwrap(), "Hello");

        // Second call should fail (no more outputs)
        assert!(mock.generate("second").await.is_err());
        assert_eq!(mock.recorded_prompts(), vec!["first", "second"]);
    }
}
