//! Generation client
//!
//! Turns a prompt into counselor-voiced text using the configured LLM
//! service, the fixed persona and the fixed temperature.

use crate::llm::{LlmError, LlmRequest, LlmService};
use crate::system_prompt::{COUNSELOR_PERSONA, COUNSELOR_TEMPERATURE};
use async_trait::async_trait;
use std::sync::Arc;

/// Produces text for a prompt
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl<T: Generator + ?Sized> Generator for Arc<T> {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        (**self).generate(prompt).await
    }
}

/// Generator backed by an [`LlmService`] with the counselor persona
pub struct CounselorGenerator {
    llm: Arc<dyn LlmService>,
    persona: String,
    temperature: f32,
}

impl CounselorGenerator {
    pub fn new(llm: Arc<dyn LlmService>) -> Self {
        Self {
            llm,
            persona: COUNSELOR_PERSONA.to_string(),
            temperature: COUNSELOR_TEMPERATURE,
        }
    }

    fn request(&self, prompt: &str) -> LlmRequest {
        LlmRequest::prompt(prompt)
            .with_system(self.persona.clone())
            .with_temperature(self.temperature)
    }
}

#[async_trait]
impl Generator for CounselorGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self.llm.complete(&self.request(prompt)).await?;
        let text = response.text.trim();
        if text.is_empty() {
            return Err(LlmError::malformed(format!(
                "Empty generation from {}",
                self.llm.model_id()
            )));
        }
        Ok(text.to_string())
    }
}
