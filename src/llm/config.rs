//! Backend configuration read from the environment

use super::{GeminiModel, GeminiService, LlmService, LoggingService};
use std::sync::Arc;
use thiserror::Error;

/// Startup configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GENAI_API_KEY env not set")]
    MissingApiKey,
    #[error("Unknown model '{0}'")]
    UnknownModel(String),
    #[error("Failed to create LLM service: {0}")]
    Service(#[from] super::LlmError),
}

/// Configuration for the generation backend
#[derive(Debug, Clone, Default)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    /// Gateway URL; when set the gateway authenticates and no key is needed
    pub gateway: Option<String>,
    /// Model ID, defaults to `gemini-1.5-flash`
    pub model: Option<String>,
}

impl LlmConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("GENAI_API_KEY").ok(),
            gateway: std::env::var("LLM_GATEWAY").ok(),
            model: std::env::var("COUNSELOR_MODEL").ok(),
        }
    }

    pub fn model(&self) -> Result<GeminiModel, ConfigError> {
        match self.model.as_deref() {
            None | Some("") => Ok(GeminiModel::default()),
            Some(id) => GeminiModel::from_id(id).ok_or_else(|| ConfigError::UnknownModel(id.to_string())),
        }
    }

    /// Build the logging-wrapped service described by this configuration
    pub fn build_service(&self) -> Result<Arc<dyn LlmService>, ConfigError> {
        let model = self.model()?;

        let api_key = if self.gateway.is_some() {
            String::new()
        } else {
            match self.api_key.as_deref() {
                Some(key) if !key.is_empty() => key.to_string(),
                _ => return Err(ConfigError::MissingApiKey),
            }
        };

        let service = GeminiService::new(api_key, model, self.gateway.as_deref())?;
        Ok(Arc::new(LoggingService::new(Arc::new(service))))
    }
}
