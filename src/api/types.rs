//! API request and response types

use serde::{Deserialize, Serialize};

/// Request to send a chat message.
///
/// Both fields are optional at the serde level so that a missing field is
/// reported with the service's own error body.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    pub user_id: Option<String>,
    pub message: Option<String>,
}

/// Request to reset a user's session
#[derive(Debug, Default, Deserialize)]
pub struct ResetRequest {
    pub user_id: Option<String>,
}

/// Response for a chat message
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
    pub user_id: String,
}

/// Response for a reset
#[derive(Debug, Serialize, Deserialize)]
pub struct ResetResponse {
    pub user_id: String,
    pub reset: bool,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            user_id: None,
        }
    }

    pub fn for_user(message: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            user_id: Some(user_id.into()),
        }
    }
}
