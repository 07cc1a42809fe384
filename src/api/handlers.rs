//! HTTP request handlers

use super::types::{ChatRequest, ChatResponse, ErrorResponse, ResetRequest, ResetResponse};
use super::AppState;
use crate::runtime::CounselError;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/reset", post(reset_session))
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Chat
// ============================================================

async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    // Validation happens before the store is touched
    let user_id = non_empty(req.user_id).ok_or_else(|| AppError::BadRequest("user_id is required".to_string()))?;
    let message = non_empty(req.message).ok_or_else(|| AppError::BadRequest("Message is required".to_string()))?;

    let reply = state
        .counselor
        .handle_message(&user_id, &message)
        .await
        .map_err(|error| AppError::Counsel {
            user_id: user_id.clone(),
            error,
        })?;
    tracing::debug!(user_id = %user_id, state = %reply.state, "Chat reply sent");

    Ok(Json(ChatResponse {
        message: reply.message,
        user_id,
    }))
}

// ============================================================
// Session reset
// ============================================================

async fn reset_session(
    State(state): State<AppState>,
    payload: Result<Json<ResetRequest>, JsonRejection>,
) -> Result<Json<ResetResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let user_id = non_empty(req.user_id).ok_or_else(|| AppError::BadRequest("user_id is required".to_string()))?;

    state.counselor.reset(&user_id).await;

    Ok(Json(ResetResponse {
        user_id,
        reset: true,
    }))
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> impl IntoResponse {
    env!("CARGO_PKG_VERSION")
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    Counsel { user_id: String, error: CounselError },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(msg))).into_response()
            }
            AppError::Counsel { user_id, error } => {
                let status = if error.is_unknown_state() {
                    StatusCode::BAD_REQUEST
                } else {
                    tracing::error!(user_id = %user_id, error = %error, "Chat request failed");
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                (status, Json(ErrorResponse::for_user(error.to_string(), user_id))).into_response()
            }
        }
    }
}
