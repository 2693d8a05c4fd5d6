//! Chat endpoint.
//!
//! - `POST /api/chat` `{ "message": "...", "history": [...] }` runs the chat
//!   pipeline and answers `{ "inScope": bool, "reply": "..." }`
//! - `GET /api/chat` liveness probe, `{ "ok": true }`
//! - any other method: 405
//!
//! The body is parsed by hand rather than with the `Json` extractor so that
//! malformed input maps to the documented error bodies.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde_json::Value;

use folio_core::chat::service::ChatOutcome;
use folio_types::chat::{ChatReply, ChatTurn};

use crate::http::error::AppError;
use crate::http::extractors::client::Client;
use crate::state::AppState;

/// POST /api/chat
pub async fn chat(
    State(state): State<AppState>,
    Client(key): Client,
    body: Bytes,
) -> Result<Json<ChatReply>, AppError> {
    let body: Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(error = %e, "rejecting chat request with invalid JSON");
        AppError::InvalidJson
    })?;

    let message = body
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .ok_or(AppError::MissingMessage)?;
    let history = ChatTurn::history_from_value(body.get("history"));

    match state.chat_service.handle(&key, message, history).await? {
        ChatOutcome::RateLimited { retry_after_secs } => {
            Err(AppError::RateLimited { retry_after_secs })
        }
        ChatOutcome::OutOfScope(reply) | ChatOutcome::Answered(reply) => Ok(Json(reply)),
    }
}

/// GET /api/chat
pub async fn ping() -> Json<Value> {
    Json(serde_json::json!({ "ok": true }))
}

/// Fallback for unsupported methods on /api/chat.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
