//! Application error type mapping to HTTP status codes and JSON bodies.
//!
//! Bodies are flat objects (`{"error": ...}`) because the chat widget reads
//! `error`, `retryAfter`, `status`, and `details` directly.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use folio_types::error::UpstreamError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// The gate secret is not configured (plain-text 500).
    GateMisconfigured,
    /// Missing or wrong `x-internal-secret` (plain-text 403).
    Forbidden,
    MethodNotAllowed,
    InvalidJson,
    MissingMessage,
    RateLimited { retry_after_secs: u64 },
    Upstream(UpstreamError),
}

impl From<UpstreamError> for AppError {
    fn from(e: UpstreamError) -> Self {
        AppError::Upstream(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::GateMisconfigured => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Server misconfiguration").into_response()
            }
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden").into_response(),
            AppError::MethodNotAllowed => {
                let mut response =
                    json_response(StatusCode::METHOD_NOT_ALLOWED, json!({ "error": "Method not allowed" }));
                response
                    .headers_mut()
                    .insert(header::ALLOW, HeaderValue::from_static("GET, POST"));
                response
            }
            AppError::InvalidJson => {
                json_response(StatusCode::BAD_REQUEST, json!({ "error": "Invalid JSON body" }))
            }
            AppError::MissingMessage => {
                json_response(StatusCode::BAD_REQUEST, json!({ "error": "Missing \"message\"" }))
            }
            AppError::RateLimited { retry_after_secs } => {
                let mut response = json_response(
                    StatusCode::TOO_MANY_REQUESTS,
                    json!({
                        "error": "Rate limit exceeded. Please wait and try again.",
                        "retryAfter": retry_after_secs,
                    }),
                );
                response
                    .headers_mut()
                    .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
                response
            }
            AppError::Upstream(UpstreamError::MissingCredential) => json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Server misconfigured" }),
            ),
            AppError::Upstream(UpstreamError::Status { status, details }) => json_response(
                StatusCode::BAD_GATEWAY,
                json!({ "error": "Upstream API error", "status": status, "details": details }),
            ),
            AppError::Upstream(UpstreamError::Transport(details)) => json_response(
                StatusCode::BAD_GATEWAY,
                json!({ "error": "Upstream API error", "status": null, "details": details }),
            ),
        }
    }
}

/// Serialize `body` with the given status and a JSON content type.
pub fn json_response(status: StatusCode, body: serde_json::Value) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        body.to_string(),
    )
        .into_response()
}

/// Body for panics caught by `CatchPanicLayer`.
pub fn panic_response(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(details = %details, "request handler panicked");

    json_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "Unexpected server error", "details": details }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn rate_limited_sets_retry_after() {
        let response = AppError::RateLimited { retry_after_secs: 42 }.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "42");
        let body = body_json(response).await;
        assert_eq!(body["retryAfter"], 42);
    }

    #[tokio::test]
    async fn transport_failure_has_null_status() {
        let response =
            AppError::from(UpstreamError::Transport("connection refused".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert!(body["status"].is_null());
        assert_eq!(body["details"], "connection refused");
    }

    #[tokio::test]
    async fn panic_payload_becomes_details() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Unexpected server error");
        assert_eq!(body["details"], "boom");
    }
}
