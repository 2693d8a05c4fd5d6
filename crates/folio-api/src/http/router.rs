//! Axum router configuration with middleware.
//!
//! Middleware, outermost first: panic catcher, request tracing, CORS. The
//! internal secret gate wraps POST and the 405 fallback of `/api/chat`; the
//! GET liveness probe and `/health` are open.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::middleware;
use axum::routing::{get, post};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::error::panic_response;
use crate::http::extractors::auth::require_internal_secret;
use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let gated_chat = post(handlers::chat::chat)
        .fallback(handlers::chat::method_not_allowed)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_internal_secret,
        ));

    let routes = Router::new()
        .route("/api/chat", get(handlers::chat::ping).merge(gated_chat))
        .route("/health", get(health_check));

    with_middleware(routes).with_state(state)
}

fn with_middleware<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %uuid::Uuid::now_v7(),
        )
    });

    router
        .layer(cors)
        .layer(trace)
        .layer(CatchPanicLayer::custom(panic_response))
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
