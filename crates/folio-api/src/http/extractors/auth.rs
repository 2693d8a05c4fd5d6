//! Internal shared-secret gate.
//!
//! Callers must present the configured secret in the `x-internal-secret`
//! header. Both sides are SHA-256 hashed before comparison so the compare
//! runs over fixed-length digests in constant time.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

use crate::http::error::AppError;
use crate::state::AppState;

pub const INTERNAL_SECRET_HEADER: &str = "x-internal-secret";

/// Gate configuration held in [`AppState`].
pub struct InternalGate {
    secret: Option<SecretString>,
    allow_unauthenticated: bool,
}

impl InternalGate {
    pub fn new(secret: Option<SecretString>, allow_unauthenticated: bool) -> Self {
        Self {
            secret,
            allow_unauthenticated,
        }
    }

    pub fn allows_unauthenticated(&self) -> bool {
        self.allow_unauthenticated
    }

    /// Check a presented header value against the configured secret.
    pub fn verify(&self, presented: Option<&str>) -> Result<(), AppError> {
        if self.allow_unauthenticated {
            return Ok(());
        }
        let Some(expected) = self.secret.as_ref() else {
            tracing::error!("internal gate secret is not configured");
            return Err(AppError::GateMisconfigured);
        };
        match presented {
            Some(presented)
                if !presented.is_empty() && secrets_match(presented, expected.expose_secret()) =>
            {
                Ok(())
            }
            _ => {
                tracing::debug!("rejected request with missing or wrong internal secret");
                Err(AppError::Forbidden)
            }
        }
    }
}

/// Middleware rejecting requests that fail [`InternalGate::verify`].
pub async fn require_internal_secret(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get(INTERNAL_SECRET_HEADER)
        .and_then(|v| v.to_str().ok());

    match state.gate.verify(presented) {
        Ok(()) => next.run(request).await,
        Err(e) => e.into_response(),
    }
}

/// Constant-time equality over SHA-256 digests.
fn secrets_match(presented: &str, expected: &str) -> bool {
    let a = Sha256::digest(presented.as_bytes());
    let b = Sha256::digest(expected.as_bytes());
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
