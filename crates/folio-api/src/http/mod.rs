//! HTTP layer for Folio.
//!
//! Routes: `/api/chat` (POST chat, GET liveness) and `/health`.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
