//! Chat pipeline logic and port traits for Folio.
//!
//! This crate defines the "ports" (`ContentStore`, `CompletionClient`) that the
//! infrastructure layer implements, plus the pieces of the request pipeline
//! that need no I/O of their own: rate limiting, scope classification,
//! context caching, and prompt assembly. It depends only on `folio-types`.

pub mod chat;
pub mod clock;
pub mod context;
pub mod llm;
pub mod prompt;
pub mod rate_limit;
pub mod scope;
