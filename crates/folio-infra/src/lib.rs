//! Infrastructure layer for Folio.
//!
//! Contains implementations of the ports defined in `folio-core`: the
//! OpenRouter chat-completion client, the filesystem content store, the TOML
//! config loader, and environment secret lookup.

pub mod config;
pub mod content;
pub mod llm;
pub mod secret;
