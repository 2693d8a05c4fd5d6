//! Chat-completion client implementations.
//!
//! Contains concrete implementations of the [`CompletionClient`] trait
//! defined in `folio-core`.
//!
//! [`CompletionClient`]: folio_core::llm::client::CompletionClient

pub mod openrouter;
