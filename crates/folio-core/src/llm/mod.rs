//! Upstream completion abstraction.
//!
//! `CompletionClient` is the port the chat service calls; concrete clients
//! (e.g., OpenRouter) live in folio-infra.

pub mod client;
