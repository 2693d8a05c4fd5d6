//! Shared domain types for Folio.
//!
//! This crate contains the types passed between the chat pipeline layers:
//! chat turns, portfolio content records, configuration, and error enums.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod content;
pub mod error;
