//! Secret resolution.
//!
//! Folio reads its two secrets (the upstream API key and the internal gate
//! token) from environment variables only. Values are wrapped in
//! [`secrecy::SecretString`] as soon as they are read.

pub mod env;

pub use env::{EnvSecretProvider, INTERNAL_TOKEN_ENV, OPENROUTER_KEY_ENV, Secrets};
