use thiserror::Error;

/// Errors from the upstream chat-completion provider.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream credential is not configured")]
    MissingCredential,

    #[error("upstream request failed: {0}")]
    Transport(String),

    #[error("upstream returned HTTP {status}")]
    Status { status: u16, details: String },
}

/// Errors from reading portfolio content.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content not found: {0}")]
    NotFound(String),

    #[error("failed to read content: {0}")]
    Io(String),

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {message}")]
    Read { path: String, message: String },

    #[error("invalid config {path}: {message}")]
    Invalid { path: String, message: String },
}
