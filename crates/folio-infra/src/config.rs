//! Configuration loader for Folio.
//!
//! Reads `folio.toml` (or the path given on the command line / in
//! `FOLIO_CONFIG`) and deserializes it into [`FolioConfig`]. Falls back to
//! defaults when the file is missing, malformed, or fails validation.

use std::path::{Path, PathBuf};

use folio_types::config::FolioConfig;
use folio_types::error::ConfigError;

/// Environment variable overriding the config path.
pub const CONFIG_ENV: &str = "FOLIO_CONFIG";

/// Config file used when neither the CLI nor the environment names one.
pub const DEFAULT_CONFIG_FILE: &str = "folio.toml";

/// Pick the config path.
///
/// Priority:
/// 1. Explicit path (CLI flag)
/// 2. `FOLIO_CONFIG`
/// 3. `folio.toml` in the working directory
pub fn resolve_config_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| {
            std::env::var(CONFIG_ENV)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Read, parse, and validate the config at `path`.
///
/// A missing file is not an error here; it yields the defaults.
pub async fn try_load_config(path: &Path) -> Result<FolioConfig, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config found at {}, using defaults", path.display());
            return Ok(FolioConfig::default());
        }
        Err(err) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                message: err.to_string(),
            });
        }
    };

    let config: FolioConfig = toml::from_str(&content).map_err(|err| ConfigError::Invalid {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    validate(path, &config)?;
    Ok(config)
}

/// Load the config, logging a warning and returning defaults on any error.
pub async fn load_config(path: &Path) -> FolioConfig {
    match try_load_config(path).await {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            FolioConfig::default()
        }
    }
}

fn validate(path: &Path, config: &FolioConfig) -> Result<(), ConfigError> {
    let invalid = |message: &str| ConfigError::Invalid {
        path: path.display().to_string(),
        message: message.to_string(),
    };

    if config.rate_limit.window_secs == 0 {
        return Err(invalid("rate_limit.window_secs must be greater than 0"));
    }
    if config.rate_limit.max_requests == 0 {
        return Err(invalid("rate_limit.max_requests must be greater than 0"));
    }
    if config.rate_limit.session_cookie.trim().is_empty() {
        return Err(invalid("rate_limit.session_cookie must not be empty"));
    }
    if config.upstream.base_url.trim().is_empty() {
        return Err(invalid("upstream.base_url must not be empty"));
    }
    Ok(())
}
