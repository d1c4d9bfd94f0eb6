//! Configuration management for scrobcli.
//!
//! This module loads configuration values from environment variables and an
//! optional `.env` file and collects them into an explicit [`Config`] value
//! that is handed to each component at construction time.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use crate::error::{Result, ScrobbleError};

pub const DEFAULT_API_URL: &str = "https://ws.audioscrobbler.com/2.0/";
pub const DEFAULT_AUTH_URL: &str = "https://www.last.fm/api/auth/";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file lives in the platform-specific local data directory under
/// `scrobcli/.env`:
/// - Linux: `~/.local/share/scrobcli/.env`
/// - macOS: `~/Library/Application Support/scrobcli/.env`
/// - Windows: `%LOCALAPPDATA%/scrobcli/.env`
///
/// A missing `.env` file is not an error; variables already present in the
/// process environment still apply.
///
/// # Errors
///
/// Returns [`ScrobbleError::Config`] if the directory cannot be created or an
/// existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<()> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| ScrobbleError::Config(e.to_string()))?;
    }

    if !path.is_file() {
        log::debug!("No .env file at {}", path.display());
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| ScrobbleError::Config(e.to_string()))?;
    Ok(())
}

/// Returns `<data_local_dir>/scrobcli`, falling back to the working directory.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("scrobcli");
    path
}

/// Explicit runtime configuration shared by the API client, auth flow and
/// credential store.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_secret: String,
    pub api_url: String,
    pub auth_url: String,
    pub credentials_path: PathBuf,
    pub request_timeout: Duration,
}

impl Config {
    /// Builds a configuration with default endpoints and storage location.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            api_url: DEFAULT_API_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            credentials_path: data_dir().join("credentials.json"),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `LASTFM_API_KEY` - Application key (required)
    /// - `LASTFM_API_SECRET` - Shared secret used for signing (required)
    /// - `LASTFM_API_URL` - API endpoint
    /// - `LASTFM_AUTH_URL` - Browser authorization page
    /// - `SCROBCLI_CREDENTIALS` - Path of the credential file
    /// - `SCROBCLI_REQUEST_TIMEOUT_SECS` - Network timeout in seconds
    ///
    /// # Errors
    ///
    /// Returns [`ScrobbleError::Config`] naming the first missing required
    /// variable, or a timeout that is not a positive integer.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new(required("LASTFM_API_KEY")?, required("LASTFM_API_SECRET")?);

        if let Some(url) = optional("LASTFM_API_URL") {
            config.api_url = url;
        }
        if let Some(url) = optional("LASTFM_AUTH_URL") {
            config.auth_url = url;
        }
        if let Some(path) = optional("SCROBCLI_CREDENTIALS") {
            config.credentials_path = PathBuf::from(path);
        }
        if let Some(secs) = optional("SCROBCLI_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().ok().filter(|s| *s > 0).ok_or_else(|| {
                ScrobbleError::Config(format!(
                    "SCROBCLI_REQUEST_TIMEOUT_SECS must be a positive integer, got {secs:?}"
                ))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = path.into();
        self
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }
}

fn required(name: &str) -> Result<String> {
    optional(name).ok_or_else(|| ScrobbleError::Config(format!("{name} must be set")))
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
