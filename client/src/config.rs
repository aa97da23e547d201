//! Configuration module for the taskdeck client.
//!
//! This module handles parsing configuration from environment variables.
//!
//! # Environment Variables
//!
//! | Variable | Required | Default | Description |
//! |----------|----------|---------|-------------|
//! | `TASKDECK_SERVER_URL` | Yes | - | Backend base URL (e.g., `http://localhost:8080/api`) |
//! | `TASKDECK_SESSION_PATH` | No | `~/.taskdeck` | Directory holding the cached session |
//! | `TASKDECK_TIMEOUT_SECS` | No | 30 | HTTP request timeout in seconds |
//!
//! # Example
//!
//! ```no_run
//! use taskdeck_client::config::Config;
//!
//! let config = Config::from_env().expect("Failed to load configuration");
//! println!("Server URL: {}", config.server_url);
//! ```

use std::env;
use std::path::PathBuf;

use directories::BaseDirs;
use thiserror::Error;

/// Default session directory name relative to home.
const DEFAULT_SESSION_DIR: &str = ".taskdeck";

/// Default HTTP request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors that can occur during configuration parsing.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable has an invalid value.
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to determine home directory.
    #[error("failed to determine home directory")]
    NoHomeDirectory,
}

/// Configuration for the taskdeck client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL (e.g., `http://localhost:8080/api`).
    pub server_url: String,

    /// Directory holding the cached session file.
    pub session_path: PathBuf,

    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
}

impl Config {
    /// Creates a new `Config` by parsing environment variables.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if:
    /// - `TASKDECK_SERVER_URL` is not set
    /// - `TASKDECK_TIMEOUT_SECS` is set but cannot be parsed as a positive integer
    /// - The home directory cannot be determined (needed for the default session path)
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_dirs = BaseDirs::new().ok_or(ConfigError::NoHomeDirectory)?;
        let home_dir = base_dirs.home_dir();

        // Required: TASKDECK_SERVER_URL
        let server_url = env::var("TASKDECK_SERVER_URL")
            .map_err(|_| ConfigError::MissingEnvVar("TASKDECK_SERVER_URL".to_string()))?;

        // Optional: TASKDECK_SESSION_PATH (default: ~/.taskdeck)
        let session_path = env::var("TASKDECK_SESSION_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home_dir.join(DEFAULT_SESSION_DIR));

        // Optional: TASKDECK_TIMEOUT_SECS (default: 30, must be > 0)
        let timeout_secs = match env::var("TASKDECK_TIMEOUT_SECS") {
            Ok(val) => {
                let secs = val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    key: "TASKDECK_TIMEOUT_SECS".to_string(),
                    message: format!("expected positive integer, got '{val}'"),
                })?;
                if secs == 0 {
                    return Err(ConfigError::InvalidValue {
                        key: "TASKDECK_TIMEOUT_SECS".to_string(),
                        message: "timeout must be at least 1 second".to_string(),
                    });
                }
                secs
            }
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            server_url,
            session_path,
            timeout_secs,
        })
    }
}
