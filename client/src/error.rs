//! Error types for the taskdeck client.
//!
//! Each module defines its own error enum; this module aggregates them into
//! the crate-level [`ClientError`] used at the application boundary.

use thiserror::Error;

use crate::ai::AiError;
use crate::config::ConfigError;
use crate::gateway::ApiError;
use crate::session::SessionError;
use crate::store::StoreError;

/// Errors that can occur during client operations.
///
/// This is the primary error type for the crate, encompassing all failure
/// modes of configuration, session caching, the API gateway, the todo
/// store, and the AI adapter.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Configuration-related error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Session cache error.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// Backend communication error.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Todo store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// AI adapter error.
    #[error("AI error: {0}")]
    Ai(#[from] AiError),
}

/// A specialized `Result` type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
