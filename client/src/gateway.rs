//! HTTP gateway for the taskdeck backend.
//!
//! This module wraps the backend's REST contract behind typed methods:
//!
//! - Connection pooling via reqwest, with a configurable request timeout
//! - Bearer-token attachment sourced from the [`SessionStore`]
//! - Central status mapping: 401 clears the durable session and surfaces
//!   [`ApiError::Unauthorized`]; other 4xx become [`ApiError::Validation`];
//!   5xx become [`ApiError::Server`]
//!
//! Authorization failures are handled here, at the gateway boundary,
//! regardless of which operation triggered them. Callers never see a
//! half-cleared session.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::time::Duration;
//! use taskdeck_client::gateway::Gateway;
//! use taskdeck_client::session::SessionStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let sessions = SessionStore::new(Path::new("/home/user/.taskdeck"));
//!     let gateway = Gateway::new(
//!         "http://localhost:8080/api",
//!         Duration::from_secs(30),
//!         sessions,
//!     );
//!
//!     let todos = gateway.fetch_todos().await.unwrap();
//!     println!("{} todos", todos.len());
//! }
//! ```

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::session::{SessionError, SessionStore};
use crate::types::{
    Credentials, LoginResponse, PriorityUpdate, RegisterResponse, Registration, Session,
    Suggestion, Todo, TodoDraft, TodoPatch,
};

/// Errors that can occur while talking to the backend.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure (connectivity, timeout, malformed body).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server rejected the bearer token (401). The cached session has
    /// already been cleared by the time this error is observed.
    #[error("authentication required: session is no longer valid")]
    Unauthorized,

    /// The server rejected the request (4xx other than 401).
    #[error("request rejected: {status} - {message}")]
    Validation { status: u16, message: String },

    /// The server failed to process the request (5xx).
    #[error("server error: {status} - {message}")]
    Server { status: u16, message: String },

    /// Session cache could not be read or written.
    #[error("session cache error: {0}")]
    Session(#[from] SessionError),

    /// The cached token cannot be used as a header value.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

/// Typed HTTP client for the backend's REST contract.
pub struct Gateway {
    base_url: String,
    client: Client,
    sessions: SessionStore,
}

impl Gateway {
    /// Creates a new gateway for the given base URL.
    ///
    /// # Arguments
    ///
    /// * `server_url` - Backend base URL; a trailing slash is tolerated
    /// * `timeout` - Per-request timeout
    /// * `sessions` - Session store used for token attachment and 401 handling
    #[must_use]
    pub fn new(server_url: impl Into<String>, timeout: Duration, sessions: SessionStore) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()
            .expect("Failed to create HTTP client");

        let mut base_url = server_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            base_url,
            client,
            sessions,
        }
    }

    /// Creates a gateway from parsed configuration.
    #[must_use]
    pub fn from_config(config: &Config, sessions: SessionStore) -> Self {
        Self::new(
            config.server_url.clone(),
            Duration::from_secs(config.timeout_secs),
            sessions,
        )
    }

    /// Returns the session store this gateway attaches tokens from.
    #[must_use]
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Builds the standard headers, attaching the bearer token when a
    /// session is cached.
    fn headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.sessions.token()? {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {token}"))?,
            );
        }

        Ok(headers)
    }

    /// Maps a response's status to the error taxonomy.
    ///
    /// A 401 clears the durable session before surfacing `Unauthorized`, so
    /// every operation funnels authorization failures through the same path.
    async fn check(&self, response: Response) -> Result<Response, ApiError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            warn!("Authorization failure, clearing cached session");
            if let Err(e) = self.sessions.clear() {
                warn!(error = %e, "Failed to clear session cache");
            }
            return Err(ApiError::Unauthorized);
        }

        let message = response.text().await.unwrap_or_default();

        if status.is_server_error() {
            error!(status = status.as_u16(), message = %message, "Server error");
            Err(ApiError::Server {
                status: status.as_u16(),
                message,
            })
        } else {
            debug!(status = status.as_u16(), message = %message, "Request rejected");
            Err(ApiError::Validation {
                status: status.as_u16(),
                message,
            })
        }
    }

    // -------------------------------------------------------------------------
    // Auth
    // -------------------------------------------------------------------------

    /// Logs in and caches the resulting session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, rejected credentials, or a
    /// session cache that cannot be written.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        let body = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response = self
            .client
            .post(self.url("/auth/login"))
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await?;
        let response = self.check(response).await?;

        let login: LoginResponse = response.json().await?;
        let session: Session = login.into();
        self.sessions.save(&session)?;

        info!(username = %session.username, "Logged in");
        Ok(session)
    }

    /// Registers a new account. The user logs in separately afterwards.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a rejected registration
    /// (e.g., username already taken).
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<String, ApiError> {
        let body = Registration {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .client
            .post(self.url("/auth/register"))
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await?;
        let response = self.check(response).await?;

        let registered: RegisterResponse = response.json().await?;
        info!(username, "Registered");
        Ok(registered.message)
    }

    // -------------------------------------------------------------------------
    // Todos
    // -------------------------------------------------------------------------

    /// Fetches the full todo set.
    pub async fn fetch_todos(&self) -> Result<Vec<Todo>, ApiError> {
        let response = self
            .client
            .get(self.url("/todos"))
            .headers(self.headers()?)
            .send()
            .await?;
        let response = self.check(response).await?;

        let todos: Vec<Todo> = response.json().await?;
        debug!(count = todos.len(), "Fetched todos");
        Ok(todos)
    }

    /// Creates a new todo and returns the server's representation.
    pub async fn create_todo(&self, draft: &TodoDraft) -> Result<Todo, ApiError> {
        let response = self
            .client
            .post(self.url("/todos"))
            .headers(self.headers()?)
            .json(draft)
            .send()
            .await?;
        let response = self.check(response).await?;

        let todo: Todo = response.json().await?;
        debug!(id = todo.id, "Created todo");
        Ok(todo)
    }

    /// Applies a partial update and returns the server's representation.
    pub async fn update_todo(&self, id: i64, patch: &TodoPatch) -> Result<Todo, ApiError> {
        let response = self
            .client
            .put(self.url(&format!("/todos/{id}")))
            .headers(self.headers()?)
            .json(patch)
            .send()
            .await?;
        let response = self.check(response).await?;

        let todo: Todo = response.json().await?;
        debug!(id = todo.id, "Updated todo");
        Ok(todo)
    }

    /// Flips the completion flag server-side and returns the updated todo.
    pub async fn toggle_todo(&self, id: i64) -> Result<Todo, ApiError> {
        let response = self
            .client
            .patch(self.url(&format!("/todos/{id}/toggle")))
            .headers(self.headers()?)
            .send()
            .await?;
        let response = self.check(response).await?;

        let todo: Todo = response.json().await?;
        debug!(id = todo.id, completed = todo.completed, "Toggled todo");
        Ok(todo)
    }

    /// Deletes a todo. The response carries no body.
    pub async fn delete_todo(&self, id: i64) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.url(&format!("/todos/{id}")))
            .headers(self.headers()?)
            .send()
            .await?;
        self.check(response).await?;

        debug!(id, "Deleted todo");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // AI
    // -------------------------------------------------------------------------

    /// Requests a server-computed priority ranking for the user's todos.
    ///
    /// An empty result is a valid response (no updates available), not an
    /// error.
    pub async fn prioritize(&self) -> Result<Vec<PriorityUpdate>, ApiError> {
        let response = self
            .client
            .post(self.url("/ai/prioritize"))
            .headers(self.headers()?)
            .send()
            .await?;
        let response = self.check(response).await?;

        let updates: Vec<PriorityUpdate> = response.json().await?;
        debug!(count = updates.len(), "Received priority updates");
        Ok(updates)
    }

    /// Requests a set of suggested tasks.
    pub async fn suggest(&self) -> Result<Vec<Suggestion>, ApiError> {
        let response = self
            .client
            .post(self.url("/ai/suggest"))
            .headers(self.headers()?)
            .send()
            .await?;
        let response = self.check(response).await?;

        let suggestions: Vec<Suggestion> = response.json().await?;
        debug!(count = suggestions.len(), "Received suggestions");
        Ok(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_gateway(base: &str) -> (Gateway, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let sessions = SessionStore::new(temp_dir.path());
        let gateway = Gateway::new(base, Duration::from_secs(5), sessions);
        (gateway, temp_dir)
    }

    #[test]
    fn test_url_joins_paths() {
        let (gateway, _dir) = create_test_gateway("http://localhost:8080/api");
        assert_eq!(gateway.url("/todos"), "http://localhost:8080/api/todos");
    }

    #[test]
    fn test_url_tolerates_trailing_slash() {
        let (gateway, _dir) = create_test_gateway("http://localhost:8080/api/");
        assert_eq!(
            gateway.url("/todos/3/toggle"),
            "http://localhost:8080/api/todos/3/toggle"
        );
    }

    #[test]
    fn test_headers_without_session_have_no_authorization() {
        let (gateway, _dir) = create_test_gateway("http://localhost:8080/api");
        let headers = gateway.headers().unwrap();

        assert!(headers.get(AUTHORIZATION).is_none());
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_headers_attach_cached_bearer_token() {
        let (gateway, _dir) = create_test_gateway("http://localhost:8080/api");
        let session = crate::types::Session {
            user_id: 1,
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            token: "tok-xyz".to_string(),
        };
        gateway.sessions().save(&session).unwrap();

        let headers = gateway.headers().unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer tok-xyz");
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Unauthorized;
        assert_eq!(
            err.to_string(),
            "authentication required: session is no longer valid"
        );

        let err = ApiError::Validation {
            status: 409,
            message: "username already exists".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "request rejected: 409 - username already exists"
        );

        let err = ApiError::Server {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "server error: 502 - bad gateway");
    }
}
