//! Durable session cache for the taskdeck client.
//!
//! The authenticated user's token and profile are stored as JSON in the
//! taskdeck directory (`~/.taskdeck/` by default):
//!
//! - `session.json`: serialized [`Session`] (file mode 0600)
//!
//! The cache is created on successful login, read at application start, and
//! destroyed on logout or on any authorization failure reported by the
//! gateway. A cache that fails to parse is discarded rather than surfaced:
//! the user simply has to log in again.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use taskdeck_client::session::SessionStore;
//! use taskdeck_client::types::Session;
//!
//! let store = SessionStore::new(Path::new("/home/user/.taskdeck"));
//! let session = Session {
//!     user_id: 1,
//!     username: "ada".to_string(),
//!     email: "ada@example.com".to_string(),
//!     token: "tok-1".to_string(),
//! };
//! store.save(&session).unwrap();
//! assert!(store.exists());
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, warn};

use crate::types::Session;

/// Session cache filename.
const SESSION_FILE: &str = "session.json";

/// Errors that can occur during session cache operations.
#[derive(Error, Debug)]
pub enum SessionError {
    /// I/O error during session file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Session serialization failed.
    #[error("session serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// File-backed store for the authenticated session.
///
/// Cloning is cheap; every clone operates on the same directory, so a clone
/// held by the gateway can clear the cache that the application loaded at
/// startup.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Creates a store rooted at the given directory.
    ///
    /// The directory is created lazily on the first [`save`](Self::save).
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the path of the session file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    /// Returns `true` if a cached session file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path().is_file()
    }

    /// Loads the cached session, if any.
    ///
    /// Returns `Ok(None)` when no session is cached. A file that exists but
    /// fails to parse is removed and treated as absent, so a corrupt cache
    /// never wedges the client.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the file exists but cannot be read, or if
    /// removing a corrupt file fails.
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        let path = self.path();
        if !path.is_file() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)?;
        match serde_json::from_str::<Session>(&contents) {
            Ok(session) => {
                debug!(username = %session.username, "Session loaded from cache");
                Ok(Some(session))
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Discarding malformed session cache");
                fs::remove_file(&path)?;
                Ok(None)
            }
        }
    }

    /// Saves the session to disk, replacing any previous one.
    ///
    /// The containing directory is created if needed and the file mode is
    /// restricted to 0600 on Unix since the file holds a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the directory or file cannot be written.
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        fs::create_dir_all(&self.dir)?;

        let path = self.path();
        let mut file = File::create(&path)?;
        file.write_all(serde_json::to_string_pretty(session)?.as_bytes())?;
        file.write_all(b"\n")?;

        // Restrict permissions to 0600 (owner read/write only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&path, perms)?;
        }

        debug!(path = %path.display(), "Session saved");
        Ok(())
    }

    /// Removes the cached session, if any.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<(), SessionError> {
        let path = self.path();
        if path.is_file() {
            fs::remove_file(&path)?;
            debug!(path = %path.display(), "Session cleared");
        }
        Ok(())
    }

    /// Returns the cached bearer token, if a session exists.
    ///
    /// # Errors
    ///
    /// Propagates [`load`](Self::load) failures.
    pub fn token(&self) -> Result<Option<String>, SessionError> {
        Ok(self.load()?.map(|session| session.token))
    }
}
