//! Durable session storage.
//!
//! The store is a small JSON file with the keys `access`, `refresh`, `role`,
//! `username` and `userId`. It is read once at startup, rewritten on login
//! and token refresh, and removed on logout. Writes are whole-file and
//! synchronous.

use crate::session::{Role, Session};
use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(default, rename = "userId", skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
}

impl From<&Session> for StoredSession {
    fn from(session: &Session) -> Self {
        Self {
            access: session
                .access
                .as_ref()
                .map(|token| token.expose_secret().to_string()),
            refresh: session
                .refresh
                .as_ref()
                .map(|token| token.expose_secret().to_string()),
            role: session.role,
            username: session.username.clone(),
            user_id: session.user_id.clone(),
        }
    }
}

impl From<StoredSession> for Session {
    fn from(stored: StoredSession) -> Self {
        Self {
            access: stored.access.map(SecretString::from),
            refresh: stored.refresh.map(SecretString::from),
            role: stored.role,
            username: stored.username,
            user_id: stored.user_id,
        }
    }
}

/// File-backed persistence for [`Session`].
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored session, `None` when no file exists yet.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<Session>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("reading session file {}", self.path.display()))
            }
        };

        let stored: StoredSession = serde_json::from_str(&contents)
            .with_context(|| format!("parsing session file {}", self.path.display()))?;

        Ok(Some(stored.into()))
    }

    /// Write the session to disk, creating parent directories as needed.
    ///
    /// # Errors
    /// Returns an error if directories cannot be created or the file cannot
    /// be written.
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating session directory {}", parent.display()))?;
        }

        let stored = StoredSession::from(session);
        let contents = serde_json::to_string_pretty(&stored)?;

        fs::write(&self.path, contents)
            .with_context(|| format!("writing session file {}", self.path.display()))?;

        debug!("session saved to {}", self.path.display());

        Ok(())
    }

    /// Remove the session file. Missing files are not an error.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err)
                .with_context(|| format!("removing session file {}", self.path.display())),
        }
    }
}
