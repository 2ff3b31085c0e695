//! Session state for the diagnosis client.
//!
//! A session is five fields moving together: access token, refresh token,
//! role, username and user id. `setTokens`-style grants populate all five,
//! logout clears all five; no partial state is kept across operations. The
//! pure transitions live on [`Session`]; [`SessionContext`] owns the live
//! session plus the durable [`store::SessionStore`] and is passed by
//! reference to the HTTP client and the navigation guard.

pub mod store;

use crate::session::store::SessionStore;
use anyhow::Result;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tokio::sync::RwLock;
use tracing::debug;

/// Role attached to a session; gates role-specific routes and data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Dermatologist,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Dermatologist => "dermatologist",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "patient" => Ok(Self::Patient),
            "dermatologist" => Ok(Self::Dermatologist),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Payload of a successful login, as returned by `POST token/`.
///
/// Every field is optional: the payload shape is not validated, a malformed
/// grant simply produces empty session fields.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TokenGrant {
    pub access: Option<String>,
    pub refresh: Option<String>,
    pub role: Option<Role>,
    pub username: Option<String>,
    #[serde(rename = "id")]
    pub user_id: Option<String>,
}

/// In-memory session state. Tokens are held as secrets and only exposed to
/// attach headers or persist.
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub access: Option<SecretString>,
    pub refresh: Option<SecretString>,
    pub role: Option<Role>,
    pub username: Option<String>,
    pub user_id: Option<String>,
}

impl Session {
    /// Write all five fields from a grant. Pure transition, no persistence.
    pub fn apply_grant(&mut self, grant: &TokenGrant) {
        self.access = grant.access.clone().map(SecretString::from);
        self.refresh = grant.refresh.clone().map(SecretString::from);
        self.role = grant.role;
        self.username = grant.username.clone();
        self.user_id = grant.user_id.clone();
    }

    /// Reset all five fields. Pure transition, idempotent.
    pub fn clear(&mut self) {
        self.access = None;
        self.refresh = None;
        self.role = None;
        self.username = None;
        self.user_id = None;
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.access.is_some()
    }
}

/// Owned session context: live state plus durable storage.
///
/// Constructed once at startup and shared by reference; state mutations and
/// store writes always happen together here so memory and disk cannot drift.
#[derive(Debug)]
pub struct SessionContext {
    store: SessionStore,
    session: RwLock<Session>,
}

impl SessionContext {
    /// Open the context, hydrating from durable storage when present.
    ///
    /// # Errors
    /// Returns an error if the store file exists but cannot be read or parsed.
    pub fn open(store: SessionStore) -> Result<Self> {
        let session = store.load()?.unwrap_or_default();

        if session.is_authenticated() {
            debug!("session hydrated from {}", store.path().display());
        }

        Ok(Self {
            store,
            session: RwLock::new(session),
        })
    }

    /// Apply a login/refresh grant and persist all five fields.
    ///
    /// # Errors
    /// Returns an error if the store cannot be written.
    pub async fn set_tokens(&self, grant: &TokenGrant) -> Result<()> {
        let mut session = self.session.write().await;
        session.apply_grant(grant);
        self.store.save(&session)
    }

    /// Clear the session in memory and on disk. Idempotent.
    ///
    /// # Errors
    /// Returns an error if the store file cannot be removed.
    pub async fn logout(&self) -> Result<()> {
        let mut session = self.session.write().await;
        session.clear();
        self.store.clear()
    }

    /// Swap only the access token after a silent refresh, in memory and on
    /// disk.
    ///
    /// # Errors
    /// Returns an error if the store cannot be written.
    pub async fn update_access(&self, access: SecretString) -> Result<()> {
        let mut session = self.session.write().await;
        session.access = Some(access);
        self.store.save(&session)
    }

    pub async fn snapshot(&self) -> Session {
        self.session.read().await.clone()
    }

    pub async fn access(&self) -> Option<SecretString> {
        self.session.read().await.access.clone()
    }

    pub async fn refresh(&self) -> Option<SecretString> {
        self.session.read().await.refresh.clone()
    }

    pub async fn role(&self) -> Option<Role> {
        self.session.read().await.role
    }

    pub async fn user_id(&self) -> Option<String> {
        self.session.read().await.user_id.clone()
    }
}
