pub mod auth;
pub mod profile;
pub mod requests;
pub mod route;
pub mod run;
pub mod verifications;

use crate::api::profile::ProfileUpdate;
use crate::cli::globals::GlobalArgs;
use crate::client::ApiClient;
use crate::router::{Navigator, RouteTable};
use crate::session::store::SessionStore;
use crate::session::{Role, SessionContext};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug)]
pub enum Action {
    Login {
        username: String,
        password: SecretString,
    },
    Register {
        username: String,
        password: SecretString,
        role: Role,
    },
    Logout,
    RequestList,
    RequestSubmit {
        image: PathBuf,
    },
    RequestShow {
        id: i64,
    },
    VerificationList,
    VerificationSubmit {
        result: i64,
        condition: i64,
    },
    ProfileShow,
    ProfileUpdate {
        changes: ProfileUpdate,
    },
    Route {
        path: String,
    },
}

impl Action {
    /// # Errors
    /// Returns an error if the action fails to execute.
    pub async fn execute(self, globals: &GlobalArgs) -> Result<()> {
        run::execute(self, globals).await
    }
}

/// Shared state for action handlers.
///
/// Construction order is fixed: the store is opened first, the session is
/// hydrated from it, the navigator comes next, and the client receives both.
pub struct AppContext {
    pub session: Arc<SessionContext>,
    pub navigator: Arc<Navigator>,
    pub client: ApiClient,
}

impl AppContext {
    /// # Errors
    /// Returns an error if the session file cannot be read or the API URL is
    /// invalid.
    pub fn build(globals: &GlobalArgs) -> Result<Self> {
        let store = SessionStore::new(globals.session_file.clone());

        let session = Arc::new(
            SessionContext::open(store).context("could not open the session store")?,
        );

        let navigator = Arc::new(Navigator::new(RouteTable::default()));

        let client = ApiClient::new(&globals.api_url, Arc::clone(&session), Arc::clone(&navigator))
            .context("could not build the API client")?;

        Ok(Self {
            session,
            navigator,
            client,
        })
    }
}
