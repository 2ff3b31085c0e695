//! Login and registration calls.

use crate::client::{ApiClient, ApiError};
use crate::session::{Role, TokenGrant};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

/// Exchange credentials for a token grant.
///
/// The caller feeds the grant to `SessionContext::set_tokens`; this function
/// does not touch session state itself.
///
/// # Errors
/// Propagates adapter errors unchanged.
pub async fn login(
    client: &ApiClient,
    username: &str,
    password: &SecretString,
) -> Result<TokenGrant, ApiError> {
    client
        .post_json(
            "token/",
            &json!({
                "username": username,
                "password": password.expose_secret(),
            }),
        )
        .await
}

/// Create a new account.
///
/// # Errors
/// Propagates adapter errors unchanged.
pub async fn register(
    client: &ApiClient,
    username: &str,
    password: &SecretString,
    role: Role,
) -> Result<(), ApiError> {
    client
        .post_json_empty(
            "users/",
            &json!({
                "username": username,
                "password": password.expose_secret(),
                "role": role.as_str(),
            }),
        )
        .await
}
