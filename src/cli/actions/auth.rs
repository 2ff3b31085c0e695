use crate::api;
use crate::cli::actions::AppContext;
use crate::router::{Navigation, LOGIN_ROUTE};
use crate::session::Role;
use anyhow::{Context, Result};
use secrecy::SecretString;
use tracing::info;

/// Sign in, persist the session and land on the role home page.
///
/// # Errors
/// Returns an error if the credentials are rejected or the session cannot be
/// persisted.
pub async fn login(
    context: &AppContext,
    username: &str,
    password: &SecretString,
) -> Result<()> {
    let grant = api::auth::login(&context.client, username, password)
        .await
        .context("login failed")?;

    context
        .session
        .set_tokens(&grant)
        .await
        .context("could not persist the session")?;

    let session = context.session.snapshot().await;
    let landing = match context.navigator.navigate("/", &session).await {
        Navigation::Proceed { path, .. } => path,
        Navigation::Redirect(path) => path.to_string(),
        Navigation::NotFound => LOGIN_ROUTE.to_string(),
    };

    info!("signed in as {username}");
    println!("Signed in as {username}, landing on {landing}");

    Ok(())
}

/// Create an account with the given role.
///
/// # Errors
/// Returns an error if the registration is rejected.
pub async fn register(
    context: &AppContext,
    username: &str,
    password: &SecretString,
    role: Role,
) -> Result<()> {
    api::auth::register(&context.client, username, password, role)
        .await
        .context("registration failed")?;

    println!("Registered {username} as {role}, sign in with `cutis login`");

    Ok(())
}

/// Drop the session and return to the login page.
///
/// # Errors
/// Returns an error if the session file cannot be removed.
pub async fn logout(context: &AppContext) -> Result<()> {
    context
        .session
        .logout()
        .await
        .context("could not clear the session")?;
    context.navigator.force(LOGIN_ROUTE).await;

    println!("Signed out");

    Ok(())
}
