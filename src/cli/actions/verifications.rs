use crate::api;
use crate::cli::actions::AppContext;
use crate::router::{Navigation, DOCTOR_HOME};
use anyhow::{bail, Context, Result};

/// List results pending verification.
///
/// # Errors
/// Returns an error if the route guard bounces the caller or the request
/// fails.
pub async fn list(context: &AppContext) -> Result<()> {
    guard(context).await?;

    let pending = api::verification::list_pending(&context.client)
        .await
        .context("could not list pending verifications")?;

    println!("{}", serde_json::to_string_pretty(&pending)?);

    Ok(())
}

/// Record a verification decision for a result.
///
/// # Errors
/// Returns an error if the route guard bounces the caller or the request
/// fails.
pub async fn submit(context: &AppContext, result: i64, condition: i64) -> Result<()> {
    guard(context).await?;

    let verification = api::verification::submit(&context.client, result, condition)
        .await
        .with_context(|| format!("could not submit a verification for result {result}"))?;

    println!("{}", serde_json::to_string_pretty(&verification)?);

    Ok(())
}

/// Verification commands follow the same gate as the dermatologist pages.
async fn guard(context: &AppContext) -> Result<()> {
    let session = context.session.snapshot().await;

    match context.navigator.navigate(DOCTOR_HOME, &session).await {
        Navigation::Proceed { .. } => Ok(()),
        Navigation::Redirect(target) => {
            bail!(
                "not available for this session, sign in as a dermatologist (redirected to {target})"
            )
        }
        Navigation::NotFound => bail!("no such route: {DOCTOR_HOME}"),
    }
}
