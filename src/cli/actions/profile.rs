use crate::api;
use crate::api::profile::ProfileUpdate;
use crate::cli::actions::AppContext;
use anyhow::{bail, Context, Result};

/// Show the signed-in user's profile.
///
/// # Errors
/// Returns an error if the request fails.
pub async fn show(context: &AppContext) -> Result<()> {
    let profile = api::profile::fetch(&context.client)
        .await
        .context("could not fetch the profile")?;

    println!("{}", serde_json::to_string_pretty(&profile)?);

    Ok(())
}

/// Apply a partial profile update.
///
/// # Errors
/// Returns an error if no fields were given or the request fails.
pub async fn update(context: &AppContext, changes: &ProfileUpdate) -> Result<()> {
    if changes.is_empty() {
        bail!("nothing to update, pass at least one of --username, --email, --first-name or --last-name");
    }

    let profile = api::profile::update(&context.client, changes)
        .await
        .context("could not update the profile")?;

    println!("{}", serde_json::to_string_pretty(&profile)?);

    Ok(())
}
