use crate::cli::actions::{auth, profile, requests, route, verifications, Action, AppContext};
use crate::cli::globals::GlobalArgs;
use anyhow::Result;

/// Single dispatch point for all actions.
///
/// # Errors
/// Returns an error if the action fails to execute.
pub async fn execute(action: Action, globals: &GlobalArgs) -> Result<()> {
    let context = AppContext::build(globals)?;

    match action {
        Action::Login { username, password } => auth::login(&context, &username, &password).await,
        Action::Register {
            username,
            password,
            role,
        } => auth::register(&context, &username, &password, role).await,
        Action::Logout => auth::logout(&context).await,
        Action::RequestList => requests::list(&context).await,
        Action::RequestSubmit { image } => requests::submit(&context, &image).await,
        Action::RequestShow { id } => requests::show(&context, id).await,
        Action::VerificationList => verifications::list(&context).await,
        Action::VerificationSubmit { result, condition } => {
            verifications::submit(&context, result, condition).await
        }
        Action::ProfileShow => profile::show(&context).await,
        Action::ProfileUpdate { changes } => profile::update(&context, &changes).await,
        Action::Route { path } => route::resolve(&context, &path).await,
    }
}
