use crate::cli::actions::AppContext;
use crate::router::Navigation;
use anyhow::Result;

/// Resolve a route path against the stored session and report the outcome.
///
/// # Errors
/// Never fails; the signature matches the other handlers.
pub async fn resolve(context: &AppContext, path: &str) -> Result<()> {
    let session = context.session.snapshot().await;

    match context.navigator.navigate(path, &session).await {
        Navigation::Proceed { component, path } => {
            println!("{path} renders {component}");
        }
        Navigation::Redirect(target) => {
            println!("{path} redirects to {target}");
        }
        Navigation::NotFound => {
            println!("{path} does not match any route");
        }
    }

    Ok(())
}
