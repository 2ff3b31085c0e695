use crate::api::profile::ProfileUpdate;
use crate::cli::actions::Action;
use crate::cli::globals::GlobalArgs;
use crate::session::Role;
use anyhow::{anyhow, bail, Context, Result};
use secrecy::SecretString;
use std::path::PathBuf;

fn default_session_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cutis").join("session.json"))
}

/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<(GlobalArgs, Action)> {
    let api_url = matches
        .get_one::<String>("api-url")
        .cloned()
        .context("missing required argument: --api-url")?;

    let session_file = matches
        .get_one::<String>("session-file")
        .map(PathBuf::from)
        .or_else(default_session_file)
        .context("could not determine a session file path; pass --session-file")?;

    let action = action_from(matches)?;

    Ok((GlobalArgs::new(api_url, session_file), action))
}

fn action_from(matches: &clap::ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some(("login", sub)) => Ok(Action::Login {
            username: sub
                .get_one::<String>("username")
                .cloned()
                .context("missing required argument: --username")?,
            password: SecretString::from(
                sub.get_one::<String>("password")
                    .cloned()
                    .context("missing required argument: --password")?,
            ),
        }),
        Some(("register", sub)) => {
            let role: Role = sub
                .get_one::<String>("role")
                .map_or("patient", String::as_str)
                .parse()
                .map_err(|err: String| anyhow!(err))?;

            Ok(Action::Register {
                username: sub
                    .get_one::<String>("username")
                    .cloned()
                    .context("missing required argument: --username")?,
                password: SecretString::from(
                    sub.get_one::<String>("password")
                        .cloned()
                        .context("missing required argument: --password")?,
                ),
                role,
            })
        }
        Some(("logout", _)) => Ok(Action::Logout),
        Some(("requests", sub)) => match sub.subcommand() {
            Some(("list", _)) => Ok(Action::RequestList),
            Some(("submit", inner)) => Ok(Action::RequestSubmit {
                image: inner
                    .get_one::<String>("image")
                    .map(PathBuf::from)
                    .context("missing required argument: --image")?,
            }),
            Some(("show", inner)) => Ok(Action::RequestShow {
                id: inner
                    .get_one::<i64>("id")
                    .copied()
                    .context("missing required argument: --id")?,
            }),
            _ => bail!("missing requests subcommand"),
        },
        Some(("verifications", sub)) => match sub.subcommand() {
            Some(("list", _)) => Ok(Action::VerificationList),
            Some(("submit", inner)) => Ok(Action::VerificationSubmit {
                result: inner
                    .get_one::<i64>("result")
                    .copied()
                    .context("missing required argument: --result")?,
                condition: inner
                    .get_one::<i64>("condition")
                    .copied()
                    .context("missing required argument: --condition")?,
            }),
            _ => bail!("missing verifications subcommand"),
        },
        Some(("profile", sub)) => match sub.subcommand() {
            Some(("show", _)) => Ok(Action::ProfileShow),
            Some(("update", inner)) => Ok(Action::ProfileUpdate {
                changes: ProfileUpdate {
                    username: inner.get_one::<String>("username").cloned(),
                    email: inner.get_one::<String>("email").cloned(),
                    first_name: inner.get_one::<String>("first-name").cloned(),
                    last_name: inner.get_one::<String>("last-name").cloned(),
                },
            }),
            _ => bail!("missing profile subcommand"),
        },
        Some(("route", sub)) => Ok(Action::Route {
            path: sub
                .get_one::<String>("path")
                .cloned()
                .context("missing required argument: path")?,
        }),
        _ => bail!("missing subcommand"),
    }
}
