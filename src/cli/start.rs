use crate::cli::{actions::Action, commands, dispatch, globals::GlobalArgs, telemetry};
use anyhow::Result;
use tracing::Level;

/// Parse the command line, initialize telemetry and return the action to run.
///
/// # Errors
/// Returns an error if telemetry setup or argument handling fails.
pub fn start() -> Result<(GlobalArgs, Action)> {
    let matches = commands::new().get_matches();

    let verbosity = matches.get_count("verbosity");

    let log_level = match verbosity {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };

    telemetry::init(Some(log_level))?;

    dispatch::handler(&matches)
}
