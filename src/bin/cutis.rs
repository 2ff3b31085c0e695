use anyhow::Result;
use cutis::cli::{self, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    let (globals, action) = cli::start()?;

    let outcome = action.execute(&globals).await;

    telemetry::shutdown_tracer();

    outcome
}
