use anyhow::Result;
use artifact_report::cli::{run, Cli};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment
    dotenv::dotenv().ok();

    // Initialize tracing for the CLI.
    tracing_subscriber::fmt::init();
    tracing::info!("artifact-report startup: tracing initialised, environment loaded");

    let cli = Cli::parse();
    tracing::info!("artifact-report arguments parsed, invoking run");
    let result = run(cli).await;
    match &result {
        Ok(_) => tracing::info!("artifact-report completed successfully"),
        Err(e) => tracing::error!(error = %e, "artifact-report exited with error"),
    }
    result
}
