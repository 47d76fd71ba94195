///
/// This module implements the CLI interface for artifact-report: command parsing,
/// argument overrides, and the async entrypoint shared by `main()` and integration tests.
///
/// All core logic (pagination, enumeration, aggregation) lives in the
/// [`artifact-report-core`] crate. This module is strictly CLI glue: it loads the
/// config, builds the GitHub client and the file sink, and runs the aggregator.
///
/// ## How To Use
/// - For command-line users: use the installed `artifact-report` binary with `--help`.
/// - For programmatic/integration use: call [`run`] with a constructed [`Cli`].
///
/// [`artifact-report-core`]: ../../artifact-report-core/
use crate::load_config::load_config;
use crate::output::FileReportSink;
use anyhow::{Context, Result};
use artifact_report_core::github::GitHubClient;
use artifact_report_core::report::{Report, ReportAggregator};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI for artifact-report: GitHub Actions artifact storage per repository.
#[derive(Parser)]
#[clap(
    name = "artifact-report",
    version,
    about = "Report GitHub Actions artifact count and storage size for every repository of an organization"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the artifact report and write it as JSON and CSV
    Report {
        /// Path to an optional YAML config file
        #[clap(long)]
        config: Option<PathBuf>,
        /// Organization to report on (overrides GITHUB_ORG and the config file)
        #[clap(long)]
        org: Option<String>,
        /// Directory for the report files (overrides the config file)
        #[clap(long)]
        output_dir: Option<PathBuf>,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Report {
            config,
            org,
            output_dir,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(org) = org {
                config.report.org = org;
            }
            if let Some(output_dir) = output_dir {
                config.output_dir = output_dir;
            }
            config.report.trace_loaded();

            tracing::info!(command = "report", org = %config.report.org, "Starting artifact report");
            let client = GitHubClient::new(&config.github.api_url, config.github.token.clone())
                .context("Failed to construct GitHub client")?;
            let sink = FileReportSink::new(&config.output_dir);

            match ReportAggregator::new(&client, &config.report).run(&sink).await {
                Ok(report) => {
                    print_skipped(&report);
                    tracing::info!(
                        command = "report",
                        rows = report.rows.len(),
                        skipped = report.skipped.len(),
                        json = %sink.json_path().display(),
                        csv = %sink.csv_path().display(),
                        "Artifact report complete"
                    );
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(command = "report", error = %e, "Artifact report failed");
                    Err(anyhow::Error::new(e))
                }
            }
        }
    }
}

fn print_skipped(report: &Report) {
    if report.skipped.is_empty() {
        return;
    }
    println!("\nSkipped {} repositories:", report.skipped.len());
    for skipped in &report.skipped {
        println!("  {}: {}", skipped.full_name, skipped.reason);
    }
}
