/// `load_config` module: Loads an optional static YAML config and merges environment settings into a [`CliConfig`].
///
/// This module is the only place where untrusted YAML and process environment are read
/// and mapped to the explicit [`ReportConfig`] the core pipeline takes.
///
/// # Responsibilities
/// - Parse the user-supplied YAML file (every section and key is optional)
/// - Inject environment values: `GITHUB_TOKEN` (secret, env only), `GITHUB_ORG`, `GITHUB_API_URL`
/// - Validate ranges (`page_size` 1..=100, `concurrency` >= 1)
///
/// Precedence is environment over file over built-in defaults; CLI flags are applied on
/// top by [`crate::cli::run`].
///
/// # Errors
/// All errors in this module use `anyhow::Error` and are surfaced at the CLI boundary.
use anyhow::Result;
use artifact_report_core::config::{FailurePolicy, ReportConfig, MAX_PAGE_SIZE};
use artifact_report_core::github::DEFAULT_API_URL;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

pub const DEFAULT_OUTPUT_DIR: &str = "out";

/// Everything the CLI needs for one run.
#[derive(Debug)]
pub struct CliConfig {
    pub report: ReportConfig,
    pub github: GitHubSettings,
    pub output_dir: PathBuf,
}

#[derive(Debug)]
pub struct GitHubSettings {
    pub api_url: String,
    pub token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    github: GitHubSection,
    #[serde(default)]
    report: ReportSection,
    #[serde(default)]
    output: OutputSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct GitHubSection {
    org: Option<String>,
    api_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReportSection {
    page_size: Option<u32>,
    concurrency: Option<usize>,
    on_repository_error: Option<FailurePolicy>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputSection {
    dir: Option<PathBuf>,
}

/// Loads the optional YAML config file and merges `GITHUB_*` environment variables into it.
pub fn load_config(path: Option<&Path>) -> Result<CliConfig> {
    let raw = match path {
        Some(path_ref) => read_config_file(path_ref)?,
        None => {
            info!("No config file given, using defaults and environment");
            RawConfig::default()
        }
    };

    let defaults = ReportConfig::default();

    let org = env_var("GITHUB_ORG")
        .or(raw.github.org)
        .unwrap_or(defaults.org);

    let api_url = env_var("GITHUB_API_URL")
        .or(raw.github.api_url)
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    let token = env_var("GITHUB_TOKEN");
    if token.is_some() {
        info!("GITHUB_TOKEN found in env");
    } else {
        warn!("GITHUB_TOKEN environment variable not set, GitHub requests will be unauthenticated");
    }

    let page_size = raw.report.page_size.unwrap_or(defaults.page_size);
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        error!(page_size, "report.page_size out of range");
        anyhow::bail!("report.page_size must be between 1 and {MAX_PAGE_SIZE}, got {page_size}");
    }

    let concurrency = raw.report.concurrency.unwrap_or(defaults.concurrency);
    if concurrency == 0 {
        error!("report.concurrency must be at least 1");
        anyhow::bail!("report.concurrency must be at least 1");
    }

    let report = ReportConfig {
        org,
        page_size,
        concurrency,
        on_repository_error: raw
            .report
            .on_repository_error
            .unwrap_or(defaults.on_repository_error),
    };

    let output_dir = raw
        .output
        .dir
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    info!(
        org = %report.org,
        api_url = %api_url,
        output_dir = %output_dir.display(),
        "Config loaded and merged successfully"
    );

    Ok(CliConfig {
        report,
        github: GitHubSettings { api_url, token },
        output_dir,
    })
}

fn read_config_file(path_ref: &Path) -> Result<RawConfig> {
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    // An empty file is a valid "all defaults" config.
    if config_content.trim().is_empty() {
        return Ok(RawConfig::default());
    }

    match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            Ok(conf)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            Err(anyhow::anyhow!("Failed to parse config YAML: {e}"))
        }
    }
}

/// Non-empty environment variable.
fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
