use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Organization reported on when nothing else is configured.
pub const DEFAULT_ORG: &str = "liatrio";

/// Largest page size accepted by the GitHub listing endpoints.
pub const MAX_PAGE_SIZE: u32 = 100;

/// What the aggregator does when listing one repository's artifacts fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the run and return the failing repository.
    #[default]
    Abort,
    /// Record the repository as skipped and continue with the next one.
    Skip,
}

/// Explicit configuration for one report run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    pub org: String,
    pub page_size: u32,
    /// Number of repositories whose artifacts are fetched at the same time.
    pub concurrency: usize,
    pub on_repository_error: FailurePolicy,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            org: DEFAULT_ORG.to_string(),
            page_size: MAX_PAGE_SIZE,
            concurrency: 1,
            on_repository_error: FailurePolicy::Abort,
        }
    }
}

impl ReportConfig {
    pub fn for_org(org: impl Into<String>) -> Self {
        Self {
            org: org.into(),
            ..Self::default()
        }
    }

    pub fn trace_loaded(&self) {
        info!(
            org = %self.org,
            page_size = self.page_size,
            concurrency = self.concurrency,
            on_repository_error = ?self.on_repository_error,
            "Loaded ReportConfig"
        );
        debug!(?self, "ReportConfig loaded (full debug)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_liatrio_with_full_pages() {
        let config = ReportConfig::default();
        assert_eq!(config.org, "liatrio");
        assert_eq!(config.page_size, 100);
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.on_repository_error, FailurePolicy::Abort);
    }

    #[test]
    fn failure_policy_uses_lowercase_names() {
        let skip: FailurePolicy = serde_json::from_str("\"skip\"").unwrap();
        assert_eq!(skip, FailurePolicy::Skip);
        assert_eq!(
            serde_json::to_string(&FailurePolicy::Abort).unwrap(),
            "\"abort\""
        );
    }
}
