//! # contract: domain types and the two seams of the reporting pipeline
//!
//! This module defines the plain data the pipeline moves around and the two traits
//! it talks to the outside world through:
//!
//! - [`SourceControl`]: one page of a remote listing (repositories of an
//!   organization, artifacts of a repository). Implemented by
//!   [`crate::github::GitHubClient`] and by test mocks.
//! - [`ReportSink`]: receives the finished report rows exactly once, after
//!   aggregation. Implemented by the CLI's file/console sink and by test mocks.
//!
//! ## Mocking & Testing
//! - Both traits are annotated for `mockall`. The mocks are exported behind the
//!   `test-export-mocks` feature (on by default) so integration tests and the CLI
//!   crate can use `MockSourceControl` and `MockReportSink`.
//!
//! ## Adding New Listing Backends
//! - Implement [`SourceControl`] for the backend.
//! - Map every transport, status or decoding problem to a [`FetchError`]; never
//!   return an empty page for a failed request.

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::{FetchError, SinkError};

/// A repository as returned by the organization listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository name, unique within the organization. Used as the fetch key.
    pub name: String,
    /// `owner/name`. Used as the report label.
    pub full_name: String,
}

/// A stored build output of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub size_in_bytes: u64,
    #[serde(default)]
    pub expired: bool,
}

/// One page of the artifact listing.
///
/// `total_count` is what the endpoint reports; pagination never relies on it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArtifactPage {
    pub total_count: u64,
    pub artifacts: Vec<Artifact>,
}

/// One aggregated line of the report, for a repository with at least one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    /// The repository's `full_name`.
    pub name: String,
    pub count: usize,
    pub total_size_in_bytes: u64,
    pub total_size_human_readable: String,
}

/// Paginated listing endpoints of a source-control platform.
///
/// Page numbers start at 1. Implementors return exactly what the endpoint returned
/// for that page; termination is decided by [`crate::paginate::collect_pages`].
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait SourceControl: Send + Sync {
    /// List one page of the repositories of `org`.
    async fn list_org_repos_page(
        &self,
        org: &str,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<Repository>, FetchError>;

    /// List one page of the artifacts of `owner/repo`.
    async fn list_repo_artifacts_page(
        &self,
        owner: &str,
        repo: &str,
        per_page: u32,
        page: u32,
    ) -> Result<ArtifactPage, FetchError>;
}

/// Destination of a finished report (files, console, ...).
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Persist and/or display the rows. Called once per run.
    async fn publish(&self, rows: &[ReportRow]) -> Result<(), SinkError>;
}
