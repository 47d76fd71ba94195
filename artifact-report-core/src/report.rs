//! High-level pipeline: repositories → artifacts → report rows → sink.
//!
//! The aggregator runs in three stages:
//!   - Enumerating the organization's repositories (a failure here always aborts)
//!   - Enumerating artifacts for each repository, in repository order, building one
//!     [`ReportRow`] per repository that has at least one artifact
//!   - Finalizing: handing the finished rows to a [`ReportSink`] exactly once
//!
//! # Concurrency
//! With `concurrency = 1` (the default) repositories are processed strictly one
//! after another. Larger values keep up to that many artifact listings in flight
//! through an ordered buffered stream; rows still come out in repository order.
//!
//! # Error Handling
//! A failed artifact listing is handled according to
//! [`FailurePolicy`](crate::config::FailurePolicy): `Abort` returns
//! [`ReportError::Artifacts`] and nothing is published, `Skip` records the
//! repository in [`Report::skipped`] and carries on.
//!
//! # Navigation
//! - Main entrypoint: [`ReportAggregator::run`]
//! - Aggregation only: [`ReportAggregator::aggregate`]

use futures::stream::{self, StreamExt};
use tracing::{debug, error, info, warn};

use crate::config::{FailurePolicy, ReportConfig};
use crate::contract::{Artifact, ReportRow, ReportSink, Repository, SourceControl};
use crate::enumerate::{ArtifactEnumerator, RepositoryEnumerator};
use crate::error::{FetchError, ReportError};
use crate::size::human_readable_size;

/// The outcome of one aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub rows: Vec<ReportRow>,
    pub skipped: Vec<SkippedRepository>,
}

/// A repository left out because its artifacts could not be listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRepository {
    pub full_name: String,
    pub reason: String,
}

/// Builds the per-repository artifact report for one organization.
pub struct ReportAggregator<'a, C: SourceControl + ?Sized> {
    client: &'a C,
    config: &'a ReportConfig,
}

impl<'a, C: SourceControl + ?Sized> ReportAggregator<'a, C> {
    pub fn new(client: &'a C, config: &'a ReportConfig) -> Self {
        Self { client, config }
    }

    /// Aggregate the report and publish it to `sink`.
    pub async fn run<S>(&self, sink: &S) -> Result<Report, ReportError>
    where
        S: ReportSink + ?Sized,
    {
        let report = self.aggregate().await?;

        info!(rows = report.rows.len(), "[REPORT] Publishing report");
        sink.publish(&report.rows).await.map_err(|e| {
            error!(error = %e, "[REPORT][ERROR] Publishing report failed");
            ReportError::Sink(e)
        })?;

        Ok(report)
    }

    /// Enumerate repositories and artifacts and build the report rows.
    pub async fn aggregate(&self) -> Result<Report, ReportError> {
        info!(org = %self.config.org, "[REPORT] Starting report aggregation");

        let repos = RepositoryEnumerator::new(self.client, self.config)
            .list()
            .await
            .map_err(ReportError::Repositories)?;

        let artifacts = ArtifactEnumerator::new(self.client, self.config);
        let concurrency = self.config.concurrency.max(1);
        let mut listings = stream::iter(repos.iter())
            .map(|repo| {
                let artifacts = &artifacts;
                async move { (repo, artifacts.list(&repo.name).await) }
            })
            .buffered(concurrency);

        let mut report = Report::default();
        while let Some((repo, listing)) = listings.next().await {
            debug!(repo = %repo.name, "[REPORT] Checking repository for artifacts");
            match listing {
                Ok(artifacts) => {
                    if let Some(row) = summarise(repo, &artifacts) {
                        info!(
                            repo = %repo.name,
                            count = row.count,
                            total_size = %row.total_size_human_readable,
                            total_size_in_bytes = row.total_size_in_bytes,
                            "[REPORT] Repository artifacts summarised"
                        );
                        report.rows.push(row);
                    } else {
                        debug!(repo = %repo.name, "[REPORT] No artifacts, skipping");
                    }
                }
                Err(e) => self.handle_failure(repo, e, &mut report)?,
            }
        }

        info!(
            repositories = repos.len(),
            rows = report.rows.len(),
            skipped = report.skipped.len(),
            "[REPORT] Aggregation complete"
        );
        Ok(report)
    }

    fn handle_failure(
        &self,
        repo: &Repository,
        e: FetchError,
        report: &mut Report,
    ) -> Result<(), ReportError> {
        match self.config.on_repository_error {
            FailurePolicy::Abort => {
                error!(repo = %repo.full_name, error = %e, "[REPORT][ERROR] Artifact listing failed, aborting");
                Err(ReportError::Artifacts {
                    repository: repo.full_name.clone(),
                    source: e,
                })
            }
            FailurePolicy::Skip => {
                warn!(repo = %repo.full_name, error = %e, "[REPORT] Artifact listing failed, skipping repository");
                report.skipped.push(SkippedRepository {
                    full_name: repo.full_name.clone(),
                    reason: e.to_string(),
                });
                Ok(())
            }
        }
    }
}

/// One row for a repository with artifacts, `None` when it has none.
pub fn summarise(repo: &Repository, artifacts: &[Artifact]) -> Option<ReportRow> {
    if artifacts.is_empty() {
        return None;
    }

    let total_size_in_bytes: u64 = artifacts.iter().map(|a| a.size_in_bytes).sum();
    Some(ReportRow {
        name: repo.full_name.clone(),
        count: artifacts.len(),
        total_size_in_bytes,
        total_size_human_readable: human_readable_size(total_size_in_bytes),
    })
}
