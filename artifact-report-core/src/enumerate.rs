//! Repository and artifact enumeration on top of [`collect_pages`].

use tracing::{debug, error, info};

use crate::config::ReportConfig;
use crate::contract::{Artifact, Repository, SourceControl};
use crate::error::FetchError;
use crate::paginate::collect_pages;

/// Lists every repository of the configured organization, in API order.
pub struct RepositoryEnumerator<'a, C: SourceControl + ?Sized> {
    client: &'a C,
    config: &'a ReportConfig,
}

impl<'a, C: SourceControl + ?Sized> RepositoryEnumerator<'a, C> {
    pub fn new(client: &'a C, config: &'a ReportConfig) -> Self {
        Self { client, config }
    }

    pub async fn list(&self) -> Result<Vec<Repository>, FetchError> {
        let org = self.config.org.as_str();
        let per_page = self.config.page_size;
        info!(org, per_page, "[ENUMERATE] Listing organization repositories");

        let repos = collect_pages(per_page, |page| {
            self.client.list_org_repos_page(org, per_page, page)
        })
        .await
        .map_err(|e| {
            error!(org, error = %e, "[ENUMERATE][ERROR] Repository listing failed");
            e
        })?;

        info!(org, count = repos.len(), "[ENUMERATE] Repositories listed");
        Ok(repos)
    }
}

/// Lists every artifact of one repository of the configured organization.
pub struct ArtifactEnumerator<'a, C: SourceControl + ?Sized> {
    client: &'a C,
    config: &'a ReportConfig,
}

impl<'a, C: SourceControl + ?Sized> ArtifactEnumerator<'a, C> {
    pub fn new(client: &'a C, config: &'a ReportConfig) -> Self {
        Self { client, config }
    }

    pub async fn list(&self, repo: &str) -> Result<Vec<Artifact>, FetchError> {
        let owner = self.config.org.as_str();
        let per_page = self.config.page_size;
        debug!(owner, repo, per_page, "[ENUMERATE] Listing repository artifacts");

        collect_pages(per_page, |page| async move {
            self.client
                .list_repo_artifacts_page(owner, repo, per_page, page)
                .await
                .map(|listing| listing.artifacts)
        })
        .await
    }
}
