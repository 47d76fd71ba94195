//! GitHub REST implementation of [`SourceControl`].
//!
//! One `reqwest::Client` is shared by every request. No timeout or retry is set up
//! here; the transport defaults apply.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use crate::contract::{ArtifactPage, Repository, SourceControl};
use crate::error::FetchError;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("artifact-report/", env!("CARGO_PKG_VERSION"));

pub struct GitHubClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Build a client for `base_url` (e.g. [`DEFAULT_API_URL`]). Requests are
    /// unauthenticated when `token` is `None`.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(API_VERSION),
        );

        let base_url = base_url.trim_end_matches('/').to_string(); // avoid "//"
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| FetchError::Transport {
                url: base_url.clone(),
                message: e.to_string(),
            })?;

        if token.is_none() {
            warn!("[GITHUB] No token configured, requests are unauthenticated");
        }
        info!(base_url = %base_url, authenticated = token.is_some(), "[GITHUB] Client initialised");

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        per_page: u32,
        page: u32,
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, per_page, page, "[GITHUB] GET");

        let mut request = self
            .http
            .get(&url)
            .query(&[("per_page", per_page), ("page", page)]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            error!(error = ?e, url = %url, "[GITHUB][ERROR] Request failed");
            FetchError::Transport {
                url: url.clone(),
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<Failed to decode response body>"));
            error!(status = %status, url = %url, "[GITHUB][ERROR] API returned error. Response body: {body}");
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
                body,
            });
        }

        response.json::<T>().await.map_err(|e| {
            error!(error = ?e, url = %url, "[GITHUB][ERROR] Failed to parse response JSON");
            FetchError::Decode {
                url,
                message: e.to_string(),
            }
        })
    }
}

#[async_trait]
impl SourceControl for GitHubClient {
    async fn list_org_repos_page(
        &self,
        org: &str,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<Repository>, FetchError> {
        self.get_json(&format!("/orgs/{org}/repos"), per_page, page)
            .await
    }

    async fn list_repo_artifacts_page(
        &self,
        owner: &str,
        repo: &str,
        per_page: u32,
        page: u32,
    ) -> Result<ArtifactPage, FetchError> {
        self.get_json(
            &format!("/repos/{owner}/{repo}/actions/artifacts"),
            per_page,
            page,
        )
        .await
    }
}
