//! GitHub API client implementation

use crate::config::MirrorConfig;
use crate::core::{MirrorError, MirrorResult};
use crate::di::traits::HostingApi;
use crate::github::types::{GitHubRelease, GitHubRepo, RepositoryRef};
use async_trait::async_trait;
use reqwest::{header, Client as HttpClient, RequestBuilder};
use tracing::debug;

/// GitHub API client
pub struct GitHubClient {
    http_client: HttpClient,
    api_url: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Create a new GitHub client
    pub fn new(config: &MirrorConfig) -> MirrorResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("ghmirror/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        let http_client = HttpClient::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| MirrorError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_url: config.api_url.clone(),
            token: config.github_token.clone(),
        })
    }

    /// Get repository information
    ///
    /// This call is always made without credentials.
    pub async fn get_repo(&self, repo: &RepositoryRef) -> MirrorResult<GitHubRepo> {
        let url = format!("{}/repos/{}/{}", self.api_url, repo.owner, repo.name);
        self.api_get(self.http_client.get(&url), &url).await
    }

    /// Get the `per_page` most recent releases of a repository
    pub async fn get_releases(
        &self,
        repo: &RepositoryRef,
        per_page: u32,
        prerelease: bool,
    ) -> MirrorResult<Vec<GitHubRelease>> {
        let mut url = format!(
            "{}/repos/{}/{}/releases?per_page={}",
            self.api_url, repo.owner, repo.name, per_page
        );
        if prerelease {
            url.push_str("&prerelease=true");
        }

        let request = self.authorized(self.http_client.get(&url))?;
        self.api_get(request, &url).await
    }

    /// Attach the token, if one is configured
    fn authorized(&self, request: RequestBuilder) -> MirrorResult<RequestBuilder> {
        match self.token {
            Some(ref token) => {
                let value = header::HeaderValue::from_str(&format!("token {}", token))
                    .map_err(|e| MirrorError::Config(format!("Invalid GitHub token: {}", e)))?;
                Ok(request.header(header::AUTHORIZATION, value))
            }
            None => Ok(request),
        }
    }

    /// Send an API request and parse the JSON response
    async fn api_get<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> MirrorResult<T> {
        debug!(%url, "GitHub API request");

        let response = request
            .send()
            .await
            .map_err(|e| MirrorError::Api(format!("Request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(MirrorError::Api(format!(
                "{} returned HTTP {}",
                url,
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| MirrorError::Api(format!("Failed to parse response from {}: {}", url, e)))
    }
}

#[async_trait]
impl HostingApi for GitHubClient {
    async fn get_repo(&self, repo: &RepositoryRef) -> MirrorResult<GitHubRepo> {
        Self::get_repo(self, repo).await
    }

    async fn list_releases(
        &self,
        repo: &RepositoryRef,
        per_page: u32,
        prerelease: bool,
    ) -> MirrorResult<Vec<GitHubRelease>> {
        Self::get_releases(self, repo, per_page, prerelease).await
    }
}
