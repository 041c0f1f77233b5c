//! Trait definitions for dependency injection

use crate::core::MirrorResult;
use crate::github::types::{GitHubRelease, GitHubRepo, RepositoryRef};
use async_trait::async_trait;
use std::path::Path;

/// Trait for source-control operations
///
/// Failures surface as `MirrorError::Git`; callers decide whether a given
/// failure is fatal.
#[async_trait]
pub trait SourceControl: Send + Sync {
    /// Clone `url` into `destination`
    async fn clone_repo(&self, url: &str, destination: &Path) -> MirrorResult<()>;

    /// Fetch every remote of the working copy at `path`
    async fn fetch_all(&self, path: &Path) -> MirrorResult<()>;

    /// Pull the working copy at `path`, returning the command output
    async fn pull(&self, path: &Path) -> MirrorResult<String>;

    /// Read `remote.origin.url` of the working copy at `path`
    async fn read_remote_url(&self, path: &Path) -> MirrorResult<String>;
}

/// Trait for the repository-hosting REST API
#[async_trait]
pub trait HostingApi: Send + Sync {
    /// Fetch repository metadata
    async fn get_repo(&self, repo: &RepositoryRef) -> MirrorResult<GitHubRepo>;

    /// List the `per_page` most recent releases
    ///
    /// With `prerelease` set, the request asks for prereleases.
    async fn list_releases(
        &self,
        repo: &RepositoryRef,
        per_page: u32,
        prerelease: bool,
    ) -> MirrorResult<Vec<GitHubRelease>>;
}

/// Trait for streaming file transfers
#[async_trait]
pub trait AssetTransfer: Send + Sync {
    /// Download `url` to `destination`, returning the number of bytes written
    async fn download(&self, url: &str, destination: &Path) -> MirrorResult<u64>;
}
