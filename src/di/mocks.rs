//! Mock implementations of service traits for testing

use super::traits::{AssetTransfer, HostingApi, SourceControl};
use crate::core::{MirrorError, MirrorResult};
use crate::github::types::{GitHubRelease, GitHubRepo, RepositoryRef};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// Mock source-control client
///
/// A successful clone creates `<destination>/.git` and, when configured, a
/// `README.md`. Clones of URLs registered with [`fail_clone`] fail after
/// leaving a partial destination directory behind.
///
/// # Example
///
/// ```
/// use ghmirror::di::mocks::MockSourceControl;
///
/// let git = MockSourceControl::new()
///     .with_readme(b"# Widget\n")
///     .fail_clone("https://github.com/octo/widget.wiki.git");
/// assert!(git.clones().is_empty());
/// ```
///
/// [`fail_clone`]: MockSourceControl::fail_clone
#[derive(Clone, Default)]
pub struct MockSourceControl {
    readme: Option<Vec<u8>>,
    failing_clones: HashSet<String>,
    fail_pulls: bool,
    remotes: HashMap<PathBuf, String>,
    clones: Arc<Mutex<Vec<(String, PathBuf)>>>,
    pulls: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockSourceControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// README content written into every successful clone
    pub fn with_readme(mut self, content: &[u8]) -> Self {
        self.readme = Some(content.to_vec());
        self
    }

    /// Make clones of `url` fail
    pub fn fail_clone(mut self, url: &str) -> Self {
        self.failing_clones.insert(url.to_string());
        self
    }

    /// Make every pull fail
    pub fn fail_pulls(mut self) -> Self {
        self.fail_pulls = true;
        self
    }

    /// Remote URL reported for the working copy at `path`
    pub fn with_remote(mut self, path: impl Into<PathBuf>, url: &str) -> Self {
        self.remotes.insert(path.into(), url.to_string());
        self
    }

    /// Every clone attempted so far, as (url, destination)
    pub fn clones(&self) -> Vec<(String, PathBuf)> {
        lock(&self.clones).clone()
    }

    /// Every working copy pulled so far
    pub fn pulls(&self) -> Vec<PathBuf> {
        lock(&self.pulls).clone()
    }
}

#[async_trait]
impl SourceControl for MockSourceControl {
    async fn clone_repo(&self, url: &str, destination: &Path) -> MirrorResult<()> {
        lock(&self.clones).push((url.to_string(), destination.to_path_buf()));

        std::fs::create_dir_all(destination)?;
        if self.failing_clones.contains(url) {
            return Err(MirrorError::Git(format!("clone of {} failed", url)));
        }

        std::fs::create_dir_all(destination.join(".git"))?;
        if let Some(ref readme) = self.readme {
            std::fs::write(destination.join("README.md"), readme)?;
        }
        Ok(())
    }

    async fn fetch_all(&self, _path: &Path) -> MirrorResult<()> {
        if self.fail_pulls {
            return Err(MirrorError::Git("fetch failed".to_string()));
        }
        Ok(())
    }

    async fn pull(&self, path: &Path) -> MirrorResult<String> {
        lock(&self.pulls).push(path.to_path_buf());
        if self.fail_pulls {
            return Err(MirrorError::Git("pull failed".to_string()));
        }
        Ok("Already up to date.".to_string())
    }

    async fn read_remote_url(&self, path: &Path) -> MirrorResult<String> {
        self.remotes
            .get(path)
            .cloned()
            .ok_or_else(|| MirrorError::Git(format!("no remote for {}", path.display())))
    }
}

/// Mock hosting API backed by in-memory repositories and releases
///
/// Like the real API, the `prerelease` flag of a listing request is not
/// used to filter; the newest `per_page` releases are returned as stored.
#[derive(Clone, Default)]
pub struct MockHostingApi {
    repos: HashMap<String, GitHubRepo>,
    releases: HashMap<String, Vec<GitHubRelease>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockHostingApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register repository metadata for `owner/name`
    pub fn with_repo(mut self, full_name: &str, description: Option<&str>) -> Self {
        self.repos.insert(
            full_name.to_string(),
            GitHubRepo {
                name: full_name.rsplit('/').next().map(str::to_string),
                full_name: Some(full_name.to_string()),
                description: description.map(str::to_string),
            },
        );
        self
    }

    /// Register releases for `owner/name`, newest first
    pub fn with_releases(mut self, full_name: &str, releases: Vec<GitHubRelease>) -> Self {
        self.releases.insert(full_name.to_string(), releases);
        self
    }

    /// Every request made so far, formatted like the REST path
    pub fn requests(&self) -> Vec<String> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl HostingApi for MockHostingApi {
    async fn get_repo(&self, repo: &RepositoryRef) -> MirrorResult<GitHubRepo> {
        lock(&self.requests).push(format!("/repos/{}", repo));
        self.repos
            .get(&repo.to_string())
            .cloned()
            .ok_or_else(|| MirrorError::Api(format!("/repos/{} returned HTTP 404", repo)))
    }

    async fn list_releases(
        &self,
        repo: &RepositoryRef,
        per_page: u32,
        prerelease: bool,
    ) -> MirrorResult<Vec<GitHubRelease>> {
        let mut request = format!("/repos/{}/releases?per_page={}", repo, per_page);
        if prerelease {
            request.push_str("&prerelease=true");
        }
        lock(&self.requests).push(request.clone());

        let releases = self
            .releases
            .get(&repo.to_string())
            .ok_or_else(|| MirrorError::Api(format!("{} returned HTTP 404", request)))?;
        Ok(releases.iter().take(per_page as usize).cloned().collect())
    }
}

/// Mock transfer that writes the URL itself as file content
#[derive(Clone, Default)]
pub struct MockAssetTransfer {
    failing_urls: HashSet<String>,
    downloads: Arc<Mutex<Vec<String>>>,
}

impl MockAssetTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make downloads of `url` fail
    pub fn fail_url(mut self, url: &str) -> Self {
        self.failing_urls.insert(url.to_string());
        self
    }

    /// URLs of every download attempted so far
    pub fn downloads(&self) -> Vec<String> {
        lock(&self.downloads).clone()
    }
}

#[async_trait]
impl AssetTransfer for MockAssetTransfer {
    async fn download(&self, url: &str, destination: &Path) -> MirrorResult<u64> {
        lock(&self.downloads).push(url.to_string());
        if self.failing_urls.contains(url) {
            return Err(MirrorError::Transfer(format!(
                "Failed to download {}: HTTP 500 Internal Server Error",
                url
            )));
        }
        std::fs::write(destination, url.as_bytes())?;
        Ok(url.len() as u64)
    }
}
