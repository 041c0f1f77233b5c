//! GitHub API type definitions

use crate::core::{MirrorError, MirrorResult};
use serde::{Deserialize, Serialize};

/// Owner and name of a hosted repository
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

impl RepositoryRef {
    /// Create a new repository reference
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse the owner and name from a repository URL
    ///
    /// The last two path segments are used, so these all resolve to
    /// `owner/name`:
    /// - "https://github.com/owner/name"
    /// - "https://github.com/owner/name/"
    /// - "https://github.com/owner/name.git"
    /// - "git@github.com:owner/name.git"
    ///
    /// Nothing beyond the segment count is validated.
    pub fn from_url(url: &str) -> MirrorResult<Self> {
        let trimmed = url.trim().trim_end_matches('/');
        let segments: Vec<&str> = trimmed
            .split(['/', ':'])
            .filter(|s| !s.is_empty())
            .collect();

        if segments.len() < 2 {
            return Err(MirrorError::InvalidUrl(format!(
                "'{}' does not contain an owner/name pair",
                url
            )));
        }

        let owner = segments[segments.len() - 2];
        let name = segments[segments.len() - 1];
        let name = name.strip_suffix(".git").unwrap_or(name);

        if name.is_empty() {
            return Err(MirrorError::InvalidUrl(format!(
                "'{}' has an empty repository name",
                url
            )));
        }

        Ok(Self::new(owner, name))
    }
}

impl std::fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// GitHub release information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRelease {
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub prerelease: bool,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
    #[serde(default)]
    pub published_at: Option<String>,
}

impl GitHubRelease {
    /// Local folder name for this release: `Release-<tag>` or `Prerelease-<tag>`
    pub fn folder_name(&self) -> String {
        if self.prerelease {
            format!("Prerelease-{}", self.tag_name)
        } else {
            format!("Release-{}", self.tag_name)
        }
    }

    /// Find an asset by file name
    pub fn asset(&self, name: &str) -> Option<&ReleaseAsset> {
        self.assets.iter().find(|a| a.name == name)
    }
}

/// GitHub release asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
    #[serde(default)]
    pub size: Option<u64>,
}

/// GitHub repository information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRepo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}
