use crate::core::path::{config_file, default_base_folder};
use crate::core::{MirrorError, MirrorResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Contents of `config.yaml`
///
/// Every field is optional on disk; missing fields fall back to the
/// defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root folder that holds one workspace per mirrored repository
    ///
    /// Default locations:
    /// - Windows: %LOCALAPPDATA%\ghmirror\repositories
    /// - Linux: ~/.local/share/ghmirror/repositories
    /// - macOS: ~/Library/Application Support/ghmirror/repositories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_folder: Option<String>,

    /// Personal access token sent with release listing requests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,

    /// Number of most recent releases to mirror per repository
    #[serde(default = "default_fetch_count")]
    pub releases: u32,

    /// Number of most recent prereleases to mirror per repository
    #[serde(default = "default_fetch_count")]
    pub prereleases: u32,

    /// Newline-delimited list of repository URLs
    #[serde(default = "default_urls_file")]
    pub urls_file: String,

    /// GitHub REST API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// git executable
    #[serde(default = "default_git_binary")]
    pub git_binary: String,

    /// Timeout for GitHub API requests, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Show a progress bar per downloaded file
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

fn default_fetch_count() -> u32 {
    1
}

fn default_urls_file() -> String {
    "urls.txt".to_string()
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_git_binary() -> String {
    "git".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_folder: None,
            github_token: None,
            releases: default_fetch_count(),
            prereleases: default_fetch_count(),
            urls_file: default_urls_file(),
            api_url: default_api_url(),
            git_binary: default_git_binary(),
            request_timeout_secs: default_request_timeout_secs(),
            show_progress: true,
        }
    }
}

impl Config {
    /// Load config from the platform-specific config directory
    ///
    /// A missing file yields the defaults; nothing is written.
    pub fn load() -> MirrorResult<Self> {
        Self::load_from(&config_file()?)
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> MirrorResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content).map_err(|e| {
            MirrorError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        Ok(config)
    }

    /// Merge command-line overrides on top of the file values
    pub fn resolve(self, overrides: ConfigOverrides) -> MirrorResult<MirrorConfig> {
        let base_folder = match overrides.base_folder.or(self.base_folder.map(PathBuf::from)) {
            Some(folder) => folder,
            None => default_base_folder()?,
        };

        // An empty token means "unauthenticated", as in the config file
        let github_token = overrides
            .github_token
            .or(self.github_token)
            .filter(|t| !t.trim().is_empty());

        Ok(MirrorConfig {
            base_folder,
            github_token,
            releases: overrides.releases.unwrap_or(self.releases),
            prereleases: overrides.prereleases.unwrap_or(self.prereleases),
            urls_file: overrides
                .urls_file
                .unwrap_or_else(|| PathBuf::from(self.urls_file)),
            api_url: overrides
                .api_url
                .unwrap_or(self.api_url)
                .trim_end_matches('/')
                .to_string(),
            git_binary: self.git_binary,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            show_progress: self.show_progress && !overrides.no_progress,
        })
    }
}

/// Values supplied on the command line; `None` keeps the file value
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_folder: Option<PathBuf>,
    pub github_token: Option<String>,
    pub releases: Option<u32>,
    pub prereleases: Option<u32>,
    pub urls_file: Option<PathBuf>,
    pub api_url: Option<String>,
    pub no_progress: bool,
}

/// Fully resolved settings handed to the batch driver
#[derive(Debug, Clone)]
pub struct MirrorConfig {
    pub base_folder: PathBuf,
    pub github_token: Option<String>,
    pub releases: u32,
    pub prereleases: u32,
    pub urls_file: PathBuf,
    pub api_url: String,
    pub git_binary: String,
    pub request_timeout: Duration,
    pub show_progress: bool,
}

impl MirrorConfig {
    /// Settings rooted at `base_folder` with every other value defaulted
    pub fn with_base_folder(base_folder: impl Into<PathBuf>) -> Self {
        let defaults = Config::default();
        Self {
            base_folder: base_folder.into(),
            github_token: None,
            releases: defaults.releases,
            prereleases: defaults.prereleases,
            urls_file: PathBuf::from(defaults.urls_file),
            api_url: defaults.api_url,
            git_binary: defaults.git_binary,
            request_timeout: Duration::from_secs(defaults.request_timeout_secs),
            show_progress: defaults.show_progress,
        }
    }
}
