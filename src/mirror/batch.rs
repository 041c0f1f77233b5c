use crate::config::MirrorConfig;
use crate::core::{MirrorError, MirrorResult};
use crate::di::ServiceContainer;
use crate::github::types::RepositoryRef;
use crate::mirror::synchronizer::{RepositorySynchronizer, SyncMode, SyncReport, SyncTarget};
use crate::mirror::workspace::RepositoryWorkspace;
use std::fs;
use std::path::Path;
use tracing::{error, info};

/// Result of synchronizing one repository
#[derive(Debug)]
pub struct RepoOutcome {
    /// The URL or workspace directory the repository came from
    pub source: String,
    pub result: MirrorResult<SyncReport>,
}

impl RepoOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-repository outcomes of a batch run, in processing order
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub outcomes: Vec<RepoOutcome>,
}

impl BatchSummary {
    pub fn succeeded(&self) -> impl Iterator<Item = &RepoOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &RepoOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    fn record(&mut self, source: String, result: MirrorResult<SyncReport>) {
        if let Err(ref e) = result {
            error!("An error occurred with {}: {}", source, e);
        }
        self.outcomes.push(RepoOutcome { source, result });
    }
}

/// Runs the repository synchronizer over many repositories
///
/// A failing repository is recorded in the summary and the batch moves on.
pub struct BatchDriver<'a> {
    services: &'a ServiceContainer,
    config: &'a MirrorConfig,
}

impl<'a> BatchDriver<'a> {
    pub fn new(services: &'a ServiceContainer, config: &'a MirrorConfig) -> Self {
        Self { services, config }
    }

    /// Fresh sync of each URL, in order
    ///
    /// Blank lines and `#` comments are skipped.
    pub async fn sync_urls<I, S>(&self, urls: I) -> BatchSummary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let synchronizer = RepositorySynchronizer::new(self.services, self.config);
        let mut summary = BatchSummary::default();

        for url in urls {
            let url = url.as_ref().trim();
            if url.is_empty() || url.starts_with('#') {
                continue;
            }

            let result = match SyncTarget::from_url(url) {
                Ok(target) => synchronizer.sync(&target, SyncMode::Fresh).await,
                Err(e) => Err(e),
            };
            summary.record(url.to_string(), result);
        }

        summary
    }

    /// Update every workspace under the base folder
    ///
    /// Fails only when the base folder itself cannot be read.
    pub async fn update_all(&self) -> MirrorResult<BatchSummary> {
        let base = &self.config.base_folder;
        let entries = fs::read_dir(base).map_err(|e| {
            MirrorError::Path(format!("Cannot read base folder {}: {}", base.display(), e))
        })?;

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .filter(|name| !name.starts_with('.'))
            .collect();
        names.sort();

        info!(count = names.len(), base = %base.display(), "Updating repositories");

        let mut summary = BatchSummary::default();
        for name in names {
            let result = self.update_one(&name).await;
            summary.record(base.join(&name).display().to_string(), result);
        }

        Ok(summary)
    }

    /// The directory name is the repository name; the owner comes from the
    /// working copy's origin remote.
    async fn update_one(&self, name: &str) -> MirrorResult<SyncReport> {
        let workspace = RepositoryWorkspace::new(&self.config.base_folder, name);
        let working_copy = workspace.locate_working_copy().ok_or_else(|| {
            MirrorError::Git(format!(
                "No git repository found in {}",
                workspace.root().display()
            ))
        })?;

        let remote = self
            .services
            .source_control()
            .read_remote_url(&working_copy)
            .await?;
        let owner = RepositoryRef::from_url(&remote)?.owner;

        let url = remote.trim().trim_end_matches('/');
        let url = url.strip_suffix(".git").unwrap_or(url).to_string();
        let target = SyncTarget {
            repo: RepositoryRef::new(owner, name),
            url,
        };

        RepositorySynchronizer::new(self.services, self.config)
            .sync(&target, SyncMode::Update)
            .await
    }
}

/// Read a newline-delimited URL list
pub fn read_url_list(path: &Path) -> MirrorResult<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| {
        MirrorError::Path(format!("Cannot read URL list {}: {}", path.display(), e))
    })?;
    Ok(content.lines().map(str::to_string).collect())
}
