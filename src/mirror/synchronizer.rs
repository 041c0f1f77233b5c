use crate::config::MirrorConfig;
use crate::core::{MirrorError, MirrorResult};
use crate::di::ServiceContainer;
use crate::github::types::RepositoryRef;
use crate::mirror::materializer::{MaterializeReport, ReleaseMaterializer};
use crate::mirror::workspace::RepositoryWorkspace;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Written to `description.txt` when the repository has no description
pub const DESCRIPTION_FALLBACK: &str = "No description available";

/// How the working copy is brought up to date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Clone when absent, leave an existing clone untouched
    Fresh,
    /// Fetch and pull an existing clone; a missing clone is an error
    Update,
}

/// A repository to synchronize
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTarget {
    pub repo: RepositoryRef,
    /// Clone URL without trailing slashes
    pub url: String,
}

impl SyncTarget {
    /// Build a target from a repository URL
    pub fn from_url(url: &str) -> MirrorResult<Self> {
        let repo = RepositoryRef::from_url(url)?;
        Ok(Self {
            repo,
            url: url.trim().trim_end_matches('/').to_string(),
        })
    }

    /// The wiki's clone URL: `<url>.wiki.git`
    pub fn wiki_url(&self) -> String {
        let base = self.url.strip_suffix(".git").unwrap_or(&self.url);
        format!("{}.wiki.git", base)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkingCopyState {
    Cloned,
    AlreadyPresent,
    CloneFailed,
    Updated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WikiState {
    Cloned,
    AlreadyPresent,
    Unavailable,
}

/// Outcome of one repository synchronization
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub repository: RepositoryRef,
    pub working_copy: WorkingCopyState,
    pub readme_copied: bool,
    pub description_written: bool,
    pub wiki: WikiState,
    pub releases: Vec<MaterializeReport>,
    /// Optional steps that failed without aborting the sync
    pub warnings: Vec<String>,
}

impl SyncReport {
    fn new(repository: RepositoryRef, working_copy: WorkingCopyState) -> Self {
        Self {
            repository,
            working_copy,
            readme_copied: false,
            description_written: false,
            wiki: WikiState::Unavailable,
            releases: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Number of asset files downloaded across all releases
    pub fn downloaded_count(&self) -> usize {
        self.releases.iter().map(|r| r.downloaded.len()).sum()
    }

    fn warn(&mut self, message: String) {
        warn!("{}", message);
        self.warnings.push(message);
    }
}

/// Mirrors one repository into its workspace
///
/// Steps that are optional (clone, README copy, description, wiki, release
/// listing) record a warning and let the sync continue. The sync fails only
/// when the workspace cannot be created, when an update finds no working
/// copy or cannot pull it, or when an asset transfer fails.
pub struct RepositorySynchronizer<'a> {
    services: &'a ServiceContainer,
    config: &'a MirrorConfig,
}

impl<'a> RepositorySynchronizer<'a> {
    pub fn new(services: &'a ServiceContainer, config: &'a MirrorConfig) -> Self {
        Self { services, config }
    }

    pub async fn sync(&self, target: &SyncTarget, mode: SyncMode) -> MirrorResult<SyncReport> {
        info!(repository = %target.repo, ?mode, "Synchronizing repository");

        let workspace = RepositoryWorkspace::new(&self.config.base_folder, &target.repo.name);
        workspace.ensure()?;

        let (working_copy, mut report) = match mode {
            SyncMode::Fresh => self.ensure_clone(target, &workspace).await,
            SyncMode::Update => self.update_working_copy(target, &workspace).await?,
        };

        match copy_readme(&working_copy, &workspace.readme(), mode) {
            Ok(copied) => report.readme_copied = copied,
            Err(e) => report.warn(format!("Failed to copy README for {}: {}", target.repo, e)),
        }

        self.write_description(target, &workspace, &mut report).await;
        self.ensure_wiki(target, &workspace, &mut report).await;

        self.mirror_releases(target, &workspace, false, self.config.releases, &mut report)
            .await?;
        self.mirror_releases(target, &workspace, true, self.config.prereleases, &mut report)
            .await?;

        Ok(report)
    }

    async fn ensure_clone(
        &self,
        target: &SyncTarget,
        workspace: &RepositoryWorkspace,
    ) -> (PathBuf, SyncReport) {
        let clone_dir = workspace.clone_dir();

        if clone_dir.exists() {
            info!(path = %clone_dir.display(), "Repository already cloned");
            let report = SyncReport::new(target.repo.clone(), WorkingCopyState::AlreadyPresent);
            return (clone_dir, report);
        }

        info!(url = %target.url, "Cloning repository");
        match self
            .services
            .source_control()
            .clone_repo(&target.url, &clone_dir)
            .await
        {
            Ok(()) => {
                let report = SyncReport::new(target.repo.clone(), WorkingCopyState::Cloned);
                (clone_dir, report)
            }
            Err(e) => {
                error!(url = %target.url, "Clone failed: {}", e);
                let mut report =
                    SyncReport::new(target.repo.clone(), WorkingCopyState::CloneFailed);
                report.warnings.push(format!("Failed to clone {}: {}", target.url, e));
                (clone_dir, report)
            }
        }
    }

    async fn update_working_copy(
        &self,
        target: &SyncTarget,
        workspace: &RepositoryWorkspace,
    ) -> MirrorResult<(PathBuf, SyncReport)> {
        let working_copy = workspace.locate_working_copy().ok_or_else(|| {
            MirrorError::Git(format!(
                "No git repository found in {}",
                workspace.root().display()
            ))
        })?;

        info!(path = %working_copy.display(), "Updating repository");
        let git = self.services.source_control();
        git.fetch_all(&working_copy).await?;
        let output = git.pull(&working_copy).await?;
        if !output.is_empty() {
            info!("{}", output);
        }

        let report = SyncReport::new(target.repo.clone(), WorkingCopyState::Updated);
        Ok((working_copy, report))
    }

    async fn write_description(
        &self,
        target: &SyncTarget,
        workspace: &RepositoryWorkspace,
        report: &mut SyncReport,
    ) {
        let path = workspace.description_file();

        let description = match self.services.hosting().get_repo(&target.repo).await {
            Ok(repo) => repo
                .description
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| DESCRIPTION_FALLBACK.to_string()),
            Err(e) => {
                report.warn(format!("Failed to fetch metadata for {}: {}", target.repo, e));
                // Keep an earlier snapshot rather than replacing it with the fallback
                if path.exists() {
                    return;
                }
                DESCRIPTION_FALLBACK.to_string()
            }
        };

        match fs::write(&path, description) {
            Ok(()) => report.description_written = true,
            Err(e) => report.warn(format!("Failed to write {}: {}", path.display(), e)),
        }
    }

    async fn ensure_wiki(
        &self,
        target: &SyncTarget,
        workspace: &RepositoryWorkspace,
        report: &mut SyncReport,
    ) {
        let wiki_dir = workspace.wiki_dir();
        if wiki_dir.exists() {
            info!(path = %wiki_dir.display(), "Wiki already cloned");
            report.wiki = WikiState::AlreadyPresent;
            return;
        }

        let wiki_url = target.wiki_url();
        match self
            .services
            .source_control()
            .clone_repo(&wiki_url, &wiki_dir)
            .await
        {
            Ok(()) => report.wiki = WikiState::Cloned,
            Err(e) => {
                info!(repository = %target.repo, "No wiki available or accessible: {}", e);
                report.wiki = WikiState::Unavailable;
                if wiki_dir.exists() {
                    if let Err(e) = fs::remove_dir_all(&wiki_dir) {
                        report.warn(format!(
                            "Failed to remove partial wiki clone {}: {}",
                            wiki_dir.display(),
                            e
                        ));
                    }
                }
            }
        }
    }

    /// Materialize the `count` most recent releases (or prereleases)
    async fn mirror_releases(
        &self,
        target: &SyncTarget,
        workspace: &RepositoryWorkspace,
        prerelease: bool,
        count: u32,
        report: &mut SyncReport,
    ) -> MirrorResult<()> {
        if count == 0 {
            return Ok(());
        }
        let kind = if prerelease { "prereleases" } else { "releases" };

        let releases = match self
            .services
            .hosting()
            .list_releases(&target.repo, count, prerelease)
            .await
        {
            Ok(releases) => releases,
            Err(e) => {
                report.warn(format!("Failed to list {} for {}: {}", kind, target.repo, e));
                return Ok(());
            }
        };

        let materializer = ReleaseMaterializer::new(self.services.transfer());
        for release in releases
            .iter()
            .filter(|r| !r.draft && r.prerelease == prerelease)
            .take(count as usize)
        {
            let folder = workspace.release_dir(release);
            report
                .releases
                .push(materializer.materialize(release, &folder).await?);
        }

        Ok(())
    }
}

/// Copy the working copy's README to the workspace root
///
/// A fresh sync copies only when the root copy is missing; an update also
/// replaces a root copy whose content differs.
fn copy_readme(working_copy: &Path, destination: &Path, mode: SyncMode) -> MirrorResult<bool> {
    let source = working_copy.join("README.md");
    if !source.is_file() {
        return Ok(false);
    }

    let should_copy = if !destination.exists() {
        true
    } else {
        match mode {
            SyncMode::Fresh => false,
            SyncMode::Update => fs::read(&source)? != fs::read(destination)?,
        }
    };

    if should_copy {
        fs::copy(&source, destination)?;
    }
    Ok(should_copy)
}
