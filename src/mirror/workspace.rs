//! On-disk layout of one mirrored repository
//!
//! ```text
//! <base_folder>/<name>/
//!     <name>/             working copy
//!     README.md           copy of the working copy's README
//!     description.txt     repository description snapshot
//!     Wiki/               wiki working copy
//!     Release-<tag>/      release assets
//!     Prerelease-<tag>/   prerelease assets
//! ```

use crate::core::path::ensure_dir;
use crate::core::MirrorResult;
use crate::github::types::GitHubRelease;
use std::fs;
use std::path::{Path, PathBuf};

pub const README_FILE: &str = "README.md";
pub const DESCRIPTION_FILE: &str = "description.txt";
pub const WIKI_DIR: &str = "Wiki";

/// Paths inside one repository workspace
#[derive(Debug, Clone)]
pub struct RepositoryWorkspace {
    root: PathBuf,
    name: String,
}

impl RepositoryWorkspace {
    /// Workspace for repository `name` under `base_folder`
    pub fn new(base_folder: &Path, name: &str) -> Self {
        Self {
            root: base_folder.join(name),
            name: name.to_string(),
        }
    }

    /// Create the workspace directory if needed
    pub fn ensure(&self) -> MirrorResult<()> {
        ensure_dir(&self.root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where a fresh clone is placed
    pub fn clone_dir(&self) -> PathBuf {
        self.root.join(&self.name)
    }

    pub fn readme(&self) -> PathBuf {
        self.root.join(README_FILE)
    }

    pub fn description_file(&self) -> PathBuf {
        self.root.join(DESCRIPTION_FILE)
    }

    pub fn wiki_dir(&self) -> PathBuf {
        self.root.join(WIKI_DIR)
    }

    pub fn release_dir(&self, release: &GitHubRelease) -> PathBuf {
        self.root.join(release.folder_name())
    }

    /// Find the existing working copy
    ///
    /// `<root>/<name>` is preferred; otherwise the first subdirectory (by
    /// name) that holds a `.git` entry, skipping the wiki.
    pub fn locate_working_copy(&self) -> Option<PathBuf> {
        let preferred = self.clone_dir();
        if preferred.join(".git").exists() {
            return Some(preferred);
        }

        let mut candidates: Vec<PathBuf> = fs::read_dir(&self.root)
            .ok()?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .filter(|path| path.file_name().map_or(true, |n| n != WIKI_DIR))
            .filter(|path| path.join(".git").exists())
            .collect();
        candidates.sort();
        candidates.into_iter().next()
    }
}
