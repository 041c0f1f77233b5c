use crate::core::path::ensure_dir;
use crate::core::{MirrorError, MirrorResult};
use crate::di::traits::AssetTransfer;
use crate::github::types::GitHubRelease;
use crate::mirror::differ;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What one materialization pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    pub tag: String,
    pub folder: PathBuf,
    pub downloaded: Vec<String>,
    pub already_present: Vec<String>,
}

/// Makes a release folder hold every asset of its release
///
/// Only assets missing from the folder are transferred; files already
/// present are trusted by name.
pub struct ReleaseMaterializer<'a> {
    transfer: &'a dyn AssetTransfer,
}

impl<'a> ReleaseMaterializer<'a> {
    pub fn new(transfer: &'a dyn AssetTransfer) -> Self {
        Self { transfer }
    }

    /// Download the assets of `release` that `folder` does not have yet
    ///
    /// The first failed transfer stops the pass and is returned.
    pub async fn materialize(
        &self,
        release: &GitHubRelease,
        folder: &Path,
    ) -> MirrorResult<MaterializeReport> {
        ensure_dir(folder)?;
        info!(tag = %release.tag_name, folder = %folder.display(), "Checking release assets");

        let remote: BTreeSet<String> = release.assets.iter().map(|a| a.name.clone()).collect();
        let local = differ::local_names(folder)?;
        let missing = differ::missing(&remote, &local);

        let mut report = MaterializeReport {
            tag: release.tag_name.clone(),
            folder: folder.to_path_buf(),
            downloaded: Vec::new(),
            already_present: remote.intersection(&local).cloned().collect(),
        };

        for name in missing {
            if !is_plain_file_name(&name) {
                warn!(asset = %name, "Skipping asset with a path-like name");
                continue;
            }
            let Some(asset) = release.asset(&name) else {
                continue;
            };

            let destination = folder.join(&name);
            if destination.exists() {
                info!(file = %destination.display(), "File already exists");
                report.already_present.push(name);
                continue;
            }

            info!(asset = %name, "Downloading");
            self.transfer
                .download(&asset.browser_download_url, &destination)
                .await
                .map_err(|e| {
                    MirrorError::Transfer(format!(
                        "Asset '{}' of release {}: {}",
                        name, release.tag_name, e
                    ))
                })?;
            report.downloaded.push(name);
        }

        Ok(report)
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}
