//! Decides which release assets still have to be downloaded

use std::collections::BTreeSet;
use std::path::Path;

/// Asset names declared by a release minus the names already on disk
pub fn missing(remote_names: &BTreeSet<String>, local_names: &BTreeSet<String>) -> BTreeSet<String> {
    remote_names.difference(local_names).cloned().collect()
}

/// Names of the entries currently in `folder`
///
/// A folder that does not exist yet has no entries.
pub fn local_names(folder: &Path) -> std::io::Result<BTreeSet<String>> {
    let entries = match std::fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeSet::new()),
        Err(e) => return Err(e),
    };

    let mut names = BTreeSet::new();
    for entry in entries {
        names.insert(entry?.file_name().to_string_lossy().to_string());
    }
    Ok(names)
}
