use crate::core::error::{MirrorError, MirrorResult};
use std::path::{Path, PathBuf};

/// Get the ghmirror home directory
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\ghmirror
/// - Linux: ~/.config/ghmirror
/// - macOS: ~/Library/Application Support/ghmirror
pub fn ghmirror_home() -> MirrorResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| MirrorError::Path("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("ghmirror"))
}

/// Get the config file path
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\ghmirror\config.yaml
/// - Linux: ~/.config/ghmirror/config.yaml
/// - macOS: ~/Library/Application Support/ghmirror/config.yaml
pub fn config_file() -> MirrorResult<PathBuf> {
    Ok(ghmirror_home()?.join("config.yaml"))
}

/// Get the default mirror root used when neither the config file nor the
/// command line names one
///
/// Platform-specific locations:
/// - Windows: %LOCALAPPDATA%\ghmirror\repositories
/// - Linux: ~/.local/share/ghmirror/repositories
/// - macOS: ~/Library/Application Support/ghmirror/repositories
pub fn default_base_folder() -> MirrorResult<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| MirrorError::Path("Could not determine data directory".to_string()))?;
    Ok(data_dir.join("ghmirror").join("repositories"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> MirrorResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
