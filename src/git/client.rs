//! git command-line client

use crate::core::{MirrorError, MirrorResult};
use crate::di::traits::SourceControl;
use async_trait::async_trait;
use std::path::Path;
use std::process::Output;
use tokio::process::Command;
use tracing::debug;

/// Runs the `git` executable as a subprocess
#[derive(Debug, Clone)]
pub struct GitCli {
    binary: String,
}

impl GitCli {
    /// Create a client that invokes `binary` (usually just "git")
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Run git with `args` and return its captured output
    ///
    /// A non-zero exit status is reported as an error carrying stderr.
    async fn run(&self, args: &[&str]) -> MirrorResult<Output> {
        debug!(binary = %self.binary, ?args, "running git");

        let output = Command::new(&self.binary)
            .args(args)
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .await
            .map_err(|e| {
                MirrorError::Git(format!("Failed to execute '{}': {}", self.binary, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MirrorError::Git(format!(
                "git {} exited with {}: {}",
                args.join(" "),
                output.status,
                stderr.trim()
            )));
        }

        Ok(output)
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

fn path_arg(path: &Path) -> MirrorResult<&str> {
    path.to_str()
        .ok_or_else(|| MirrorError::Path(format!("Non UTF-8 path: {}", path.display())))
}

#[async_trait]
impl SourceControl for GitCli {
    async fn clone_repo(&self, url: &str, destination: &Path) -> MirrorResult<()> {
        self.run(&["clone", url, path_arg(destination)?]).await?;
        Ok(())
    }

    async fn fetch_all(&self, path: &Path) -> MirrorResult<()> {
        self.run(&["-C", path_arg(path)?, "fetch", "--all"]).await?;
        Ok(())
    }

    async fn pull(&self, path: &Path) -> MirrorResult<String> {
        let output = self.run(&["-C", path_arg(path)?, "pull", "--all"]).await?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    async fn read_remote_url(&self, path: &Path) -> MirrorResult<String> {
        let output = self
            .run(&["-C", path_arg(path)?, "config", "--get", "remote.origin.url"])
            .await?;
        let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if url.is_empty() {
            return Err(MirrorError::Git(format!(
                "No remote.origin.url configured in {}",
                path.display()
            )));
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn git_available() -> bool {
        std::process::Command::new("git")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    #[tokio::test]
    async fn test_missing_binary_is_git_error() {
        let temp = TempDir::new().unwrap();
        let git = GitCli::new("ghmirror-no-such-git-binary");

        let err = git
            .clone_repo("https://example.com/a/b", &temp.path().join("b"))
            .await
            .unwrap_err();
        assert!(matches!(err, MirrorError::Git(_)));
    }

    #[tokio::test]
    async fn test_clone_failure_reports_git_error() {
        if !git_available() {
            return;
        }
        let temp = TempDir::new().unwrap();
        let git = GitCli::default();

        let missing = temp.path().join("does-not-exist");
        let result = git
            .clone_repo(missing.to_str().unwrap(), &temp.path().join("dest"))
            .await;
        assert!(matches!(result, Err(MirrorError::Git(_))));
    }

    #[tokio::test]
    async fn test_clone_and_read_remote_url() {
        if !git_available() {
            return;
        }
        let temp = TempDir::new().unwrap();
        let origin = temp.path().join("origin");
        let status = std::process::Command::new("git")
            .args(["init", "-q", origin.to_str().unwrap()])
            .status()
            .unwrap();
        assert!(status.success());

        let git = GitCli::default();
        let dest = temp.path().join("copy");
        git.clone_repo(origin.to_str().unwrap(), &dest).await.unwrap();

        let remote = git.read_remote_url(&dest).await.unwrap();
        assert!(remote.ends_with("origin"));
    }

    #[tokio::test]
    async fn test_read_remote_url_without_remote() {
        if !git_available() {
            return;
        }
        let temp = TempDir::new().unwrap();
        let status = std::process::Command::new("git")
            .args(["init", "-q", temp.path().to_str().unwrap()])
            .status()
            .unwrap();
        assert!(status.success());

        let result = GitCli::default().read_remote_url(temp.path()).await;
        assert!(result.is_err());
    }
}
