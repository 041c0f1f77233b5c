//! End-to-end tests for the ghmirror binary
//!
//! None of these reach the network: every repository either has a malformed
//! URL or lives in a workspace without a working copy.

use assert_cmd::Command;
use assert_fs::{prelude::*, TempDir};
use predicates::prelude::*;

/// Test context with an isolated config file and mirror root
struct TestContext {
    temp: TempDir,
}

impl TestContext {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        temp.child("mirror").create_dir_all().unwrap();
        Self { temp }
    }

    fn ghmirror(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("ghmirror").unwrap();
        cmd.current_dir(self.temp.path())
            .env_remove("GITHUB_TOKEN")
            .env("RUST_LOG", "ghmirror=info")
            .arg("--config")
            .arg(self.temp.child("config.yaml").path())
            .arg("--base-folder")
            .arg(self.temp.child("mirror").path())
            .arg("--api-url")
            .arg("http://127.0.0.1:9")
            .arg("--no-progress");
        cmd
    }
}

#[test]
fn missing_url_file_fails() {
    let ctx = TestContext::new();

    ctx.ghmirror()
        .arg("--use-text-file")
        .arg("--urls-file")
        .arg(ctx.temp.child("missing.txt").path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read URL list"));
}

#[test]
fn malformed_urls_are_reported_and_skipped() {
    let ctx = TestContext::new();
    let urls = ctx.temp.child("urls.txt");
    urls.write_str("not-a-url\n\n# comment\nalso-bad\n").unwrap();

    ctx.ghmirror()
        .arg("--use-text-file")
        .arg("--urls-file")
        .arg(urls.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("✗ not-a-url"))
        .stdout(predicate::str::contains("✗ also-bad"))
        .stdout(predicate::str::contains("Synchronized 0 of 2 repositories"));
}

#[test]
fn single_malformed_url_does_not_fail_process() {
    let ctx = TestContext::new();

    ctx.ghmirror()
        .arg("--url")
        .arg("nonsense")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid repository URL"));
}

#[test]
fn update_with_empty_base_folder() {
    let ctx = TestContext::new();

    ctx.ghmirror()
        .arg("--update")
        .assert()
        .success()
        .stdout(predicate::str::contains("No repositories to process."));
}

#[test]
fn update_reports_workspace_without_working_copy() {
    let ctx = TestContext::new();
    ctx.temp
        .child("mirror/orphan/Release-v1.0")
        .create_dir_all()
        .unwrap();

    ctx.ghmirror()
        .arg("-u")
        .assert()
        .success()
        .stdout(predicate::str::contains("No git repository found"))
        .stdout(predicate::str::contains("Synchronized 0 of 1 repositories"));
}

#[test]
fn update_with_missing_base_folder_fails() {
    let ctx = TestContext::new();

    #[allow(deprecated)]
    Command::cargo_bin("ghmirror")
        .unwrap()
        .arg("--config")
        .arg(ctx.temp.child("config.yaml").path())
        .arg("--base-folder")
        .arg(ctx.temp.child("does-not-exist").path())
        .arg("--update")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read base folder"));
}

#[test]
fn invalid_config_file_fails() {
    let ctx = TestContext::new();
    ctx.temp
        .child("config.yaml")
        .write_str("releases: [1, 2")
        .unwrap();

    ctx.ghmirror()
        .arg("--update")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn update_conflicts_with_text_file() {
    let ctx = TestContext::new();

    ctx.ghmirror()
        .arg("--update")
        .arg("--use-text-file")
        .assert()
        .failure();
}
