//! GitHub integration
//!
//! This module provides the REST API client used to:
//! - Fetch repository metadata (description)
//! - List the most recent releases and prereleases with their assets

pub mod client;
pub mod types;

pub use client::GitHubClient;
pub use types::{GitHubRelease, GitHubRepo, ReleaseAsset, RepositoryRef};
