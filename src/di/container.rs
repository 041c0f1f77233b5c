//! Service container for dependency injection

use super::traits::{AssetTransfer, HostingApi, SourceControl};
use crate::config::MirrorConfig;
use crate::core::MirrorResult;
use crate::git::GitCli;
use crate::github::GitHubClient;
use crate::mirror::downloader::HttpDownloader;
use std::sync::Arc;

/// Service container for dependency injection
///
/// Holds the three collaborators the mirror needs behind trait objects so
/// tests can swap in the mocks from [`crate::di::mocks`].
///
/// # Example (Testing)
///
/// ```
/// use ghmirror::di::{ServiceContainer, mocks::*};
/// use std::sync::Arc;
///
/// let container = ServiceContainer::with_providers(
///     Arc::new(MockSourceControl::new()),
///     Arc::new(MockHostingApi::new()),
///     Arc::new(MockAssetTransfer::new()),
/// );
/// # let _ = container;
/// ```
#[derive(Clone)]
pub struct ServiceContainer {
    pub source_control: Arc<dyn SourceControl>,
    pub hosting: Arc<dyn HostingApi>,
    pub transfer: Arc<dyn AssetTransfer>,
}

impl ServiceContainer {
    /// Create a new service container with production implementations
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built or the token is
    /// not a valid header value.
    pub fn new(config: &MirrorConfig) -> MirrorResult<Self> {
        Ok(Self {
            source_control: Arc::new(GitCli::new(config.git_binary.clone())),
            hosting: Arc::new(GitHubClient::new(config)?),
            transfer: Arc::new(HttpDownloader::new(config)?),
        })
    }

    /// Create a service container with custom provider implementations
    pub fn with_providers(
        source_control: Arc<dyn SourceControl>,
        hosting: Arc<dyn HostingApi>,
        transfer: Arc<dyn AssetTransfer>,
    ) -> Self {
        Self {
            source_control,
            hosting,
            transfer,
        }
    }

    pub fn source_control(&self) -> &dyn SourceControl {
        self.source_control.as_ref()
    }

    pub fn hosting(&self) -> &dyn HostingApi {
        self.hosting.as_ref()
    }

    pub fn transfer(&self) -> &dyn AssetTransfer {
        self.transfer.as_ref()
    }
}
