//! Dependency injection infrastructure for ghmirror
//!
//! The mirror talks to git, the GitHub API and plain HTTP only through the
//! traits in [`traits`], which keeps the synchronization logic testable
//! without a network.
//!
//! # Example (Production)
//! ```no_run
//! use ghmirror::config::MirrorConfig;
//! use ghmirror::di::ServiceContainer;
//!
//! # fn example() -> ghmirror::core::MirrorResult<()> {
//! let config = MirrorConfig::with_base_folder("/srv/mirror");
//! let container = ServiceContainer::new(&config)?;
//! # Ok(())
//! # }
//! ```

pub mod container;
pub mod mocks;
pub mod traits;

pub use container::ServiceContainer;
pub use traits::{AssetTransfer, HostingApi, SourceControl};
