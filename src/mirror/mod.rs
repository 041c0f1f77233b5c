//! Repository mirroring
//!
//! - [`differ`]: which release assets are missing locally
//! - [`materializer`]: fill one release folder
//! - [`synchronizer`]: clone/update, README, description, wiki, releases
//! - [`batch`]: run the synchronizer over many repositories
//! - [`downloader`]: streaming HTTP transfer with progress
//! - [`workspace`]: on-disk layout of a mirrored repository

pub mod batch;
pub mod differ;
pub mod downloader;
pub mod materializer;
pub mod synchronizer;
pub mod workspace;

pub use batch::{read_url_list, BatchDriver, BatchSummary, RepoOutcome};
pub use materializer::{MaterializeReport, ReleaseMaterializer};
pub use synchronizer::{RepositorySynchronizer, SyncMode, SyncReport, SyncTarget};
pub use workspace::RepositoryWorkspace;
