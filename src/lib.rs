//! ghmirror: mirror GitHub repositories and their releases to local disk
//!
//! This crate provides the ghmirror library, re-exporting core functionality
//! from `ghmirror-core` and organizing the clients and the mirroring logic.

pub use ghmirror_core::{MirrorError, MirrorResult};

/// Core module re-exported from ghmirror-core.
pub mod core {
    pub use ghmirror_core::core::*;

    /// Path module re-exported from ghmirror-core.
    pub mod path {
        pub use ghmirror_core::core::path::*;
    }
}

/// Configuration management.
pub mod config;

/// GitHub REST API client.
pub mod github;

/// git command-line client.
pub mod git;

/// Dependency injection infrastructure.
pub mod di;

/// Repository and release mirroring.
pub mod mirror;
