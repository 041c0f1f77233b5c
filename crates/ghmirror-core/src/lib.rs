//! Core utilities shared by the ghmirror crates
//!
//! Holds the error type and the path helpers that locate the config file
//! and the default mirror root.

pub mod core;

pub use core::error::{MirrorError, MirrorResult};
