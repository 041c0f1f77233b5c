//! Source-control integration backed by the git executable

pub mod client;

pub use client::GitCli;
