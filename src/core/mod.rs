//! Core building blocks shared by every command
//!
//! - **config**: crux-release.toml parsing and validation
//! - **context**: workspace context built once in main
//! - **error**: error types with exit codes and help messages
//! - **vcs**: git operations (SystemGit)

pub mod config;
pub mod context;
pub mod error;
pub mod vcs;
