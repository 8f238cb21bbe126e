//! CLI commands for cargo-crux-release
//!
//! - **check**: run the release checks
//! - **order**: show the publish order
//! - **tags** / **tag**: list release tags, create the pending ones
//! - **notes**: draft release notes for a pending release
//! - **checklist**: the release checklist for HEAD
//!
//! All commands accept `&WorkspaceContext` to avoid redundant workspace loads.

pub mod check;
pub mod checklist;
pub mod notes;
pub mod order;
pub mod tags;

pub use check::run_check;
pub use checklist::run_checklist;
pub use notes::run_notes;
pub use order::run_order;
pub use tags::{run_tag, run_tags};
