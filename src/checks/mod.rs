//! Release checks
//!
//! All checks implement the `Check` trait and are registered in
//! `create_default_runner()`.
//!
//! # Built-in Checks
//!
//! - **graph-cycles**: publishable crates form an acyclic graph
//! - **publish-order**: every crate is published after its dependencies
//! - **role-order**: macros → core → capability layering
//! - **tag-format**: release tags are `<crate_name>-vX.Y.Z`
//! - **release-notes**: breaking releases of notes crates have notes
//! - **version-review**: pending bumps that miss a breaking change
//!
//! # Example
//!
//! ```rust,ignore
//! let ctx = CheckContext { workspace: &workspace, crate_name: None };
//! let results = create_default_runner().run_all(&ctx);
//!
//! for result in results {
//!   if !result.passed {
//!     println!("❌ {}: {}", result.check_name, result.message);
//!   }
//! }
//! ```

mod graph_cycles;
mod publish_order;
mod release_notes;
mod role_order;
mod runner;
mod tag_format;
mod trait_def;
mod version_review;

pub use runner::{CheckRunner, create_default_runner};
pub use trait_def::{Check, CheckContext, CheckResult, Severity};
