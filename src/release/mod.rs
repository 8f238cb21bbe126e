//! Release process model
//!
//! A release of a crate is an immutable `<crate>-vX.Y.Z` tag on the commit it
//! was published from, optionally with human-written notes.
//!
//! - [`tags`]: parse and group release tags
//! - [`bump`]: version bumps and Cargo semver compatibility
//! - [`commits`]: conventional commits
//! - [`review`]: pending releases whose bump misses a breaking change
//! - [`notes`]: release notes sources, requirements and drafts
//! - [`checklist`]: the step-by-step release checklist

pub mod bump;
pub mod checklist;
pub mod commits;
pub mod notes;
pub mod review;
pub mod tags;

pub use bump::VersionBump;
pub use checklist::{Checklist, ChecklistInput, StepStatus};
pub use notes::{NotesDraft, NotesSource, NotesStatus};
pub use review::{PendingRelease, Review};
pub use tags::{ReleaseTag, ReleaseTags, TagShape};
