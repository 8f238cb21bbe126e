//! Integration tests for cargo-crux-release
//!
//! Each test builds a throwaway git workspace with the macros → core →
//! capability layout and runs the binary against it.

mod helpers;

mod test_check;
mod test_checklist;
mod test_notes;
mod test_order;
mod test_tags;
