//! Cargo workspace integration
//!
//! - **metadata**: load and query workspace packages using cargo_metadata

pub mod metadata;
