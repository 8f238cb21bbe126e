//! Publish-order analysis
//!
//! Built on cargo_metadata + petgraph. No guppy - we own our domain types and queries.

pub mod publish_graph;

pub use publish_graph::{CrateNode, CrateRole, CrateSpec, OrderViolation, PublishGraph, RoleViolation};
