//! `cargo crux-release order` - show the publish order
//!
//! Prints the derived order with each crate's role, and compares it with the
//! declared `release.publish_order` when one is configured.

use crate::core::context::WorkspaceContext;
use crate::core::error::ReleaseResult;
use crate::graph::{CrateRole, OrderViolation};
use serde::Serialize;

#[derive(Serialize)]
struct OrderEntry {
  position: usize,
  name: String,
  version: String,
  role: CrateRole,
  dependencies: Vec<String>,
  /// Crates that must wait for this one
  dependents: Vec<String>,
}

#[derive(Serialize)]
struct OrderReport {
  order: Vec<OrderEntry>,
  #[serde(skip_serializing_if = "Option::is_none")]
  declared: Option<Vec<String>>,
  violations: Vec<OrderViolation>,
}

pub fn run_order(ctx: &WorkspaceContext, json: bool) -> ReleaseResult<()> {
  let graph = &ctx.graph;
  let order = graph.publish_order()?;

  let entries: Vec<OrderEntry> = order
    .iter()
    .enumerate()
    .filter_map(|(i, name)| {
      graph.node(name).map(|node| OrderEntry {
        position: i + 1,
        name: node.name.clone(),
        version: node.version.to_string(),
        role: node.role,
        dependencies: graph.dependencies_of(name),
        dependents: graph.dependents_of(name),
      })
    })
    .collect();

  let declared = ctx.config.release.publish_order.clone();
  let violations = declared.as_deref().map(|d| graph.validate_order(d)).unwrap_or_default();

  let report = OrderReport {
    order: entries,
    declared,
    violations,
  };

  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
    return Ok(());
  }

  println!("📦 Publish order ({} crates)", report.order.len());
  println!("════════════════════════════════════════");
  for entry in &report.order {
    let deps = if entry.dependencies.is_empty() {
      String::new()
    } else {
      format!("  ← {}", entry.dependencies.join(", "))
    };
    println!(
      "  {:>2}. {} {} [{}]{}",
      entry.position, entry.name, entry.version, entry.role, deps
    );
  }

  if let Some(declared) = &report.declared {
    println!();
    if report.violations.is_empty() {
      println!("✅ Declared publish order is valid ({} crates)", declared.len());
    } else {
      println!("❌ Declared publish order has problems:");
      for violation in &report.violations {
        println!("   - {}", violation);
      }
    }
  }

  Ok(())
}
