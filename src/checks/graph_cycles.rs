//! Dependency cycle detection check
//!
//! A cycle between publishable crates means no publish order exists.

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::error::ReleaseResult;
use crate::graph::PublishGraph;

pub struct GraphCyclesCheck;

impl GraphCyclesCheck {
  fn evaluate(&self, graph: &PublishGraph) -> CheckResult {
    let cycles = graph.cycles();

    if cycles.is_empty() {
      return CheckResult::pass(self.name(), "No dependency cycles between publishable crates");
    }

    let cycle_list: Vec<String> = cycles
      .iter()
      .enumerate()
      .map(|(i, cycle)| format!("Cycle {}: {}", i + 1, cycle.join(" → ")))
      .collect();

    CheckResult::error(
      self.name(),
      format!("Found {} dependency cycle(s) between publishable crates", cycles.len()),
      Some("Break the cycle, or move the dependency to [dev-dependencies]"),
    )
    .with_details(serde_json::json!({ "cycles": cycle_list }))
  }
}

impl Check for GraphCyclesCheck {
  fn name(&self) -> &'static str {
    "graph-cycles"
  }

  fn description(&self) -> &'static str {
    "Publishable crates form an acyclic dependency graph"
  }

  fn run(&self, ctx: &CheckContext<'_>) -> ReleaseResult<CheckResult> {
    Ok(self.evaluate(&ctx.workspace.graph))
  }
}
