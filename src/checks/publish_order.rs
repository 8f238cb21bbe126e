//! Publish order check: every crate is published after its dependencies
//!
//! Validates the declared `release.publish_order` (which mirrors the publish
//! script) when one is configured, otherwise the derived order.

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::error::ReleaseResult;
use crate::graph::{OrderViolation, PublishGraph};

pub struct PublishOrderCheck;

impl PublishOrderCheck {
  fn evaluate(&self, graph: &PublishGraph, declared: Option<&[String]>) -> CheckResult {
    let Some(order) = declared else {
      return match graph.publish_order() {
        Ok(order) => CheckResult::pass(
          self.name(),
          format!("Derived publish order covers {} crate(s)", order.len()),
        )
        .with_details(serde_json::json!({ "order": order, "declared": false })),
        Err(e) => CheckResult::error(
          self.name(),
          format!("No valid publish order: {}", e),
          Some("Fix the dependency cycle reported by graph-cycles"),
        ),
      };
    };

    let violations = graph.validate_order(order);
    let details = serde_json::json!({
      "order": order,
      "declared": true,
      "violations": violations,
    });

    if violations.is_empty() {
      return CheckResult::pass(
        self.name(),
        format!("Declared publish order respects dependencies ({} crate(s))", order.len()),
      )
      .with_details(details);
    }

    let lines: Vec<String> = violations.iter().map(|v| v.to_string()).collect();
    let suggestion = graph
      .publish_order()
      .ok()
      .map(|derived| format!("A valid order is: {}", derived.join(", ")));

    if violations.iter().any(OrderViolation::is_blocking) {
      CheckResult::error(self.name(), lines.join("; "), suggestion).with_details(details)
    } else {
      CheckResult::warning(self.name(), lines.join("; "), suggestion).with_details(details)
    }
  }
}

impl Check for PublishOrderCheck {
  fn name(&self) -> &'static str {
    "publish-order"
  }

  fn description(&self) -> &'static str {
    "Each crate is published after every crate it depends on"
  }

  fn run(&self, ctx: &CheckContext<'_>) -> ReleaseResult<CheckResult> {
    let declared = ctx.workspace.config.release.publish_order.as_deref();
    Ok(self.evaluate(&ctx.workspace.graph, declared))
  }
}
