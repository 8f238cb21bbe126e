//! Role layering check: macros before core before capabilities

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::error::ReleaseResult;
use crate::graph::{CrateRole, PublishGraph, RoleViolation};

pub struct RoleOrderCheck;

impl RoleOrderCheck {
  fn evaluate(&self, graph: &PublishGraph, declared: Option<&[String]>) -> CheckResult {
    let order = match declared {
      Some(order) => order.to_vec(),
      None => match graph.publish_order() {
        Ok(order) => order,
        Err(_) => {
          return CheckResult::warning(
            self.name(),
            "Skipped: no publish order while the graph has a cycle",
            Some("Fix the dependency cycle reported by graph-cycles"),
          );
        }
      },
    };

    let violations = graph.validate_roles(&order);
    let roles: Vec<serde_json::Value> = order
      .iter()
      .filter_map(|name| graph.role_of(name).map(|role| serde_json::json!({ "name": name, "role": role })))
      .collect();
    let details = serde_json::json!({ "order": roles, "violations": violations });

    if violations.is_empty() {
      let layered = order
        .iter()
        .filter(|n| graph.role_of(n).is_some_and(CrateRole::is_layered))
        .count();
      return CheckResult::pass(
        self.name(),
        format!("{} layered crate(s) follow macros → core → capability", layered),
      )
      .with_details(details);
    }

    let message = violations.iter().map(|v| v.to_string()).collect::<Vec<_>>().join("; ");
    if violations.iter().all(RoleViolation::is_structural) {
      CheckResult::warning(
        self.name(),
        message,
        Some("Check release.core, release.macros and release.capabilities in crux-release.toml"),
      )
      .with_details(details)
    } else {
      CheckResult::error(
        self.name(),
        message,
        Some("Publish macros crates first, then the core crate, then capability crates"),
      )
      .with_details(details)
    }
  }
}

impl Check for RoleOrderCheck {
  fn name(&self) -> &'static str {
    "role-order"
  }

  fn description(&self) -> &'static str {
    "Macros crates publish before the core crate, which publishes before capability crates"
  }

  fn run(&self, ctx: &CheckContext<'_>) -> ReleaseResult<CheckResult> {
    let declared = ctx.workspace.config.release.publish_order.as_deref();
    Ok(self.evaluate(&ctx.workspace.graph, declared))
  }
}
