//! Check runner for executing release checks

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::error::{ReleaseError, ReleaseResult};
use rayon::prelude::*;
use std::sync::Arc;

/// Runs registered checks in parallel; results keep registration order
pub struct CheckRunner {
  checks: Vec<Arc<dyn Check>>,
}

impl CheckRunner {
  pub fn new() -> Self {
    Self { checks: Vec::new() }
  }

  pub fn add_check(&mut self, check: Arc<dyn Check>) {
    self.checks.push(check);
  }

  /// Keep only the named checks
  ///
  /// An empty list keeps everything. Unknown names are an error listing the
  /// available checks.
  pub fn select(mut self, names: &[String]) -> ReleaseResult<Self> {
    if names.is_empty() {
      return Ok(self);
    }

    if let Some(unknown) = names.iter().find(|n| !self.checks.iter().any(|c| c.name() == n.as_str())) {
      let available: Vec<&str> = self.checks.iter().map(|c| c.name()).collect();
      return Err(ReleaseError::with_help(
        format!("Unknown check '{}'", unknown),
        format!("Available checks: {}", available.join(", ")),
      ));
    }

    self.checks.retain(|c| names.iter().any(|n| n == c.name()));
    Ok(self)
  }

  /// Run all checks and collect results
  ///
  /// A check that fails to run becomes an error result; checks that need git
  /// are skipped with a warning outside a repository.
  pub fn run_all(&self, ctx: &CheckContext<'_>) -> Vec<CheckResult> {
    self
      .checks
      .par_iter()
      .map(|check| {
        if check.requires_git() && !ctx.workspace.has_git() {
          return CheckResult::warning(
            check.name(),
            "Skipped: workspace is not a git repository",
            Some("Run inside the repository the releases are tagged in"),
          );
        }

        tracing::debug!(check = check.name(), "running check");
        match check.run(ctx) {
          Ok(result) => result,
          Err(err) => CheckResult::error(
            check.name(),
            format!("Check failed to run: {}", err),
            Some("Re-run with -vv for details"),
          ),
        }
      })
      .collect()
  }

  /// Get all registered checks
  pub fn checks(&self) -> &[Arc<dyn Check>] {
    &self.checks
  }
}

impl Default for CheckRunner {
  fn default() -> Self {
    Self::new()
  }
}

/// Create a runner with all built-in checks
pub fn create_default_runner() -> CheckRunner {
  let mut runner = CheckRunner::new();

  runner.add_check(Arc::new(super::graph_cycles::GraphCyclesCheck));
  runner.add_check(Arc::new(super::publish_order::PublishOrderCheck));
  runner.add_check(Arc::new(super::role_order::RoleOrderCheck));
  runner.add_check(Arc::new(super::tag_format::TagFormatCheck));
  runner.add_check(Arc::new(super::release_notes::ReleaseNotesCheck));
  runner.add_check(Arc::new(super::version_review::VersionReviewCheck));

  runner
}
