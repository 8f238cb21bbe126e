//! Release notes check: breaking releases of notes crates have notes
//!
//! Every tagged release of a notes crate (the core crate unless configured)
//! that is semver-breaking relative to the previous tag of the same crate
//! needs release notes with a breaking-changes callout.

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::error::ReleaseResult;
use crate::release::notes::{NotesStatus, evaluate_tags};

pub struct ReleaseNotesCheck;

impl ReleaseNotesCheck {
  fn evaluate(&self, statuses: &[NotesStatus]) -> CheckResult {
    let required = statuses.iter().filter(|s| s.required()).count();
    let failing: Vec<&NotesStatus> = statuses.iter().filter(|s| !s.satisfied()).collect();
    let details = serde_json::json!({ "releases": statuses });

    if failing.is_empty() {
      return CheckResult::pass(
        self.name(),
        format!(
          "{} breaking release(s) have notes ({} release(s) checked)",
          required,
          statuses.len()
        ),
      )
      .with_details(details);
    }

    let problems: Vec<String> = failing
      .iter()
      .map(|s| {
        let prev = s.previous.as_ref().map(|v| v.to_string()).unwrap_or_default();
        if s.present {
          format!("{} (breaking since {}) notes don't call out the breaking change", s.tag, prev)
        } else {
          format!("{} (breaking since {}) has no release notes", s.tag, prev)
        }
      })
      .collect();

    let first = failing[0];
    CheckResult::error(
      self.name(),
      problems.join("; "),
      Some(format!(
        "Write notes with a \"Breaking changes\" section at {} (`cargo crux-release notes {}` drafts them)",
        first.location, first.crate_name
      )),
    )
    .with_details(details)
  }
}

impl Check for ReleaseNotesCheck {
  fn name(&self) -> &'static str {
    "release-notes"
  }

  fn description(&self) -> &'static str {
    "Every breaking release of a notes crate has notes calling out the breaking change"
  }

  fn requires_git(&self) -> bool {
    true
  }

  fn run(&self, ctx: &CheckContext<'_>) -> ReleaseResult<CheckResult> {
    let workspace = ctx.workspace;
    let tags = workspace.tags()?;
    let source = workspace.notes_source();

    let mut statuses = Vec::new();
    for crate_name in workspace.config.notes_crates() {
      if !ctx.includes(&crate_name) {
        continue;
      }
      statuses.extend(evaluate_tags(tags, &crate_name, &source)?);
    }

    Ok(self.evaluate(&statuses))
  }
}
