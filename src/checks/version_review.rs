//! Version review check: pending releases whose bump misses a breaking change
//!
//! Findings are warnings. The bumping tool's classification is a heuristic and
//! the fix is a human decision (usually a review PR with corrected versions).

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::error::ReleaseResult;
use crate::release::review::{Review, ReviewFinding};

pub struct VersionReviewCheck;

impl VersionReviewCheck {
  fn evaluate(&self, review: &Review, include: impl Fn(&str) -> bool) -> CheckResult {
    let pending = review.pending.iter().filter(|p| include(&p.crate_name)).count();
    let findings: Vec<&ReviewFinding> = review.findings.iter().filter(|f| include(&f.crate_name)).collect();
    let details = serde_json::json!({ "pending": pending, "findings": findings });

    if findings.is_empty() {
      return CheckResult::pass(
        self.name(),
        format!("{} pending release(s), none look under-classified", pending),
      )
      .with_details(details);
    }

    let message = findings
      .iter()
      .map(|f| {
        let reasons: Vec<String> = f.reasons.iter().map(|r| r.to_string()).collect();
        format!(
          "{} {} → {} is a {} bump but {}",
          f.crate_name,
          f.from,
          f.to,
          f.bump,
          reasons.join(", ")
        )
      })
      .collect::<Vec<_>>()
      .join("; ");

    let suggestion = findings
      .iter()
      .map(|f| format!("{} = {}", f.crate_name, f.suggested_version))
      .collect::<Vec<_>>()
      .join(", ");

    CheckResult::warning(
      self.name(),
      message,
      Some(format!("Review the changes; a breaking release would be {}", suggestion)),
    )
    .with_details(details)
  }
}

impl Check for VersionReviewCheck {
  fn name(&self) -> &'static str {
    "version-review"
  }

  fn description(&self) -> &'static str {
    "Pending version bumps account for macro and capability operation changes"
  }

  fn requires_git(&self) -> bool {
    true
  }

  fn run(&self, ctx: &CheckContext<'_>) -> ReleaseResult<CheckResult> {
    let review = ctx.workspace.review()?;
    Ok(self.evaluate(&review, |name| ctx.includes(name)))
  }
}
