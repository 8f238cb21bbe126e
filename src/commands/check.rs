//! `cargo crux-release check` - run the release checks
//!
//! Exits with the validation exit code when a check reports an error, or a
//! warning under `--strict`.

use crate::checks::{CheckContext, CheckResult, Severity, create_default_runner};
use crate::core::context::WorkspaceContext;
use crate::core::error::{ReleaseError, ReleaseResult, ValidationError};

/// Run the check command
pub fn run_check(
  ctx: &WorkspaceContext,
  only: Vec<String>,
  crate_name: Option<String>,
  json: bool,
  strict: bool,
) -> ReleaseResult<()> {
  if let Some(name) = &crate_name
    && ctx.metadata.get_package(name).is_none()
  {
    return Err(ReleaseError::Config(crate::core::error::ConfigError::CrateNotFound {
      name: name.clone(),
    }));
  }

  let runner = create_default_runner().select(&only)?;
  let check_ctx = CheckContext {
    workspace: ctx,
    crate_name: crate_name.as_deref(),
  };

  tracing::info!(checks = runner.checks().len(), "running release checks");
  let results = runner.run_all(&check_ctx);

  if json {
    println!("{}", serde_json::to_string_pretty(&results)?);
  } else {
    print_results(&results);
  }

  let failed = failing_checks(&results, strict);
  if !failed.is_empty() {
    return Err(ReleaseError::Validation(ValidationError::ChecksFailed { failed }));
  }

  Ok(())
}

/// Names of checks that fail the run
fn failing_checks(results: &[CheckResult], strict: bool) -> Vec<String> {
  results
    .iter()
    .filter(|r| r.is_error() || (strict && r.is_warning()))
    .map(|r| r.check_name.clone())
    .collect()
}

fn print_results(results: &[CheckResult]) {
  println!("🔎 Running release checks...\n");

  for result in results {
    let icon = match (result.passed, result.severity) {
      (true, _) => "✅",
      (false, Severity::Warning) => "⚠️ ",
      (false, _) => "❌",
    };
    println!("{} {}: {}", icon, result.check_name, result.message);

    if !result.passed
      && let Some(suggestion) = &result.suggestion
    {
      println!("   💡 Fix: {}", suggestion);
    }
  }

  let passed_count = results.iter().filter(|r| r.passed).count();
  let errors = results.iter().filter(|r| r.is_error()).count();
  let warnings = results.iter().filter(|r| r.is_warning()).count();

  println!();
  println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
  println!(
    "Summary: {}/{} checks passed ({} error(s), {} warning(s))",
    passed_count,
    results.len(),
    errors,
    warnings
  );

  if errors == 0 && warnings == 0 {
    println!("\n✨ Release process is consistent.");
  }
}
