//! Check trait abstraction for release validations
//!
//! All checks implement the `Check` trait, so a new release rule is one new
//! type registered in the runner.

use crate::core::context::WorkspaceContext;
use crate::core::error::ReleaseResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level for check results
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
  /// Informational message (not an issue)
  Info,
  /// Warning (non-blocking, but should be addressed)
  Warning,
  /// Error (blocking, must be fixed)
  Error,
}

impl fmt::Display for Severity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Severity::Info => write!(f, "INFO"),
      Severity::Warning => write!(f, "WARN"),
      Severity::Error => write!(f, "ERROR"),
    }
  }
}

/// Result of running a check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
  /// Name of the check that ran
  pub check_name: String,
  /// Whether the check passed
  pub passed: bool,
  /// Severity level (if failed)
  pub severity: Severity,
  /// Human-readable message
  pub message: String,
  /// Optional suggested fix
  pub suggestion: Option<String>,
  /// Additional metadata (for JSON output)
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}

impl CheckResult {
  /// Create a passing check result
  pub fn pass(check_name: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      check_name: check_name.into(),
      passed: true,
      severity: Severity::Info,
      message: message.into(),
      suggestion: None,
      details: None,
    }
  }

  /// Create a failing check result with error severity
  pub fn error(
    check_name: impl Into<String>,
    message: impl Into<String>,
    suggestion: Option<impl Into<String>>,
  ) -> Self {
    Self {
      check_name: check_name.into(),
      passed: false,
      severity: Severity::Error,
      message: message.into(),
      suggestion: suggestion.map(|s| s.into()),
      details: None,
    }
  }

  /// Create a failing check result with warning severity
  pub fn warning(
    check_name: impl Into<String>,
    message: impl Into<String>,
    suggestion: Option<impl Into<String>>,
  ) -> Self {
    Self {
      check_name: check_name.into(),
      passed: false,
      severity: Severity::Warning,
      message: message.into(),
      suggestion: suggestion.map(|s| s.into()),
      details: None,
    }
  }

  /// Add details to the check result
  pub fn with_details(mut self, details: serde_json::Value) -> Self {
    self.details = Some(details);
    self
  }

  pub fn is_error(&self) -> bool {
    !self.passed && self.severity == Severity::Error
  }

  pub fn is_warning(&self) -> bool {
    !self.passed && self.severity == Severity::Warning
  }
}

/// Context passed to checks
#[derive(Clone, Copy)]
pub struct CheckContext<'a> {
  pub workspace: &'a WorkspaceContext,
  /// Restrict per-crate checks to one crate (None = all crates)
  pub crate_name: Option<&'a str>,
}

impl CheckContext<'_> {
  /// Whether per-crate checks should look at `name`
  pub fn includes(&self, name: &str) -> bool {
    self.crate_name.is_none_or(|c| c == name)
  }
}

/// Release check
///
/// # Example
///
/// ```rust,ignore
/// struct MyCheck;
///
/// impl Check for MyCheck {
///   fn name(&self) -> &str {
///     "my-custom-check"
///   }
///
///   fn description(&self) -> &str {
///     "Validates my custom requirement"
///   }
///
///   fn run(&self, ctx: &CheckContext) -> ReleaseResult<CheckResult> {
///     Ok(CheckResult::pass(self.name(), "All good!"))
///   }
/// }
/// ```
pub trait Check: Send + Sync {
  /// Unique name for this check (kebab-case)
  fn name(&self) -> &str;

  /// Human-readable description of what this check validates
  fn description(&self) -> &str;

  /// Run the check and return a result
  fn run(&self, ctx: &CheckContext<'_>) -> ReleaseResult<CheckResult>;

  /// Whether this check reads tags or history from git
  fn requires_git(&self) -> bool {
    false
  }
}
