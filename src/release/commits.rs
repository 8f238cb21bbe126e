//! Conventional commit parsing
//!
//! Uses winnow for parsing (not regex). Commits that do not follow the
//! convention simply don't parse.

use serde::Serialize;
use std::fmt;

/// A parsed conventional commit
///
/// Format: `<type>(<scope>)!: <description>`
///
/// Example: `feat(http)!: return headers from requests`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionalCommit {
  pub commit_type: CommitType,
  pub scope: Option<String>,
  pub description: String,
  pub body: Option<String>,
  /// `Some("")` for a bare `!`, `Some(text)` for a `BREAKING CHANGE:` footer
  pub breaking_change: Option<String>,
  /// Other footers (e.g., "Closes #123")
  pub footers: Vec<(String, String)>,
}

/// Conventional commit types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
  Feat,
  Fix,
  Perf,
  Docs,
  Refactor,
  Test,
  Build,
  Ci,
  Chore,
  Style,
  Revert,
  Other,
}

impl CommitType {
  /// Every type, in the order release notes list them
  pub const ORDERED: [CommitType; 12] = [
    CommitType::Feat,
    CommitType::Fix,
    CommitType::Perf,
    CommitType::Docs,
    CommitType::Refactor,
    CommitType::Test,
    CommitType::Build,
    CommitType::Ci,
    CommitType::Chore,
    CommitType::Style,
    CommitType::Revert,
    CommitType::Other,
  ];

  /// Parse commit type from its conventional keyword
  pub fn from_keyword(s: &str) -> Self {
    match s.to_lowercase().as_str() {
      "feat" | "feature" => Self::Feat,
      "fix" => Self::Fix,
      "docs" | "doc" => Self::Docs,
      "style" => Self::Style,
      "refactor" => Self::Refactor,
      "perf" | "performance" => Self::Perf,
      "test" | "tests" => Self::Test,
      "build" => Self::Build,
      "ci" => Self::Ci,
      "chore" => Self::Chore,
      "revert" => Self::Revert,
      _ => Self::Other,
    }
  }

  pub fn display_name(&self) -> &'static str {
    match self {
      Self::Feat => "Features",
      Self::Fix => "Bug Fixes",
      Self::Docs => "Documentation",
      Self::Style => "Style",
      Self::Refactor => "Refactoring",
      Self::Perf => "Performance",
      Self::Test => "Tests",
      Self::Build => "Build",
      Self::Ci => "CI",
      Self::Chore => "Chores",
      Self::Revert => "Reverts",
      Self::Other => "Other",
    }
  }
}

impl fmt::Display for CommitType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.display_name())
  }
}

impl ConventionalCommit {
  pub fn is_breaking(&self) -> bool {
    self.breaking_change.is_some()
  }

  /// One-line summary: `scope: description`
  pub fn summary(&self) -> String {
    match &self.scope {
      Some(scope) => format!("{}: {}", scope, self.description),
      None => self.description.clone(),
    }
  }

  /// Parse a conventional commit from a git commit message
  ///
  /// Returns None if the message doesn't follow conventional commit format.
  pub fn parse(message: &str) -> Option<Self> {
    use winnow::ascii::{alphanumeric1, space0};
    use winnow::combinator::{opt, preceded, terminated};
    use winnow::prelude::*;
    use winnow::token::take_till;

    let (first_line, rest) = message.split_once('\n').unwrap_or((message, ""));

    let mut parser = (
      alphanumeric1::<_, ()>.map(CommitType::from_keyword),
      opt(preceded('(', terminated(take_till(1.., ')'), ')'))),
      opt('!'),
      ':',
      space0,
      take_till(0.., ['\n', '\r']),
    );

    let Ok((commit_type, scope, bang, _, _, description)) = parser.parse(first_line.trim_end()) else {
      return None;
    };

    let description = description.trim();
    if description.is_empty() {
      return None;
    }

    let mut body_lines = Vec::new();
    let mut breaking_change = None;
    let mut footers = Vec::new();
    let mut in_body = true;
    let mut seen_empty_line = false;

    for line in rest.lines() {
      let trimmed = line.trim();

      if trimmed.is_empty() {
        seen_empty_line = true;
        continue;
      }

      // Footers only after a blank line
      if seen_empty_line && let Some((key, value)) = trimmed.split_once(':') {
        let key = key.trim();
        let value = value.trim();

        if key.eq_ignore_ascii_case("BREAKING CHANGE") || key.eq_ignore_ascii_case("BREAKING-CHANGE") {
          breaking_change = Some(value.to_string());
          in_body = false;
          continue;
        } else if key.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_') {
          footers.push((key.to_string(), value.to_string()));
          in_body = false;
          continue;
        }
      }

      if in_body {
        body_lines.push(line);
        seen_empty_line = false;
      }
    }

    if breaking_change.is_none() && bang.is_some() {
      breaking_change = Some(String::new());
    }

    Some(Self {
      commit_type,
      scope: scope.map(|s: &str| s.to_string()),
      description: description.to_string(),
      body: (!body_lines.is_empty()).then(|| body_lines.join("\n")),
      breaking_change,
      footers,
    })
  }
}
