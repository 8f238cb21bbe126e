//! Release notes: where they live, which releases need them, and drafts
//!
//! Every release of a notes crate (the core crate by default) that is a
//! breaking change relative to the previous release of the same crate must
//! have notes, and the notes must call the breaking change out.

use crate::core::config::{CruxConfig, NotesSourceKind};
use crate::core::error::{ReleaseError, ReleaseResult, ResultExt};
use crate::core::vcs::CommitInfo;
use crate::release::bump::is_breaking;
use crate::release::commits::{CommitType, ConventionalCommit};
use crate::release::review::BreakingReason;
use crate::release::tags::ReleaseTags;
use chrono::NaiveDate;
use semver::Version;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Where release notes are read from
#[derive(Debug, Clone)]
pub enum NotesSource {
  /// `<dir>/<tag>.md` files
  Directory(PathBuf),
  /// Hosted releases, read through the `gh` CLI from `repo`
  GitHub { repo: PathBuf },
}

impl NotesSource {
  /// Source configured for a workspace
  pub fn from_config(config: &CruxConfig, workspace_root: &Path) -> Self {
    match config.notes.source {
      NotesSourceKind::Dir => Self::Directory(workspace_root.join(&config.notes.dir)),
      NotesSourceKind::Github => Self::GitHub {
        repo: workspace_root.to_path_buf(),
      },
    }
  }

  /// Notes body for a tag, or None when no notes exist
  pub fn fetch(&self, tag: &str) -> ReleaseResult<Option<String>> {
    match self {
      NotesSource::Directory(dir) => {
        let path = notes_path(dir, tag);
        if !path.exists() {
          return Ok(None);
        }
        let body = std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Some(body))
      }
      NotesSource::GitHub { repo } => fetch_github(repo, tag),
    }
  }

  /// Human-readable location of the notes for a tag
  pub fn describe(&self, tag: &str) -> String {
    match self {
      NotesSource::Directory(dir) => notes_path(dir, tag).display().to_string(),
      NotesSource::GitHub { .. } => format!("GitHub release {}", tag),
    }
  }
}

/// Notes file for a tag inside a notes directory
pub fn notes_path(dir: &Path, tag: &str) -> PathBuf {
  dir.join(format!("{}.md", tag))
}

fn fetch_github(repo: &Path, tag: &str) -> ReleaseResult<Option<String>> {
  tracing::debug!(tag, "gh release view");
  let output = Command::new("gh")
    .current_dir(repo)
    .args(["release", "view", tag, "--json", "body"])
    .output()
    .map_err(|e| {
      ReleaseError::with_help(
        format!("Failed to run gh: {}", e),
        "Install the GitHub CLI (https://cli.github.com) or set notes.source = \"dir\"",
      )
    })?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if stderr.contains("release not found") || stderr.contains("Not Found") {
      return Ok(None);
    }
    return Err(ReleaseError::message(format!(
      "gh release view {} failed: {}",
      tag,
      stderr.trim()
    )));
  }

  #[derive(serde::Deserialize)]
  struct ReleaseView {
    body: Option<String>,
  }

  let view: ReleaseView = serde_json::from_slice(&output.stdout)?;
  Ok(view.body.filter(|b| !b.trim().is_empty()))
}

/// Whether the notes call out a breaking change
///
/// Counts a Markdown heading mentioning "breaking" (case-insensitive), or a
/// line led by `BREAKING` or `Breaking change(s):`, list and emphasis markers
/// aside. "no breaking", "non-breaking" and "not breaking" never count.
pub fn has_breaking_callout(body: &str) -> bool {
  body.lines().any(|line| {
    let line = line.trim();
    if line.starts_with('#') {
      return mentions_breaking(&line.trim_start_matches('#').to_lowercase());
    }

    let lead = line.trim_start_matches(['-', '*', '+', '>', '_', ' ']);
    if lead.starts_with("BREAKING") {
      return true;
    }
    let lower = lead.to_lowercase();
    lower
      .strip_prefix("breaking changes")
      .or_else(|| lower.strip_prefix("breaking change"))
      .is_some_and(|rest| rest.trim_start_matches(['*', '_', ' ']).starts_with(':'))
  })
}

/// `text` (lowercase) has a "breaking" not negated by the word before it
fn mentions_breaking(text: &str) -> bool {
  text.match_indices("breaking").any(|(i, _)| {
    let before = text[..i].trim_end_matches(['-', ' ']);
    let word = before.rsplit(|c: char| !c.is_alphanumeric()).next().unwrap_or("");
    !matches!(word, "no" | "non" | "not")
  })
}

/// Notes state of one release of a notes crate
#[derive(Debug, Clone, Serialize)]
pub struct NotesStatus {
  pub crate_name: String,
  pub tag: String,
  pub version: Version,
  pub previous: Option<Version>,
  /// Breaking relative to `previous`
  pub breaking: bool,
  pub present: bool,
  pub callout: bool,
  /// Where the notes are (or should be)
  pub location: String,
}

impl NotesStatus {
  /// Whether notes are required for this release
  pub fn required(&self) -> bool {
    self.breaking
  }

  /// Whether the release satisfies the notes requirement
  pub fn satisfied(&self) -> bool {
    !self.required() || (self.present && self.callout)
  }

  /// Build the status of `version` by looking at the notes source
  pub fn evaluate(
    crate_name: &str,
    version: &Version,
    previous: Option<&Version>,
    source: &NotesSource,
  ) -> ReleaseResult<Self> {
    let tag = crate::release::tags::ReleaseTag::format(crate_name, version);
    let breaking = previous.is_some_and(|p| is_breaking(p, version));

    // Only breaking releases need notes; skip the lookup otherwise
    let body = if breaking { source.fetch(&tag)? } else { None };

    Ok(Self {
      crate_name: crate_name.to_string(),
      location: source.describe(&tag),
      version: version.clone(),
      previous: previous.cloned(),
      breaking,
      present: body.is_some(),
      callout: body.as_deref().is_some_and(has_breaking_callout),
      tag,
    })
  }
}

/// Notes status of every tagged release of a crate, ascending by version
///
/// Each release is compared with its baseline tag, so a final release after
/// release candidates is breaking when it is breaking against the last stable.
pub fn evaluate_tags(tags: &ReleaseTags, crate_name: &str, source: &NotesSource) -> ReleaseResult<Vec<NotesStatus>> {
  let released = tags.for_crate(crate_name);
  let mut statuses = Vec::with_capacity(released.len());

  for tag in released {
    let previous = tags.baseline(crate_name, &tag.version).map(|t| &t.version);
    statuses.push(NotesStatus::evaluate(crate_name, &tag.version, previous, source)?);
  }

  Ok(statuses)
}

/// Markdown skeleton for a release's notes
#[derive(Debug, Clone)]
pub struct NotesDraft {
  pub crate_name: String,
  pub version: Version,
  pub previous: Option<Version>,
  pub date: NaiveDate,
  pub breaking: bool,
  /// Breaking changes from commits and review reasons
  pub breaking_items: Vec<String>,
  pub sections: BTreeMap<CommitType, Vec<String>>,
  /// Commits that don't follow the conventional format
  pub other: Vec<String>,
}

impl NotesDraft {
  pub fn new(crate_name: &str, version: &Version, previous: Option<&Version>, date: NaiveDate) -> Self {
    Self {
      crate_name: crate_name.to_string(),
      version: version.clone(),
      previous: previous.cloned(),
      date,
      breaking: previous.is_some_and(|p| is_breaking(p, version)),
      breaking_items: Vec::new(),
      sections: BTreeMap::new(),
      other: Vec::new(),
    }
  }

  /// Add commits (newest first, as git log lists them)
  pub fn add_commits(&mut self, commits: &[CommitInfo]) {
    for commit in commits.iter().rev() {
      match ConventionalCommit::parse(&commit.message) {
        Some(parsed) => {
          if let Some(text) = &parsed.breaking_change {
            let item = if text.is_empty() { parsed.summary() } else { text.clone() };
            self.breaking_items.push(item);
          }
          self.sections.entry(parsed.commit_type).or_default().push(parsed.summary());
        }
        None => {
          let subject = commit.message.lines().next().unwrap_or_default().trim();
          if !subject.is_empty() {
            self.other.push(subject.to_string());
          }
        }
      }
    }
  }

  /// Add breaking reasons found by the review
  pub fn add_reasons(&mut self, reasons: &[BreakingReason]) {
    for reason in reasons {
      if !matches!(reason, BreakingReason::BreakingCommit { .. }) {
        self.breaking_items.push(reason.to_string());
      }
    }
  }

  pub fn tag(&self) -> String {
    crate::release::tags::ReleaseTag::format(&self.crate_name, &self.version)
  }

  pub fn to_markdown(&self) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {} v{}", self.crate_name, self.version);
    let _ = writeln!(out);
    let _ = writeln!(out, "Released {}.", self.date.format("%Y-%m-%d"));
    if let Some(prev) = &self.previous {
      let _ = writeln!(out, "Changes since v{}.", prev);
    }
    let _ = writeln!(out);

    if self.breaking || !self.breaking_items.is_empty() {
      let _ = writeln!(out, "## Breaking changes");
      let _ = writeln!(out);
      if self.breaking_items.is_empty() {
        let _ = writeln!(out, "- _Describe the breaking changes and how to migrate._");
      }
      for item in &self.breaking_items {
        let _ = writeln!(out, "- {}", item);
      }
      let _ = writeln!(out);
    }

    for commit_type in CommitType::ORDERED {
      let Some(items) = self.sections.get(&commit_type) else {
        continue;
      };
      let _ = writeln!(out, "## {}", commit_type.display_name());
      let _ = writeln!(out);
      for item in items {
        let _ = writeln!(out, "- {}", item);
      }
      let _ = writeln!(out);
    }

    if !self.other.is_empty() {
      let _ = writeln!(out, "## Other changes");
      let _ = writeln!(out);
      for item in &self.other {
        let _ = writeln!(out, "- {}", item);
      }
      let _ = writeln!(out);
    }

    out
  }
}
