//! Breaking-change review for pending releases
//!
//! The version-bumping tool classifies bumps from the public API it can see.
//! It misses two kinds of breaking change in a crux workspace: changes to the
//! code-generation macros (they change what user code compiles to) and changes
//! to capability operation types (they change the shell/core protocol). This
//! module looks at what changed since each crate's last release tag and flags
//! pending releases whose version bump is not breaking although the changes
//! suggest it must be.

use crate::core::config::ReviewConfig;
use crate::core::error::ReleaseResult;
use crate::core::vcs::{CommitInfo, SystemGit};
use crate::graph::{CrateNode, CrateRole, PublishGraph};
use crate::release::bump::{VersionBump, is_breaking, required_bump_for_breaking};
use crate::release::commits::ConventionalCommit;
use crate::release::tags::{ReleaseTag, ReleaseTags};
use crate::utils::is_within;
use semver::Version;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Diff lines kept per operation-change reason
const MAX_SAMPLE_LINES: usize = 5;

/// Source of history for the review (git in production)
pub trait ChangeSource {
  /// Files changed since `since` below `dir` (paths relative to the workspace root)
  fn changed_files(&self, since: &str, dir: &Path) -> ReleaseResult<Vec<PathBuf>>;

  /// Zero-context diff since `since` below `dir`
  fn diff(&self, since: &str, dir: &Path) -> ReleaseResult<String>;

  /// Commits since `since` touching `dir`
  fn commits(&self, since: &str, dir: &Path) -> ReleaseResult<Vec<CommitInfo>>;
}

impl ChangeSource for SystemGit {
  fn changed_files(&self, since: &str, dir: &Path) -> ReleaseResult<Vec<PathBuf>> {
    SystemGit::changed_files(self, since, "HEAD", dir)
  }

  fn diff(&self, since: &str, dir: &Path) -> ReleaseResult<String> {
    SystemGit::diff(self, since, "HEAD", dir)
  }

  fn commits(&self, since: &str, dir: &Path) -> ReleaseResult<Vec<CommitInfo>> {
    self.commits_between(since, "HEAD", dir)
  }
}

/// A crate whose manifest version has no release tag yet
#[derive(Debug, Clone, Serialize)]
pub struct PendingRelease {
  pub crate_name: String,
  pub role: CrateRole,
  pub dir: PathBuf,
  /// Highest existing tag of the crate (None = first release)
  pub last_tag: Option<ReleaseTag>,
  /// Highest stable tag below `version`, pre-releases skipped
  pub baseline: Option<ReleaseTag>,
  /// Manifest version at HEAD
  pub version: Version,
  /// Bump from the baseline
  pub bump: VersionBump,
  /// Whether the bump is semver-breaking relative to the baseline
  pub breaking: bool,
}

impl PendingRelease {
  /// Tag this release will get
  pub fn tag_name(&self) -> String {
    ReleaseTag::format(&self.crate_name, &self.version)
  }

  /// Version compatibility is judged against
  pub fn previous_version(&self) -> Option<&Version> {
    self.baseline.as_ref().map(|t| &t.version)
  }
}

/// Why a release should be breaking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BreakingReason {
  /// Source of a code-generation macro crate changed
  MacroChange { files: Vec<PathBuf> },
  /// Diff lines touching capability operation types
  OperationChange { markers: Vec<String>, lines: Vec<String> },
  /// Files under a configured sensitive path changed
  SensitivePath { files: Vec<PathBuf> },
  /// A conventional commit marked breaking
  BreakingCommit { sha: String, summary: String },
}

impl fmt::Display for BreakingReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BreakingReason::MacroChange { files } => {
        write!(f, "code-generation macros changed ({} file(s))", files.len())
      }
      BreakingReason::OperationChange { markers, .. } => {
        write!(f, "capability operation types changed ({})", markers.join(", "))
      }
      BreakingReason::SensitivePath { files } => {
        write!(f, "sensitive paths changed ({} file(s))", files.len())
      }
      BreakingReason::BreakingCommit { sha, summary } => {
        let short = &sha[..sha.len().min(8)];
        write!(f, "breaking commit {}: {}", short, summary)
      }
    }
  }
}

/// A pending release whose bump looks under-classified
#[derive(Debug, Clone, Serialize)]
pub struct ReviewFinding {
  pub crate_name: String,
  pub from: Version,
  pub to: Version,
  pub bump: VersionBump,
  /// Bump that would make the release breaking
  pub required: VersionBump,
  /// Version a breaking release would get
  pub suggested_version: Version,
  pub reasons: Vec<BreakingReason>,
}

/// Result of reviewing every pending release
#[derive(Debug, Clone, Default, Serialize)]
pub struct Review {
  pub pending: Vec<PendingRelease>,
  pub findings: Vec<ReviewFinding>,
}

/// Crates whose manifest version differs from their latest tag, in `order`
///
/// A manifest version below the latest tag is not pending (the tag is ahead,
/// which the tag-format check reports). Bump and breaking are measured from
/// the baseline tag, so a final release after its release candidates compares
/// with the last stable release.
pub fn pending_releases(graph: &PublishGraph, tags: &ReleaseTags, order: &[String]) -> Vec<PendingRelease> {
  order
    .iter()
    .filter_map(|name| graph.node(name))
    .filter_map(|node| {
      let last_tag = tags.latest(&node.name).cloned();
      if last_tag.as_ref().is_some_and(|tag| tag.version >= node.version) {
        return None;
      }
      let baseline = tags.baseline(&node.name, &node.version).cloned();
      let (bump, breaking) = match &baseline {
        Some(tag) => (
          VersionBump::between(&tag.version, &node.version),
          is_breaking(&tag.version, &node.version),
        ),
        None => (VersionBump::None, false),
      };

      Some(PendingRelease {
        crate_name: node.name.clone(),
        role: node.role,
        dir: node.dir.clone(),
        last_tag,
        baseline,
        version: node.version.clone(),
        bump,
        breaking,
      })
    })
    .collect()
}

/// Reasons the changes to one crate since `since` call for a breaking release
pub fn breaking_reasons(
  source: &dyn ChangeSource,
  node: &CrateNode,
  since: &str,
  config: &ReviewConfig,
) -> ReleaseResult<Vec<BreakingReason>> {
  let mut reasons = Vec::new();
  let files = source.changed_files(since, &node.dir)?;

  if node.role == CrateRole::Macros {
    let src = node.dir.join("src");
    let changed: Vec<PathBuf> = files.iter().filter(|f| is_within(f, &src)).cloned().collect();
    if !changed.is_empty() {
      reasons.push(BreakingReason::MacroChange { files: changed });
    }
  }

  if !config.sensitive_paths.is_empty() {
    let changed: Vec<PathBuf> = files
      .iter()
      .filter(|f| config.sensitive_paths.iter().any(|p| is_within(f, p)))
      .cloned()
      .collect();
    if !changed.is_empty() {
      reasons.push(BreakingReason::SensitivePath { files: changed });
    }
  }

  if !config.operation_markers.is_empty() && !files.is_empty() {
    let diff = source.diff(since, &node.dir)?;
    if let Some(reason) = operation_change(&diff, &config.operation_markers) {
      reasons.push(reason);
    }
  }

  for commit in source.commits(since, &node.dir)? {
    if let Some(parsed) = ConventionalCommit::parse(&commit.message)
      && parsed.is_breaking()
    {
      reasons.push(BreakingReason::BreakingCommit {
        sha: commit.sha,
        summary: parsed.summary(),
      });
    }
  }

  Ok(reasons)
}

/// Added/removed diff lines containing an operation marker
fn operation_change(diff: &str, markers: &[String]) -> Option<BreakingReason> {
  let mut hit_markers: Vec<String> = Vec::new();
  let mut lines = Vec::new();

  for line in diff.lines() {
    if line.starts_with("+++") || line.starts_with("---") {
      continue;
    }
    if !(line.starts_with('+') || line.starts_with('-')) {
      continue;
    }

    let matched: Vec<&String> = markers.iter().filter(|m| line.contains(m.as_str())).collect();
    if matched.is_empty() {
      continue;
    }

    for marker in matched {
      if !hit_markers.contains(marker) {
        hit_markers.push(marker.clone());
      }
    }
    if lines.len() < MAX_SAMPLE_LINES {
      lines.push(line.trim_end().to_string());
    }
  }

  (!hit_markers.is_empty()).then_some(BreakingReason::OperationChange {
    markers: hit_markers,
    lines,
  })
}

/// Review every pending release against its changes since the baseline tag
///
/// First releases (no tag) have nothing to compare against and are skipped.
pub fn review(
  graph: &PublishGraph,
  tags: &ReleaseTags,
  order: &[String],
  source: &dyn ChangeSource,
  config: &ReviewConfig,
) -> ReleaseResult<Review> {
  let pending = pending_releases(graph, tags, order);
  let mut findings = Vec::new();

  for release in &pending {
    let Some(baseline) = &release.baseline else {
      tracing::debug!(crate_name = %release.crate_name, "first release, nothing to review");
      continue;
    };
    if release.breaking {
      continue;
    }
    let Some(node) = graph.node(&release.crate_name) else {
      continue;
    };

    let reasons = breaking_reasons(source, node, &baseline.commit_sha, config)?;
    if reasons.is_empty() {
      continue;
    }

    tracing::info!(
      crate_name = %release.crate_name,
      reasons = reasons.len(),
      "release may be under-classified"
    );

    let required = required_bump_for_breaking(&baseline.version);
    findings.push(ReviewFinding {
      crate_name: release.crate_name.clone(),
      from: baseline.version.clone(),
      to: release.version.clone(),
      bump: release.bump,
      required,
      suggested_version: required.apply(&baseline.version),
      reasons,
    });
  }

  Ok(Review { pending, findings })
}
