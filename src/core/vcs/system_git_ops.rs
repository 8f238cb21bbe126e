//! Tag, diff and history operations for SystemGit

use super::CommitInfo;
use super::system_git::SystemGit;
use crate::core::error::{GitError, ReleaseError, ReleaseResult};
use crate::utils::path_to_git_format;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const FIELD_SEP: char = '\u{1f}';
const RECORD_SEP: char = '\u{1e}';

impl SystemGit {
  /// Every tag with the commit it points to
  ///
  /// One `for-each-ref` call; annotated tags are peeled to their commit.
  pub fn tag_targets(&self) -> ReleaseResult<BTreeMap<String, String>> {
    let stdout = self.run(&[
      "for-each-ref",
      "refs/tags",
      "--format=%(refname:short)%09%(objectname)%09%(*objectname)",
    ])?;

    let mut tags = BTreeMap::new();
    for line in stdout.lines() {
      let mut parts = line.split('\t');
      let (Some(name), Some(object)) = (parts.next(), parts.next()) else {
        continue;
      };
      let peeled = parts.next().filter(|p| !p.is_empty()).unwrap_or(object);
      tags.insert(name.to_string(), peeled.to_string());
    }

    Ok(tags)
  }

  /// Whether a tag exists
  pub fn tag_exists(&self, tag: &str) -> ReleaseResult<bool> {
    let output = self
      .git_cmd()
      .args(["rev-parse", "--verify", "--quiet", &format!("refs/tags/{}", tag)])
      .output()?;
    Ok(output.status.success())
  }

  /// Create an annotated tag at `rev`
  pub fn create_tag(&self, tag: &str, message: &str, rev: &str) -> ReleaseResult<()> {
    if self.tag_exists(tag)? {
      return Err(ReleaseError::Git(GitError::TagExists { tag: tag.to_string() }));
    }
    self.run(&["tag", "-a", tag, "-m", message, rev])?;
    Ok(())
  }

  /// Files changed between two revisions below `path`
  pub fn changed_files(&self, from: &str, to: &str, path: &Path) -> ReleaseResult<Vec<PathBuf>> {
    let pathspec = pathspec(path);
    let stdout = self.run(&["diff", "--name-only", "--relative", from, to, "--", &pathspec])?;
    Ok(
      stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(PathBuf::from)
        .collect(),
    )
  }

  /// Zero-context unified diff between two revisions below `path`
  pub fn diff(&self, from: &str, to: &str, path: &Path) -> ReleaseResult<String> {
    let pathspec = pathspec(path);
    self.run(&["diff", "--unified=0", "--relative", from, to, "--", &pathspec])
  }

  /// Commits in `from..to` touching `path`, newest first
  pub fn commits_between(&self, from: &str, to: &str, path: &Path) -> ReleaseResult<Vec<CommitInfo>> {
    self.log(&format!("{}..{}", from, to), path)
  }

  /// Every commit reachable from `to` touching `path`, newest first
  pub fn commits_until(&self, to: &str, path: &Path) -> ReleaseResult<Vec<CommitInfo>> {
    self.log(to, path)
  }

  fn log(&self, range: &str, path: &Path) -> ReleaseResult<Vec<CommitInfo>> {
    let pathspec = pathspec(path);
    let format = format!("--format=%H{}%B{}", FIELD_SEP, RECORD_SEP);
    let stdout = self.run(&["log", &format, range, "--", &pathspec])?;
    Ok(parse_log(&stdout))
  }
}

/// Pathspec for a directory relative to the repo path (`.` for the root itself)
fn pathspec(path: &Path) -> String {
  let spec = path_to_git_format(path);
  if spec.is_empty() { ".".to_string() } else { spec }
}

fn parse_log(stdout: &str) -> Vec<CommitInfo> {
  stdout
    .split(RECORD_SEP)
    .filter_map(|record| {
      let record = record.trim_start_matches(['\n', '\r']);
      let (sha, message) = record.split_once(FIELD_SEP)?;
      let sha = sha.trim();
      if sha.is_empty() {
        return None;
      }
      Some(CommitInfo {
        sha: sha.to_string(),
        message: message.trim().to_string(),
      })
    })
    .collect()
}
