//! System git backend
//!
//! Uses git porcelain/plumbing commands through the `git` binary. Optimized for:
//! - Batch queries (one `for-each-ref` for every tag and its target)
//! - Safe subprocess execution (isolated environment)

use crate::core::error::{GitError, ReleaseError, ReleaseResult, ResultExt};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git backend using system git (zero crate dependencies)
pub struct SystemGit {
  /// Directory git commands run in (pathspecs are relative to it)
  pub(crate) repo_path: PathBuf,
}

impl SystemGit {
  /// Open a git repository
  pub fn open(path: &Path) -> ReleaseResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(ReleaseError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(ReleaseError::message(format!("Failed to open git repository: {}", stderr)));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    tracing::debug!(work_tree = stdout.trim(), "opened git repository");

    Ok(Self {
      repo_path: path.to_path_buf(),
    })
  }

  /// Get HEAD commit SHA
  pub fn head_commit(&self) -> ReleaseResult<String> {
    Ok(self.run(&["rev-parse", "HEAD"])?.trim().to_string())
  }

  /// Read a file at a specific revision
  ///
  /// `path` is relative to the directory the repository was opened at.
  /// Returns `None` if the file doesn't exist at that revision.
  pub fn read_file_at(&self, rev: &str, path: &Path) -> ReleaseResult<Option<String>> {
    let spec = format!("{}:./{}", rev, crate::utils::path_to_git_format(path));

    let output = self
      .git_cmd()
      .args(["show", &spec])
      .output()
      .context("Failed to read file from commit")?;

    if !output.status.success() {
      return Ok(None);
    }

    Ok(Some(String::from_utf8(output.stdout)?))
  }

  /// Run a git command and return stdout, mapping failures to `GitError::CommandFailed`
  pub(crate) fn run(&self, args: &[&str]) -> ReleaseResult<String> {
    tracing::debug!(args = ?args, "git");
    let output = self
      .git_cmd()
      .args(args)
      .output()
      .with_context(|| format!("Failed to run git {}", args.join(" ")))?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ReleaseError::Git(GitError::CommandFailed {
        command: format!("git {}", args.join(" ")),
        stderr: stderr.trim().to_string(),
      }));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables
  /// - Whitelists only PATH and HOME
  /// - Adds safe configuration overrides
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);

    // Isolated environment (don't trust global config)
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    cmd.arg("-c").arg("core.quotePath=false"); // Don't escape non-ASCII
    cmd.arg("-c").arg("diff.noprefix=false");
    cmd.arg("-c").arg("color.ui=never");

    cmd
  }
}
