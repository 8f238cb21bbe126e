pub mod system_git;
mod system_git_ops;

pub use system_git::SystemGit;

/// A commit and its full message
#[derive(Debug, Clone)]
pub struct CommitInfo {
  pub sha: String,
  pub message: String,
}
