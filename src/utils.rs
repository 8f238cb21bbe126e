//! Utility functions for cross-platform path handling

use std::path::Path;

/// Convert a path to Git format (always forward slashes)
///
/// Git expects paths with forward slashes, even on Windows.
pub fn path_to_git_format(path: &Path) -> String {
  #[cfg(target_os = "windows")]
  {
    path.to_string_lossy().replace('\\', "/")
  }
  #[cfg(not(target_os = "windows"))]
  {
    path.to_string_lossy().to_string()
  }
}

/// Whether `path` equals `dir` or lies below it, compared component-wise
pub fn is_within(path: &Path, dir: &Path) -> bool {
  dir.as_os_str().is_empty() || path.starts_with(dir)
}
