//! Error types for cargo-crux-release with contextual messages and exit codes
//!
//! Every error maps to an exit code. Config, git and validation errors carry
//! a help message pointing at the command or file that resolves them.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for cargo-crux-release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, missing files)
  User = 1,
  /// System error (git, cargo metadata, I/O)
  System = 2,
  /// Validation failure (release checks failed)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for cargo-crux-release
#[derive(Debug)]
pub enum ReleaseError {
  /// Configuration errors
  Config(ConfigError),

  /// Git operation errors
  Git(GitError),

  /// Release validation errors
  Validation(ValidationError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ReleaseError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context, help } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      ReleaseError::Io(err) => ReleaseError::Message {
        message: format!("I/O error: {}", err),
        context: Some(ctx_str),
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ReleaseError::Config(_) => ExitCode::User,
      ReleaseError::Git(_) => ExitCode::System,
      ReleaseError::Validation(_) => ExitCode::Validation,
      ReleaseError::Io(_) => ExitCode::System,
      ReleaseError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::Config(e) => e.help_message(),
      ReleaseError::Git(e) => e.help_message(),
      ReleaseError::Validation(e) => e.help_message(),
      ReleaseError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::Config(e) => write!(f, "{}", e),
      ReleaseError::Git(e) => write!(f, "{}", e),
      ReleaseError::Validation(e) => write!(f, "{}", e),
      ReleaseError::Io(e) => write!(f, "I/O error: {}", e),
      ReleaseError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ReleaseError {
  fn from(err: io::Error) -> Self {
    ReleaseError::Io(err)
  }
}

impl From<String> for ReleaseError {
  fn from(msg: String) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<&str> for ReleaseError {
  fn from(msg: &str) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<toml_edit::TomlError> for ReleaseError {
  fn from(err: toml_edit::TomlError) -> Self {
    ReleaseError::message(format!("TOML parse error: {}", err))
  }
}

impl From<toml_edit::de::Error> for ReleaseError {
  fn from(err: toml_edit::de::Error) -> Self {
    ReleaseError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<cargo_metadata::Error> for ReleaseError {
  fn from(err: cargo_metadata::Error) -> Self {
    ReleaseError::message(format!("Cargo metadata error: {}", err))
  }
}

impl From<serde_json::Error> for ReleaseError {
  fn from(err: serde_json::Error) -> Self {
    ReleaseError::message(format!("JSON error: {}", err))
  }
}

impl From<semver::Error> for ReleaseError {
  fn from(err: semver::Error) -> Self {
    ReleaseError::message(format!("Invalid semantic version: {}", err))
  }
}

impl From<std::string::FromUtf8Error> for ReleaseError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    ReleaseError::message(format!("UTF-8 conversion error: {}", err))
  }
}

impl From<anyhow::Error> for ReleaseError {
  fn from(err: anyhow::Error) -> Self {
    ReleaseError::message(err.to_string())
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Config file exists but holds an invalid value
  InvalidValue { path: PathBuf, reason: String },

  /// Crate named on the command line or in config is not a workspace crate
  CrateNotFound { name: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::InvalidValue { path, .. } => Some(format!("Fix the value in {}", path.display())),
      ConfigError::CrateNotFound { .. } => {
        Some("Run `cargo crux-release order` to list the publishable workspace crates.".to_string())
      }
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::InvalidValue { path, reason } => {
        write!(f, "Invalid configuration in {}: {}", path.display(), reason)
      }
      ConfigError::CrateNotFound { name } => {
        write!(f, "Crate '{}' is not a publishable workspace crate", name)
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Repository not found
  RepoNotFound { path: PathBuf },

  /// Tag already exists
  TagExists { tag: String },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::RepoNotFound { path } => Some(format!(
        "Run the command inside the workspace git repository (looked at {})",
        path.display()
      )),
      GitError::TagExists { tag } => Some(format!(
        "Tags are immutable. Bump the crate version instead of moving '{}'.",
        tag
      )),
      _ => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
      GitError::TagExists { tag } => {
        write!(f, "Tag already exists: {}", tag)
      }
    }
  }
}

/// Release validation errors
#[derive(Debug)]
pub enum ValidationError {
  /// The publish graph contains a dependency cycle
  DependencyCycle { crates: Vec<String> },

  /// One or more release checks failed
  ChecksFailed { failed: Vec<String> },
}

impl ValidationError {
  fn help_message(&self) -> Option<String> {
    match self {
      ValidationError::DependencyCycle { .. } => {
        Some("Break the cycle between the listed crates; they cannot be published in any order.".to_string())
      }
      ValidationError::ChecksFailed { .. } => {
        Some("Run `cargo crux-release check` for details on each failing check.".to_string())
      }
    }
  }
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ValidationError::DependencyCycle { crates } => {
        write!(f, "Circular dependency between crates: {}", crates.join(" → "))
      }
      ValidationError::ChecksFailed { failed } => {
        write!(f, "Release checks failed: {}", failed.join(", "))
      }
    }
  }
}

/// Result type alias for cargo-crux-release
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ReleaseError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
