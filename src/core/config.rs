use crate::core::error::{ConfigError, ReleaseError, ReleaseResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for cargo-crux-release
///
/// Searched in order: crux-release.toml, .crux-release.toml, .cargo/crux-release.toml,
/// .config/crux-release.toml. Every section is optional; a workspace without a config
/// file gets the defaults for the crux layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CruxConfig {
  #[serde(default)]
  pub release: ReleaseConfig,
  #[serde(default)]
  pub tags: TagConfig,
  #[serde(default)]
  pub notes: NotesConfig,
  #[serde(default)]
  pub review: ReviewConfig,

  /// File the config was loaded from (None = defaults)
  #[serde(skip)]
  pub source: Option<PathBuf>,
}

/// Which crates are released, and how
///
/// # Example
///
/// ```toml
/// [release]
/// core = "crux_core"
/// macros = ["crux_macros"]
/// exclude = ["counter_example"]
/// publish_order = ["crux_macros", "crux_core", "crux_http", "crux_kv"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseConfig {
  /// The core crate every capability crate depends on
  #[serde(default = "default_core")]
  pub core: String,

  /// Code-generation macro crates (empty = crates named `*_macros`)
  #[serde(default)]
  pub macros: Vec<String>,

  /// Capability crates (empty = crates depending on the core crate)
  #[serde(default)]
  pub capabilities: Vec<String>,

  /// Crates that are never published (in addition to `publish = false`)
  #[serde(default)]
  pub exclude: Vec<String>,

  /// Declared publish order, mirroring the publish script
  #[serde(default)]
  pub publish_order: Option<Vec<String>>,

  /// Publish script shown in the checklist
  #[serde(default = "default_publish_script")]
  pub publish_script: String,

  /// Version-bumping command shown in the checklist
  #[serde(default = "default_bump_command")]
  pub bump_command: String,
}

fn default_core() -> String {
  "crux_core".to_string()
}

fn default_publish_script() -> String {
  "./publish.sh".to_string()
}

fn default_bump_command() -> String {
  "release-plz update".to_string()
}

impl Default for ReleaseConfig {
  fn default() -> Self {
    Self {
      core: default_core(),
      macros: Vec::new(),
      capabilities: Vec::new(),
      exclude: Vec::new(),
      publish_order: None,
      publish_script: default_publish_script(),
      bump_command: default_bump_command(),
    }
  }
}

impl ReleaseConfig {
  /// Whether a crate is a code-generation macro crate
  pub fn is_macros(&self, name: &str) -> bool {
    if self.macros.is_empty() {
      name.ends_with("_macros") || name.ends_with("-macros")
    } else {
      self.macros.iter().any(|m| m == name)
    }
  }

  /// Whether a crate is excluded from publishing by config
  pub fn is_excluded(&self, name: &str) -> bool {
    self.exclude.iter().any(|e| e == name)
  }
}

/// Tag checking configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagConfig {
  /// Tags skipped by the tag-format check (exact name or trailing `*` prefix)
  #[serde(default)]
  pub ignore: Vec<String>,
}

impl TagConfig {
  /// Check whether a tag matches one of the ignore patterns
  pub fn is_ignored(&self, tag: &str) -> bool {
    self.ignore.iter().any(|pattern| match pattern.strip_suffix('*') {
      Some(prefix) => tag.starts_with(prefix),
      None => tag == pattern,
    })
  }
}

/// Where release notes are read from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotesSourceKind {
  /// Markdown files in `notes.dir`, one per tag
  #[default]
  Dir,
  /// Hosted releases, read with the `gh` CLI
  Github,
}

/// Release notes configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesConfig {
  /// Crates that get a hosted release with notes (empty = the core crate)
  #[serde(default)]
  pub crates: Vec<String>,

  #[serde(default)]
  pub source: NotesSourceKind,

  /// Directory holding `<tag>.md` notes files (relative to workspace root)
  #[serde(default = "default_notes_dir")]
  pub dir: PathBuf,
}

fn default_notes_dir() -> PathBuf {
  PathBuf::from("docs/release-notes")
}

impl Default for NotesConfig {
  fn default() -> Self {
    Self {
      crates: Vec::new(),
      source: NotesSourceKind::default(),
      dir: default_notes_dir(),
    }
  }
}

/// Breaking-change review configuration
///
/// The version-bumping tool misses breaking changes in generated code and in
/// capability operation types; these settings tell the review what to look for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewConfig {
  /// Substrings of added/removed diff lines that mark an operation type change
  #[serde(default = "default_operation_markers")]
  pub operation_markers: Vec<String>,

  /// Paths (relative to workspace root) whose changes always need a breaking bump
  #[serde(default)]
  pub sensitive_paths: Vec<PathBuf>,
}

fn default_operation_markers() -> Vec<String> {
  vec![
    "Operation for".to_string(),
    "type Output".to_string(),
    "type Operation".to_string(),
  ]
}

impl Default for ReviewConfig {
  fn default() -> Self {
    Self {
      operation_markers: default_operation_markers(),
      sensitive_paths: Vec::new(),
    }
  }
}

impl CruxConfig {
  /// Find config file in search order
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("crux-release.toml"),
      path.join(".crux-release.toml"),
      path.join(".cargo").join("crux-release.toml"),
      path.join(".config").join("crux-release.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config, falling back to defaults when no file exists
  pub fn load(path: &Path) -> ReleaseResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      tracing::debug!(root = %path.display(), "no config file found, using defaults");
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let mut config: CruxConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config.validate().map_err(|reason| {
      ReleaseError::Config(ConfigError::InvalidValue {
        path: config_path.clone(),
        reason,
      })
    })?;

    tracing::debug!(path = %config_path.display(), "loaded config");
    config.source = Some(config_path);
    Ok(config)
  }

  /// Validate field values serde cannot check
  pub fn validate(&self) -> Result<(), String> {
    if self.release.core.trim().is_empty() {
      return Err("release.core must name a crate".to_string());
    }

    if let Some(order) = &self.release.publish_order
      && order.is_empty()
    {
      return Err("release.publish_order is empty; remove it to use the derived order".to_string());
    }

    if self.tags.ignore.iter().any(|p| p.trim().is_empty() || p == "*") {
      return Err("tags.ignore patterns must be non-empty and must not ignore every tag".to_string());
    }

    if self.review.operation_markers.iter().any(|m| m.trim().is_empty()) {
      return Err("review.operation_markers must not contain empty markers".to_string());
    }

    Ok(())
  }

  /// Crates that get a hosted release with notes
  pub fn notes_crates(&self) -> Vec<String> {
    if self.notes.crates.is_empty() {
      vec![self.release.core.clone()]
    } else {
      self.notes.crates.clone()
    }
  }
}
