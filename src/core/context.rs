//! Workspace context - build once, pass everywhere
//!
//! Metadata, config and the publish graph are loaded once in main.rs and
//! handed to every command and check by reference. Release tags are read
//! from git on first use and cached.

use crate::cargo::metadata::WorkspaceMetadata;
use crate::core::config::CruxConfig;
use crate::core::error::{GitError, ReleaseError, ReleaseResult};
use crate::core::vcs::SystemGit;
use crate::graph::PublishGraph;
use crate::release::notes::NotesSource;
use crate::release::review::{self, Review};
use crate::release::tags::ReleaseTags;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

/// Shared workspace-level data
pub struct WorkspaceContext {
  /// Workspace root directory (absolute path)
  pub root: PathBuf,

  pub metadata: WorkspaceMetadata,

  /// Publish graph over the publishable crates
  pub graph: Arc<PublishGraph>,

  /// Loaded config (defaults when no config file exists)
  pub config: Arc<CruxConfig>,

  /// None when the workspace is not inside a git repository
  git: Option<SystemGit>,

  tags: OnceLock<ReleaseTags>,
}

impl WorkspaceContext {
  /// Build the context for the workspace containing `start`
  pub fn build(start: &Path) -> ReleaseResult<Self> {
    let metadata = WorkspaceMetadata::load(start)?;
    let root = metadata.workspace_root().to_path_buf();
    let config = Arc::new(CruxConfig::load(&root)?);
    let graph = Arc::new(PublishGraph::from_metadata(&metadata, &config)?);

    let git = match SystemGit::open(&root) {
      Ok(git) => Some(git),
      Err(e) => {
        tracing::warn!(error = %e, "workspace is not a git repository; tag checks unavailable");
        None
      }
    };

    tracing::info!(root = %root.display(), crates = graph.len(), "workspace loaded");

    Ok(Self {
      root,
      metadata,
      graph,
      config,
      git,
      tags: OnceLock::new(),
    })
  }

  /// Git repository of the workspace, or an error when there is none
  pub fn git(&self) -> ReleaseResult<&SystemGit> {
    self.git.as_ref().ok_or_else(|| {
      ReleaseError::Git(GitError::RepoNotFound {
        path: self.root.clone(),
      })
    })
  }

  pub fn has_git(&self) -> bool {
    self.git.is_some()
  }

  /// Release tags of the repository (read once)
  pub fn tags(&self) -> ReleaseResult<&ReleaseTags> {
    if let Some(tags) = self.tags.get() {
      return Ok(tags);
    }
    let tags = ReleaseTags::collect(self.git()?, &self.config.tags)?;
    Ok(self.tags.get_or_init(|| tags))
  }

  /// Order crates are released in
  ///
  /// The derived publish order; name order when the graph has a cycle
  /// (the graph-cycles check reports it).
  pub fn release_order(&self) -> Vec<String> {
    match self.graph.publish_order() {
      Ok(order) => order,
      Err(e) => {
        tracing::warn!(error = %e, "no publish order, falling back to name order");
        self.graph.crates().iter().map(|c| c.name.clone()).collect()
      }
    }
  }

  pub fn notes_source(&self) -> NotesSource {
    NotesSource::from_config(&self.config, &self.root)
  }

  /// Pending releases and breaking-change findings at HEAD
  pub fn review(&self) -> ReleaseResult<Review> {
    let git = self.git()?;
    review::review(
      &self.graph,
      self.tags()?,
      &self.release_order(),
      git,
      &self.config.review,
    )
  }
}
