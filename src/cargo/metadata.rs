use crate::core::error::ReleaseResult;
use cargo_metadata::{MetadataCommand, Package};
use std::path::{Path, PathBuf};

/// Workspace introspection using cargo_metadata
#[derive(Clone)]
pub struct WorkspaceMetadata {
  metadata: cargo_metadata::Metadata,
}

impl WorkspaceMetadata {
  pub fn load(workspace_root: &Path) -> ReleaseResult<Self> {
    tracing::debug!(root = %workspace_root.display(), "running cargo metadata");
    let metadata = MetadataCommand::new()
      .manifest_path(workspace_root.join("Cargo.toml"))
      .no_deps()
      .exec()?;
    Ok(Self { metadata })
  }

  pub fn list_crates(&self) -> Vec<&Package> {
    self.metadata.workspace_packages()
  }

  pub fn get_package(&self, name: &str) -> Option<&Package> {
    self
      .metadata
      .workspace_packages()
      .into_iter()
      .find(|pkg| pkg.name == name)
  }

  pub fn workspace_root(&self) -> &Path {
    self.metadata.workspace_root.as_std_path()
  }

  /// Crate directory relative to the workspace root (e.g. `crux_core`)
  pub fn relative_crate_dir(&self, package: &Package) -> PathBuf {
    let manifest = package.manifest_path.as_std_path();
    let dir = manifest.parent().unwrap_or(manifest);
    dir
      .strip_prefix(self.workspace_root())
      .map(Path::to_path_buf)
      .unwrap_or_else(|_| dir.to_path_buf())
  }
}

/// Whether cargo would publish this package (`publish = false` opts out)
pub fn is_publishable(package: &Package) -> bool {
  !matches!(&package.publish, Some(registries) if registries.is_empty())
}
