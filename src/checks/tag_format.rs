//! Tag format check: every release tag is `<crate_name>-vX.Y.Z`
//!
//! Also verifies each release tag against the manifest version of its crate
//! at the tagged commit, so a tag cannot name a version that was never there.

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::error::ReleaseResult;
use crate::core::vcs::SystemGit;
use crate::release::tags::{ReleaseTag, ReleaseTags};
use semver::Version;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;

pub struct TagFormatCheck;

/// A release tag whose version differs from the manifest at the tagged commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionMismatch {
  pub tag: String,
  /// None when the manifest at the tagged commit has no readable version
  pub manifest_version: Option<Version>,
}

/// `package.version` of a manifest, following `version.workspace = true`
/// into the workspace manifest
///
/// `workspace_manifest` is only called for inherited versions. Its errors are
/// returned; an unreadable or versionless manifest is `Ok(None)`.
fn manifest_version(
  manifest: &str,
  workspace_manifest: impl FnOnce() -> ReleaseResult<Option<String>>,
) -> ReleaseResult<Option<Version>> {
  let Ok(doc) = manifest.parse::<toml_edit::DocumentMut>() else {
    return Ok(None);
  };
  let Some(version) = doc.get("package").and_then(|p| p.get("version")) else {
    return Ok(None);
  };

  if let Some(v) = version.as_str() {
    return Ok(Version::parse(v).ok());
  }

  if version.get("workspace").and_then(|w| w.as_bool()) != Some(true) {
    return Ok(None);
  }
  let Some(root) = workspace_manifest()? else {
    return Ok(None);
  };
  Ok(workspace_version(&root))
}

fn workspace_version(root: &str) -> Option<Version> {
  let doc: toml_edit::DocumentMut = root.parse().ok()?;
  let v = doc.get("workspace")?.get("package")?.get("version")?.as_str()?;
  Version::parse(v).ok()
}

/// Compare each release tag of a workspace crate with its manifest at the tag
fn manifest_mismatches(
  git: &SystemGit,
  tags: &ReleaseTags,
  crate_dir: impl Fn(&str) -> Option<std::path::PathBuf>,
  include: impl Fn(&str) -> bool,
) -> ReleaseResult<Vec<VersionMismatch>> {
  let mut mismatches = Vec::new();

  for tag in tags.all().filter(|t| include(&t.crate_name)) {
    let Some(dir) = crate_dir(&tag.crate_name) else {
      continue;
    };

    let Some(manifest) = git.read_file_at(&tag.commit_sha, &dir.join("Cargo.toml"))? else {
      tracing::debug!(tag = %tag.tag_name, "no manifest at tagged commit");
      continue;
    };

    let found = manifest_version(&manifest, || git.read_file_at(&tag.commit_sha, Path::new("Cargo.toml")))?;

    if found.as_ref() != Some(&tag.version) {
      mismatches.push(VersionMismatch {
        tag: tag.tag_name.clone(),
        manifest_version: found,
      });
    }
  }

  Ok(mismatches)
}

impl TagFormatCheck {
  fn evaluate(
    &self,
    tags: &ReleaseTags,
    workspace_crates: &BTreeSet<String>,
    mismatches: &[VersionMismatch],
    include: impl Fn(&str) -> bool,
  ) -> CheckResult {
    let releases: Vec<&ReleaseTag> = tags.all().filter(|t| include(&t.crate_name)).collect();
    let malformed: Vec<_> = tags.malformed().iter().filter(|t| include(&t.crate_name)).collect();
    let unknown: Vec<&str> = releases
      .iter()
      .filter(|t| !workspace_crates.contains(&t.crate_name))
      .map(|t| t.tag_name.as_str())
      .collect();
    let foreign = tags.foreign();

    let details = serde_json::json!({
      "release_tags": releases.len(),
      "malformed": malformed,
      "version_mismatches": mismatches,
      "unknown_crates": unknown,
      "foreign": foreign,
    });

    let mut errors = Vec::new();
    for tag in &malformed {
      errors.push(format!("'{}' has invalid version '{}'", tag.tag_name, tag.raw_version));
    }
    for mismatch in mismatches {
      match &mismatch.manifest_version {
        Some(v) => errors.push(format!("'{}' points at a commit where the manifest says {}", mismatch.tag, v)),
        None => errors.push(format!("'{}' points at a commit without a readable manifest version", mismatch.tag)),
      }
    }

    if !errors.is_empty() {
      return CheckResult::error(
        self.name(),
        errors.join("; "),
        Some("Release tags must be <crate_name>-vX.Y.Z on the commit that released that version"),
      )
      .with_details(details);
    }

    let mut warnings = Vec::new();
    if !unknown.is_empty() {
      warnings.push(format!("tags for unknown crates: {}", unknown.join(", ")));
    }
    // Foreign tags can't be attributed to a crate, so they only show up unfiltered
    if !foreign.is_empty() && workspace_crates.iter().all(|c| include(c)) {
      warnings.push(format!("tags not following <crate_name>-vX.Y.Z: {}", foreign.join(", ")));
    }

    if !warnings.is_empty() {
      return CheckResult::warning(
        self.name(),
        warnings.join("; "),
        Some("Add deliberate non-release tags to [tags] ignore in crux-release.toml"),
      )
      .with_details(details);
    }

    CheckResult::pass(
      self.name(),
      format!("{} release tag(s) follow <crate_name>-vX.Y.Z", releases.len()),
    )
    .with_details(details)
  }
}

impl Check for TagFormatCheck {
  fn name(&self) -> &'static str {
    "tag-format"
  }

  fn description(&self) -> &'static str {
    "Release tags are <crate_name>-vX.Y.Z and match the manifest at the tagged commit"
  }

  fn requires_git(&self) -> bool {
    true
  }

  fn run(&self, ctx: &CheckContext<'_>) -> ReleaseResult<CheckResult> {
    let workspace = ctx.workspace;
    let git = workspace.git()?;
    let tags = workspace.tags()?;

    let workspace_crates: BTreeSet<String> = workspace
      .metadata
      .list_crates()
      .iter()
      .map(|pkg| pkg.name.to_string())
      .collect();

    let crate_dir = |name: &str| {
      workspace
        .metadata
        .get_package(name)
        .map(|pkg| workspace.metadata.relative_crate_dir(pkg))
    };

    let mismatches = manifest_mismatches(git, tags, crate_dir, |name| ctx.includes(name))?;
    Ok(self.evaluate(tags, &workspace_crates, &mismatches, |name| ctx.includes(name)))
  }
}
