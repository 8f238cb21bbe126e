//! Release tags: `<crate_name>-vX.Y.Z`
//!
//! Parses every tag in the repository, groups release tags per crate and
//! keeps the tags that look like releases but carry an invalid version.

use crate::core::config::TagConfig;
use crate::core::error::ReleaseResult;
use crate::core::vcs::SystemGit;
use semver::Version;
use serde::Serialize;
use std::collections::BTreeMap;

/// A well-formed release tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseTag {
  /// Crate name
  pub crate_name: String,
  /// Version from tag
  pub version: Version,
  /// Full tag name (e.g., "crux_core-v0.7.3")
  pub tag_name: String,
  /// Commit SHA the tag points to
  pub commit_sha: String,
}

/// How a tag name relates to the release tag convention
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagShape {
  /// `<crate>-v<semver>`
  Release { crate_name: String, version: Version },
  /// `<crate>-v<something>` where the version is not valid semver
  BadVersion { crate_name: String, raw_version: String },
  /// Not a release tag at all (`v1.0.0`, `crux_core@v1.0.0`, ...)
  Foreign,
}

/// A tag shaped like a release whose version does not parse
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedTag {
  pub tag_name: String,
  pub crate_name: String,
  pub raw_version: String,
}

impl ReleaseTag {
  /// Classify a tag name
  ///
  /// The crate/version split is at the LAST `-v` followed by a digit, so crate
  /// names containing `-v` (e.g. `my-vault`) still parse.
  pub fn classify(tag_name: &str) -> TagShape {
    let split = tag_name
      .match_indices("-v")
      .map(|(pos, _)| pos)
      .filter(|&pos| {
        tag_name[pos + 2..]
          .chars()
          .next()
          .is_some_and(|c| c.is_ascii_digit())
      })
      .last();

    let Some(pos) = split else {
      return TagShape::Foreign;
    };

    let crate_name = &tag_name[..pos];
    let raw_version = &tag_name[pos + 2..];

    if !is_valid_crate_name(crate_name) {
      return TagShape::Foreign;
    }

    match Version::parse(raw_version) {
      Ok(version) => TagShape::Release {
        crate_name: crate_name.to_string(),
        version,
      },
      Err(_) => TagShape::BadVersion {
        crate_name: crate_name.to_string(),
        raw_version: raw_version.to_string(),
      },
    }
  }

  /// Parse a well-formed release tag (commit SHA left empty)
  pub fn parse(tag_name: &str) -> Option<Self> {
    match Self::classify(tag_name) {
      TagShape::Release { crate_name, version } => Some(Self {
        crate_name,
        version,
        tag_name: tag_name.to_string(),
        commit_sha: String::new(),
      }),
      _ => None,
    }
  }

  /// Format tag name for a crate release
  pub fn format(crate_name: &str, version: &Version) -> String {
    format!("{}-v{}", crate_name, version)
  }
}

fn is_valid_crate_name(name: &str) -> bool {
  !name.is_empty()
    && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    && name.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
}

/// All tags of a repository, sorted into release tags per crate
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReleaseTags {
  /// Release tags per crate, ascending by version
  by_crate: BTreeMap<String, Vec<ReleaseTag>>,
  malformed: Vec<MalformedTag>,
  foreign: Vec<String>,
}

impl ReleaseTags {
  /// Read every tag from the repository
  pub fn collect(git: &SystemGit, config: &TagConfig) -> ReleaseResult<Self> {
    let targets = git.tag_targets()?;
    tracing::debug!(count = targets.len(), "collected tags");
    Ok(Self::from_targets(targets, config))
  }

  /// Build from `tag name → commit` pairs
  pub fn from_targets(targets: BTreeMap<String, String>, config: &TagConfig) -> Self {
    let mut tags = Self::default();

    for (tag_name, commit_sha) in targets {
      if config.is_ignored(&tag_name) {
        tracing::debug!(tag = %tag_name, "ignoring tag");
        continue;
      }

      match ReleaseTag::classify(&tag_name) {
        TagShape::Release { crate_name, version } => {
          tags.by_crate.entry(crate_name.clone()).or_default().push(ReleaseTag {
            crate_name,
            version,
            tag_name,
            commit_sha,
          });
        }
        TagShape::BadVersion {
          crate_name,
          raw_version,
        } => tags.malformed.push(MalformedTag {
          tag_name,
          crate_name,
          raw_version,
        }),
        TagShape::Foreign => tags.foreign.push(tag_name),
      }
    }

    for list in tags.by_crate.values_mut() {
      list.sort_by(|a, b| a.version.cmp(&b.version));
    }

    tags
  }

  /// Release tags of a crate, ascending by version
  pub fn for_crate(&self, crate_name: &str) -> &[ReleaseTag] {
    self.by_crate.get(crate_name).map(Vec::as_slice).unwrap_or_default()
  }

  /// Highest released version of a crate
  pub fn latest(&self, crate_name: &str) -> Option<&ReleaseTag> {
    self.for_crate(crate_name).last()
  }

  /// Highest tag of a crate strictly below `version`
  pub fn previous(&self, crate_name: &str, version: &Version) -> Option<&ReleaseTag> {
    self.for_crate(crate_name).iter().rev().find(|t| &t.version < version)
  }

  /// Tag that semver compatibility of `version` is judged against
  ///
  /// The highest stable tag below `version`; pre-release tags in between are
  /// skipped, so `0.8.0` after `0.8.0-rc.1` compares with `0.7.x`. Falls back
  /// to the previous pre-release when the crate has no stable tag below.
  pub fn baseline(&self, crate_name: &str, version: &Version) -> Option<&ReleaseTag> {
    self
      .for_crate(crate_name)
      .iter()
      .rev()
      .find(|t| t.version.pre.is_empty() && &t.version < version)
      .or_else(|| self.previous(crate_name, version))
  }

  /// Crate names that have at least one release tag
  pub fn crates(&self) -> impl Iterator<Item = &String> {
    self.by_crate.keys()
  }

  /// Every release tag, grouped by crate
  pub fn all(&self) -> impl Iterator<Item = &ReleaseTag> {
    self.by_crate.values().flatten()
  }

  pub fn malformed(&self) -> &[MalformedTag] {
    &self.malformed
  }

  pub fn foreign(&self) -> &[String] {
    &self.foreign
  }
}
