//! Version bumps and Cargo semver compatibility

use semver::{Prerelease, Version};
use serde::Serialize;
use std::fmt;

/// Version bump kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionBump {
  /// No change
  None,
  /// Bug fixes only
  Patch,
  /// New features
  Minor,
  /// Major version bump
  Major,
}

impl VersionBump {
  /// Apply bump to a version
  pub fn apply(&self, version: &Version) -> Version {
    let mut new_version = version.clone();
    new_version.pre = Prerelease::EMPTY;
    match self {
      VersionBump::Major => {
        new_version.major += 1;
        new_version.minor = 0;
        new_version.patch = 0;
      }
      VersionBump::Minor => {
        new_version.minor += 1;
        new_version.patch = 0;
      }
      VersionBump::Patch => {
        new_version.patch += 1;
      }
      VersionBump::None => return version.clone(),
    }
    new_version
  }

  /// Which component changed between two versions
  ///
  /// Returns `None` when `to` is not above `from`. A pre-release on the same
  /// `major.minor.patch` counts as a patch.
  pub fn between(from: &Version, to: &Version) -> Self {
    if to <= from {
      return Self::None;
    }
    if to.major != from.major {
      Self::Major
    } else if to.minor != from.minor {
      Self::Minor
    } else {
      Self::Patch
    }
  }
}

impl fmt::Display for VersionBump {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      VersionBump::None => "none",
      VersionBump::Patch => "patch",
      VersionBump::Minor => "minor",
      VersionBump::Major => "major",
    };
    write!(f, "{}", s)
  }
}

/// The part of a version Cargo's default requirement operator keeps fixed
///
/// `^1.2.3` pins the major, `^0.2.3` pins the minor, `^0.0.3` pins the patch.
fn compatibility_key(version: &Version) -> (u64, u64, u64) {
  if version.major > 0 {
    (version.major, 0, 0)
  } else if version.minor > 0 {
    (0, version.minor, 0)
  } else {
    (0, 0, version.patch)
  }
}

/// Whether releasing `to` after `from` is a semver-breaking release
///
/// Breaking iff the left-most non-zero component changes. A move onto a
/// pre-release with a different compatibility key is also breaking; a
/// downgrade never is.
pub fn is_breaking(from: &Version, to: &Version) -> bool {
  if to <= from {
    return false;
  }
  compatibility_key(from) != compatibility_key(to)
}

/// The bump that makes a breaking release from `version`
pub fn required_bump_for_breaking(version: &Version) -> VersionBump {
  if version.major > 0 {
    VersionBump::Major
  } else if version.minor > 0 {
    VersionBump::Minor
  } else {
    VersionBump::Patch
  }
}
