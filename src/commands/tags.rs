//! `cargo crux-release tags` / `tag` - inspect and create release tags
//!
//! `tag` is dry-run by default: it prints the annotated tags it would create
//! at HEAD and only creates them with `--apply`.

use crate::checks::{CheckContext, create_default_runner};
use crate::core::context::WorkspaceContext;
use crate::core::error::{ConfigError, ReleaseError, ReleaseResult, ValidationError};
use crate::release::review::{PendingRelease, pending_releases};
use crate::release::tags::ReleaseTag;
use serde::Serialize;

#[derive(Serialize)]
struct TagsReport<'a> {
  releases: Vec<&'a ReleaseTag>,
  malformed: Vec<String>,
  foreign: &'a [String],
  #[serde(skip_serializing_if = "Option::is_none")]
  pending: Option<Vec<String>>,
}

/// List release tags per crate
pub fn run_tags(ctx: &WorkspaceContext, json: bool, pending: bool) -> ReleaseResult<()> {
  let tags = ctx.tags()?;
  let pending_list = pending.then(|| {
    pending_releases(&ctx.graph, tags, &ctx.release_order())
      .iter()
      .map(PendingRelease::tag_name)
      .collect::<Vec<_>>()
  });

  if json {
    let report = TagsReport {
      releases: tags.all().collect(),
      malformed: tags.malformed().iter().map(|t| t.tag_name.clone()).collect(),
      foreign: tags.foreign(),
      pending: pending_list,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    return Ok(());
  }

  if let Some(list) = pending_list {
    if list.is_empty() {
      println!("✅ No tags to create: every crate version is tagged");
    } else {
      println!("🏷️  Tags to create at HEAD ({}):", list.len());
      for tag in &list {
        println!("  {}", tag);
      }
    }
    return Ok(());
  }

  let crates: Vec<&String> = tags.crates().collect();
  if crates.is_empty() {
    println!("No release tags found");
  }
  for crate_name in crates {
    let list = tags.for_crate(crate_name);
    println!("📦 {} ({} release(s))", crate_name, list.len());
    for tag in list {
      println!("  {}  {}", tag.tag_name, &tag.commit_sha[..tag.commit_sha.len().min(12)]);
    }
  }

  if !tags.malformed().is_empty() {
    println!("\n❌ Malformed release tags:");
    for tag in tags.malformed() {
      println!("  {} (version '{}' is not semver)", tag.tag_name, tag.raw_version);
    }
  }
  if !tags.foreign().is_empty() {
    println!("\n⚠️  Other tags: {}", tags.foreign().join(", "));
  }

  Ok(())
}

/// Create annotated tags at HEAD for pending releases, in publish order
pub fn run_tag(ctx: &WorkspaceContext, apply: bool, crate_name: Option<String>) -> ReleaseResult<()> {
  if let Some(name) = &crate_name
    && !ctx.graph.contains(name)
  {
    return Err(ReleaseError::Config(ConfigError::CrateNotFound { name: name.clone() }));
  }

  // Refuse to add tags on top of a tag history that is already broken
  let runner = create_default_runner().select(&["tag-format".to_string()])?;
  let results = runner.run_all(&CheckContext {
    workspace: ctx,
    crate_name: crate_name.as_deref(),
  });
  let failed: Vec<String> = results.iter().filter(|r| r.is_error()).map(|r| r.message.clone()).collect();
  if !failed.is_empty() {
    for message in &failed {
      eprintln!("❌ tag-format: {}", message);
    }
    return Err(ReleaseError::Validation(ValidationError::ChecksFailed {
      failed: vec!["tag-format".to_string()],
    }));
  }

  let git = ctx.git()?;
  let head = git.head_commit()?;
  let pending: Vec<PendingRelease> = pending_releases(&ctx.graph, ctx.tags()?, &ctx.release_order())
    .into_iter()
    .filter(|p| crate_name.as_deref().is_none_or(|c| c == p.crate_name))
    .collect();

  if pending.is_empty() {
    println!("✅ Nothing to tag: every crate version is already tagged");
    return Ok(());
  }

  let short_head = &head[..head.len().min(12)];
  if !apply {
    println!("🏷️  Would create {} tag(s) at {}:", pending.len(), short_head);
    for release in &pending {
      println!("  {}", release.tag_name());
    }
    println!("\nDRY RUN: re-run with --apply to create the tags");
    return Ok(());
  }

  for release in &pending {
    let tag = release.tag_name();
    let message = format!("{} {}", release.crate_name, release.version);
    git.create_tag(&tag, &message, &head)?;
    tracing::info!(tag = %tag, head = %short_head, "created tag");
    println!("🏷️  Created {}", tag);
  }

  println!("\n✅ Created {} tag(s) at {}", pending.len(), short_head);
  println!("   Push them with: git push origin --tags");
  Ok(())
}
