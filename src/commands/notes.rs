//! `cargo crux-release notes <crate>` - draft release notes
//!
//! Drafts Markdown notes for the pending release of a crate from the commits
//! since its last tag and the breaking-change review. Dry-run prints the
//! draft; `--apply` writes it to `<notes.dir>/<tag>.md`.

use crate::core::config::NotesSourceKind;
use crate::core::context::WorkspaceContext;
use crate::core::error::{ConfigError, ReleaseError, ReleaseResult, ResultExt};
use crate::release::notes::{NotesDraft, notes_path};
use crate::release::review::{breaking_reasons, pending_releases};
use chrono::Local;
use std::fs;

pub fn run_notes(ctx: &WorkspaceContext, crate_name: String, apply: bool) -> ReleaseResult<()> {
  let Some(node) = ctx.graph.node(&crate_name) else {
    return Err(ReleaseError::Config(ConfigError::CrateNotFound { name: crate_name }));
  };

  let git = ctx.git()?;
  let tags = ctx.tags()?;
  let Some(release) = pending_releases(&ctx.graph, tags, std::slice::from_ref(&crate_name)).pop() else {
    return Err(ReleaseError::with_help(
      format!("{} {} is already tagged; there is no pending release", node.name, node.version),
      format!("Run `{}` to bump versions first", ctx.config.release.bump_command),
    ));
  };

  let mut draft = NotesDraft::new(
    &release.crate_name,
    &release.version,
    release.previous_version(),
    Local::now().date_naive(),
  );

  match &release.baseline {
    Some(baseline) => {
      draft.add_commits(&git.commits_between(&baseline.commit_sha, "HEAD", &node.dir)?);
      draft.add_reasons(&breaking_reasons(git, node, &baseline.commit_sha, &ctx.config.review)?);
    }
    None => draft.add_commits(&git.commits_until("HEAD", &node.dir)?),
  }

  let markdown = draft.to_markdown();
  let tag = draft.tag();
  let path = notes_path(&ctx.root.join(&ctx.config.notes.dir), &tag);

  if !apply {
    println!("📝 Draft notes for {} ({})", tag, path.display());
    println!("════════════════════════════════════════");
    print!("{}", markdown);
    println!("════════════════════════════════════════");
    println!("DRY RUN: re-run with --apply to write the file");
    return Ok(());
  }

  if path.exists() {
    return Err(ReleaseError::with_help(
      format!("Release notes already exist at {}", path.display()),
      "Edit the existing file, or delete it to draft again",
    ));
  }

  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
  }
  fs::write(&path, &markdown).with_context(|| format!("Failed to write {}", path.display()))?;
  tracing::info!(path = %path.display(), "wrote release notes draft");

  println!("📝 Wrote {}", path.display());
  if ctx.config.notes.source == NotesSourceKind::Github {
    println!(
      "   Publish with: gh release create {} --title \"{} v{}\" --notes-file {}",
      tag,
      release.crate_name,
      release.version,
      path.display()
    );
  }

  Ok(())
}
