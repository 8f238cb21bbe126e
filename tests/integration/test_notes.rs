//! Integration tests for `cargo crux-release notes`

use crate::helpers::{TestWorkspace, run_crux_release, run_crux_release_raw};
use anyhow::Result;

/// crux_core bumped from 0.7.3 to 0.8.0 with two commits since the tag
fn breaking_core_workspace() -> Result<TestWorkspace> {
  let ws = TestWorkspace::crux("0.3.8", "0.7.3", "0.7.0")?;
  ws.tag("crux_macros-v0.3.8")?;
  ws.tag("crux_core-v0.7.3")?;
  ws.tag("crux_http-v0.7.0")?;

  ws.modify_file("crux_core", "src/lib.rs", "pub fn hello() -> String {\n    String::new()\n}\n")?;
  ws.commit("feat(core)!: return owned greeting")?;
  ws.set_version("crux_core", "0.8.0")?;
  ws.commit("fix(core): bump version")?;
  Ok(ws)
}

#[test]
fn test_notes_dry_run_prints_draft() -> Result<()> {
  let ws = breaking_core_workspace()?;

  let output = run_crux_release(&ws.path, &["notes", "crux_core"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("# crux_core v0.8.0"), "stdout: {}", stdout);
  assert!(stdout.contains("Changes since v0.7.3."), "stdout: {}", stdout);
  assert!(stdout.contains("## Breaking changes"), "stdout: {}", stdout);
  assert!(stdout.contains("## Features"), "stdout: {}", stdout);
  assert!(stdout.contains("- core: return owned greeting"), "stdout: {}", stdout);
  assert!(stdout.contains("## Bug Fixes"), "stdout: {}", stdout);
  assert!(stdout.contains("DRY RUN"), "stdout: {}", stdout);
  assert!(!ws.file_exists("docs/release-notes/crux_core-v0.8.0.md"));

  Ok(())
}

#[test]
fn test_notes_apply_writes_file_that_satisfies_check() -> Result<()> {
  let ws = breaking_core_workspace()?;
  ws.tag("crux_core-v0.8.0")?;

  // Tagged without notes: the notes check fails
  let output = run_crux_release_raw(&ws.path, &["check", "--only", "release-notes"])?;
  assert_eq!(output.status.code(), Some(3));

  // Tagged releases are no longer pending, so draft before tagging
  let ws = breaking_core_workspace()?;
  run_crux_release(&ws.path, &["notes", "crux_core", "--apply"])?;

  let notes = ws.read_file("docs/release-notes/crux_core-v0.8.0.md")?;
  assert!(notes.starts_with("# crux_core v0.8.0"), "notes: {}", notes);
  assert!(notes.contains("## Breaking changes"), "notes: {}", notes);

  ws.tag("crux_core-v0.8.0")?;
  run_crux_release(&ws.path, &["check", "--only", "release-notes"])?;

  Ok(())
}

#[test]
fn test_notes_apply_refuses_to_overwrite() -> Result<()> {
  let ws = breaking_core_workspace()?;
  ws.write_file("docs/release-notes/crux_core-v0.8.0.md", "# hand written\n")?;

  let output = run_crux_release_raw(&ws.path, &["notes", "crux_core", "--apply"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr.contains("Release notes already exist"), "stderr: {}", stderr);
  assert_eq!(ws.read_file("docs/release-notes/crux_core-v0.8.0.md")?, "# hand written\n");

  Ok(())
}

#[test]
fn test_notes_custom_directory() -> Result<()> {
  let ws = breaking_core_workspace()?;
  ws.write_file(
    "crux-release.toml",
    r#"[notes]
dir = "changes"
"#,
  )?;

  run_crux_release(&ws.path, &["notes", "crux_core", "--apply"])?;
  assert!(ws.file_exists("changes/crux_core-v0.8.0.md"));

  Ok(())
}

#[test]
fn test_notes_without_pending_release() -> Result<()> {
  let ws = breaking_core_workspace()?;

  let output = run_crux_release_raw(&ws.path, &["notes", "crux_http"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr.contains("crux_http 0.7.0 is already tagged"), "stderr: {}", stderr);

  Ok(())
}
