//! Integration tests for `cargo crux-release tags` and `tag`

use crate::helpers::{TestWorkspace, run_crux_release, run_crux_release_raw, stdout_json};
use anyhow::Result;

/// Released crux workspace with a pending core and capability release
fn bumped_workspace() -> Result<TestWorkspace> {
  let ws = TestWorkspace::crux("0.3.8", "0.7.3", "0.7.0")?;
  ws.tag("crux_macros-v0.3.8")?;
  ws.tag("crux_core-v0.7.3")?;
  ws.tag("crux_http-v0.7.0")?;

  ws.set_version("crux_core", "0.7.4")?;
  ws.set_version("crux_http", "0.7.1")?;
  ws.commit("fix(core): handle empty events")?;
  Ok(ws)
}

#[test]
fn test_tags_json_groups_release_tags() -> Result<()> {
  let ws = bumped_workspace()?;
  ws.tag("nightly")?;

  let output = run_crux_release(&ws.path, &["tags", "--json"])?;
  let report = stdout_json(&output)?;

  let releases = report["releases"].as_array().unwrap();
  assert_eq!(releases.len(), 3);
  assert!(
    releases
      .iter()
      .any(|t| t["crate_name"] == "crux_core" && t["version"] == "0.7.3")
  );
  assert_eq!(report["foreign"], serde_json::json!(["nightly"]));
  assert!(report.get("pending").is_none());

  Ok(())
}

#[test]
fn test_tags_pending_in_publish_order() -> Result<()> {
  let ws = bumped_workspace()?;

  let output = run_crux_release(&ws.path, &["tags", "--pending", "--json"])?;
  let report = stdout_json(&output)?;
  assert_eq!(
    report["pending"],
    serde_json::json!(["crux_core-v0.7.4", "crux_http-v0.7.1"])
  );

  let output = run_crux_release(&ws.path, &["tags", "--pending"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Tags to create at HEAD (2)"), "stdout: {}", stdout);

  Ok(())
}

#[test]
fn test_tag_dry_run_creates_nothing() -> Result<()> {
  let ws = bumped_workspace()?;
  let before = ws.tags()?;

  let output = run_crux_release(&ws.path, &["tag"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("Would create 2 tag(s)"), "stdout: {}", stdout);
  assert!(stdout.contains("crux_core-v0.7.4"), "stdout: {}", stdout);
  assert!(stdout.contains("DRY RUN"), "stdout: {}", stdout);
  assert_eq!(ws.tags()?, before);

  Ok(())
}

#[test]
fn test_tag_apply_creates_pending_tags() -> Result<()> {
  let ws = bumped_workspace()?;

  run_crux_release(&ws.path, &["tag", "--apply"])?;

  let tags = ws.tags()?;
  assert!(tags.contains(&"crux_core-v0.7.4".to_string()));
  assert!(tags.contains(&"crux_http-v0.7.1".to_string()));
  assert_eq!(tags.len(), 5);

  // A second run has nothing left to do
  let output = run_crux_release(&ws.path, &["tag", "--apply"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Nothing to tag"), "stdout: {}", stdout);

  Ok(())
}

#[test]
fn test_tag_single_crate() -> Result<()> {
  let ws = bumped_workspace()?;

  run_crux_release(&ws.path, &["tag", "--apply", "--crate", "crux_core"])?;

  let tags = ws.tags()?;
  assert!(tags.contains(&"crux_core-v0.7.4".to_string()));
  assert!(!tags.contains(&"crux_http-v0.7.1".to_string()));

  Ok(())
}

#[test]
fn test_tag_refuses_with_malformed_tags() -> Result<()> {
  let ws = bumped_workspace()?;
  ws.tag("crux_core-v0.7")?;

  let output = run_crux_release_raw(&ws.path, &["tag", "--apply"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(3));
  assert!(stderr.contains("tag-format"), "stderr: {}", stderr);
  assert!(!ws.tags()?.contains(&"crux_core-v0.7.4".to_string()));

  Ok(())
}

#[test]
fn test_tag_unknown_crate() -> Result<()> {
  let ws = bumped_workspace()?;

  let output = run_crux_release_raw(&ws.path, &["tag", "--crate", "crux_nope"])?;
  assert_eq!(output.status.code(), Some(1));

  Ok(())
}
