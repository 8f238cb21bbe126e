//! Integration tests for `cargo crux-release check`

use crate::helpers::{TestWorkspace, run_crux_release, run_crux_release_raw, stdout_json};
use anyhow::Result;

/// Crux workspace with one released version of every crate, tagged at HEAD
fn released_workspace() -> Result<TestWorkspace> {
  let ws = TestWorkspace::crux("0.3.8", "0.7.3", "0.7.0")?;
  ws.tag("crux_macros-v0.3.8")?;
  ws.tag("crux_core-v0.7.3")?;
  ws.tag("crux_http-v0.7.0")?;
  Ok(ws)
}

fn result_for<'a>(results: &'a serde_json::Value, name: &str) -> &'a serde_json::Value {
  results
    .as_array()
    .and_then(|a| a.iter().find(|r| r["check_name"] == name))
    .unwrap_or(&serde_json::Value::Null)
}

#[test]
fn test_check_clean_workspace_passes() -> Result<()> {
  let ws = released_workspace()?;

  let output = run_crux_release(&ws.path, &["check"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("✅ graph-cycles"), "stdout: {}", stdout);
  assert!(stdout.contains("✅ tag-format"), "stdout: {}", stdout);
  assert!(stdout.contains("Summary: 6/6 checks passed"), "stdout: {}", stdout);

  Ok(())
}

#[test]
fn test_check_json_lists_every_check() -> Result<()> {
  let ws = released_workspace()?;

  let output = run_crux_release(&ws.path, &["check", "--json"])?;
  let results = stdout_json(&output)?;

  let names: Vec<&str> = results
    .as_array()
    .unwrap()
    .iter()
    .map(|r| r["check_name"].as_str().unwrap())
    .collect();
  assert_eq!(
    names,
    vec![
      "graph-cycles",
      "publish-order",
      "role-order",
      "tag-format",
      "release-notes",
      "version-review"
    ]
  );
  assert_eq!(
    result_for(&results, "publish-order")["details"]["order"],
    serde_json::json!(["crux_macros", "crux_core", "crux_http"])
  );

  Ok(())
}

#[test]
fn test_check_malformed_tag_fails() -> Result<()> {
  let ws = released_workspace()?;
  ws.tag("crux_core-v0.8")?;

  let output = run_crux_release_raw(&ws.path, &["check", "--only", "tag-format"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert_eq!(output.status.code(), Some(3));
  assert!(stdout.contains("'crux_core-v0.8' has invalid version '0.8'"), "stdout: {}", stdout);

  Ok(())
}

#[test]
fn test_check_tag_on_wrong_commit_fails() -> Result<()> {
  let ws = TestWorkspace::crux("0.3.8", "0.7.3", "0.7.0")?;
  // Tag names a version the manifest at HEAD doesn't have
  ws.tag("crux_core-v0.7.4")?;

  let output = run_crux_release_raw(&ws.path, &["check", "--only", "tag-format", "--json"])?;
  assert_eq!(output.status.code(), Some(3));

  let results = stdout_json(&output)?;
  let tag_format = result_for(&results, "tag-format");
  assert_eq!(tag_format["passed"], false);
  assert_eq!(tag_format["details"]["version_mismatches"][0]["tag"], "crux_core-v0.7.4");
  assert_eq!(tag_format["details"]["version_mismatches"][0]["manifest_version"], "0.7.3");

  Ok(())
}

#[test]
fn test_check_declared_order_violation() -> Result<()> {
  let ws = released_workspace()?;
  ws.write_file(
    "crux-release.toml",
    r#"[release]
publish_order = ["crux_core", "crux_macros", "crux_http"]
"#,
  )?;

  let output = run_crux_release_raw(&ws.path, &["check", "--only", "publish-order", "--only", "role-order"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert_eq!(output.status.code(), Some(3));
  assert!(
    stdout.contains("'crux_core' is published before its dependency 'crux_macros'"),
    "stdout: {}",
    stdout
  );
  assert!(stdout.contains("❌ role-order"), "stdout: {}", stdout);

  Ok(())
}

#[test]
fn test_check_breaking_release_needs_notes() -> Result<()> {
  let ws = released_workspace()?;
  ws.set_version("crux_core", "0.8.0")?;
  ws.commit("feat(core)!: split Effect trait")?;
  ws.tag("crux_core-v0.8.0")?;

  let output = run_crux_release_raw(&ws.path, &["check", "--only", "release-notes"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert_eq!(output.status.code(), Some(3));
  assert!(
    stdout.contains("crux_core-v0.8.0 (breaking since 0.7.3) has no release notes"),
    "stdout: {}",
    stdout
  );

  ws.write_file(
    "docs/release-notes/crux_core-v0.8.0.md",
    "# crux_core v0.8.0\n\n## Breaking changes\n\n- Effect is split in two\n",
  )?;
  run_crux_release(&ws.path, &["check", "--only", "release-notes"])?;

  Ok(())
}

#[test]
fn test_check_non_breaking_release_needs_no_notes() -> Result<()> {
  let ws = released_workspace()?;
  ws.set_version("crux_core", "0.7.4")?;
  ws.commit("fix(core): handle empty events")?;
  ws.tag("crux_core-v0.7.4")?;

  run_crux_release(&ws.path, &["check", "--only", "release-notes"])?;
  Ok(())
}

#[test]
fn test_check_version_review_warning_and_strict() -> Result<()> {
  let ws = released_workspace()?;
  ws.modify_file("crux_macros", "src/lib.rs", "pub fn generated() -> u32 { 2 }\n")?;
  ws.set_version("crux_macros", "0.3.9")?;
  ws.commit("fix(macros): change generated effect code")?;

  let output = run_crux_release(&ws.path, &["check", "--only", "version-review"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(
    stdout.contains("crux_macros 0.3.8 → 0.3.9 is a patch bump but code-generation macros changed"),
    "stdout: {}",
    stdout
  );
  assert!(stdout.contains("crux_macros = 0.4.0"), "stdout: {}", stdout);

  let strict = run_crux_release_raw(&ws.path, &["check", "--only", "version-review", "--strict"])?;
  assert_eq!(strict.status.code(), Some(3));

  Ok(())
}

#[test]
fn test_check_unknown_check_name() -> Result<()> {
  let ws = released_workspace()?;

  let output = run_crux_release_raw(&ws.path, &["check", "--only", "ssh-keys"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr.contains("Unknown check 'ssh-keys'"), "stderr: {}", stderr);

  Ok(())
}
