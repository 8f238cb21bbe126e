//! Integration tests for `cargo crux-release checklist`

use crate::helpers::{TestWorkspace, run_crux_release, stdout_json};
use anyhow::Result;

fn released_workspace() -> Result<TestWorkspace> {
  let ws = TestWorkspace::crux("0.3.8", "0.7.3", "0.7.0")?;
  ws.tag("crux_macros-v0.3.8")?;
  ws.tag("crux_core-v0.7.3")?;
  ws.tag("crux_http-v0.7.0")?;
  Ok(ws)
}

fn statuses(checklist: &serde_json::Value) -> Vec<String> {
  checklist["steps"]
    .as_array()
    .unwrap()
    .iter()
    .map(|s| s["status"].as_str().unwrap().to_string())
    .collect()
}

#[test]
fn test_checklist_nothing_pending() -> Result<()> {
  let ws = released_workspace()?;

  let output = run_crux_release(&ws.path, &["checklist", "--json"])?;
  let checklist = stdout_json(&output)?;

  assert_eq!(checklist["steps"].as_array().unwrap().len(), 5);
  assert_eq!(checklist["head"].as_str().unwrap().len(), 40);
  assert_eq!(statuses(&checklist), vec!["pending", "pending", "done", "done", "done"]);
  assert_eq!(checklist["steps"][0]["command"], "release-plz update");

  Ok(())
}

#[test]
fn test_checklist_breaking_release_in_progress() -> Result<()> {
  let ws = released_workspace()?;
  ws.set_version("crux_core", "0.8.0")?;
  ws.set_version("crux_http", "0.8.0")?;
  ws.commit("feat(core)!: new effect api")?;

  let output = run_crux_release(&ws.path, &["checklist", "--json"])?;
  let checklist = stdout_json(&output)?;

  assert_eq!(
    statuses(&checklist),
    vec!["done", "done", "pending", "pending", "pending"]
  );
  assert_eq!(
    checklist["steps"][2]["items"],
    serde_json::json!(["crux_core", "crux_http"])
  );
  assert_eq!(
    checklist["steps"][3]["items"],
    serde_json::json!(["crux_core-v0.8.0", "crux_http-v0.8.0"])
  );
  let notes_item = checklist["steps"][4]["items"][0].as_str().unwrap();
  assert!(notes_item.starts_with("crux_core-v0.8.0: breaking, notes required"), "item: {}", notes_item);

  Ok(())
}

#[test]
fn test_checklist_flags_under_classified_macros_bump() -> Result<()> {
  let ws = released_workspace()?;
  ws.modify_file("crux_macros", "src/lib.rs", "pub fn generated() -> u32 { 2 }\n")?;
  ws.set_version("crux_macros", "0.3.9")?;
  ws.commit("fix(macros): tweak derive output")?;

  let output = run_crux_release(&ws.path, &["checklist"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("📋 Release checklist for"), "stdout: {}", stdout);
  assert!(stdout.contains("2. Review breaking changes [attention]"), "stdout: {}", stdout);
  assert!(
    stdout.contains("crux_macros: 0.3.8 → 0.3.9 is patch, changes suggest minor (0.4.0)"),
    "stdout: {}",
    stdout
  );
  assert!(stdout.contains("4. Tag releases [pending]"), "stdout: {}", stdout);
  assert!(stdout.contains("need a decision"), "stdout: {}", stdout);

  Ok(())
}
