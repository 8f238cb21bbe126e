//! Integration tests for `cargo crux-release order`

use crate::helpers::{TestWorkspace, run_crux_release, stdout_json};
use anyhow::Result;

#[test]
fn test_order_json_follows_dependencies() -> Result<()> {
  let ws = TestWorkspace::crux("0.3.8", "0.7.3", "0.7.0")?;

  let output = run_crux_release(&ws.path, &["order", "--json"])?;
  let report = stdout_json(&output)?;

  let order: Vec<(&str, &str)> = report["order"]
    .as_array()
    .unwrap()
    .iter()
    .map(|e| (e["name"].as_str().unwrap(), e["role"].as_str().unwrap()))
    .collect();
  assert_eq!(
    order,
    vec![
      ("crux_macros", "macros"),
      ("crux_core", "core"),
      ("crux_http", "capability")
    ]
  );
  assert_eq!(report["order"][1]["dependencies"], serde_json::json!(["crux_macros"]));
  assert_eq!(report["order"][1]["dependents"], serde_json::json!(["crux_http"]));
  assert!(report.get("declared").is_none());

  Ok(())
}

#[test]
fn test_order_capabilities_after_core() -> Result<()> {
  let ws = TestWorkspace::crux("0.3.8", "0.7.3", "0.7.0")?;
  ws.add_crate("crux_kv", "0.2.0", &[("crux_core", "../crux_core")])?;
  ws.add_crate("shared_types", "0.1.0", &[])?;
  ws.commit("feat: add kv capability")?;

  let output = run_crux_release(&ws.path, &["order", "--json"])?;
  let report = stdout_json(&output)?;
  let names: Vec<&str> = report["order"]
    .as_array()
    .unwrap()
    .iter()
    .map(|e| e["name"].as_str().unwrap())
    .collect();

  let pos = |name: &str| names.iter().position(|n| *n == name).unwrap();
  assert_eq!(names.len(), 5);
  assert!(pos("crux_macros") < pos("crux_core"));
  assert!(pos("crux_core") < pos("crux_http"));
  assert!(pos("crux_core") < pos("crux_kv"));

  Ok(())
}

#[test]
fn test_order_reports_declared_violations() -> Result<()> {
  let ws = TestWorkspace::crux("0.3.8", "0.7.3", "0.7.0")?;
  ws.write_file(
    "crux-release.toml",
    r#"[release]
publish_order = ["crux_macros", "crux_http", "crux_core"]
"#,
  )?;

  let output = run_crux_release(&ws.path, &["order"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("📦 Publish order (3 crates)"), "stdout: {}", stdout);
  assert!(stdout.contains("crux_core 0.7.3 [core]"), "stdout: {}", stdout);
  assert!(stdout.contains("❌ Declared publish order has problems"), "stdout: {}", stdout);
  assert!(
    stdout.contains("'crux_http' is published before its dependency 'crux_core'"),
    "stdout: {}",
    stdout
  );

  Ok(())
}
