//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A test workspace with git history
pub struct TestWorkspace {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestWorkspace {
  /// Create a new test workspace with basic structure
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;

    std::fs::write(
      path.join("Cargo.toml"),
      r#"[workspace]
members = ["crates/*"]
resolver = "2"

[workspace.package]
edition = "2021"
license = "MIT"
authors = ["Test Author"]
"#,
    )?;

    git(&path, &["add", "."])?;
    git(&path, &["commit", "-m", "chore: initial workspace setup"])?;

    Ok(Self { _root: root, path })
  }

  /// The crux layout: macros, core and one capability crate, all committed
  pub fn crux(macros: &str, core: &str, http: &str) -> Result<Self> {
    let ws = Self::new()?;
    ws.add_crate("crux_macros", macros, &[])?;
    ws.add_crate("crux_core", core, &[("crux_macros", "../crux_macros")])?;
    ws.add_crate("crux_http", http, &[("crux_core", "../crux_core")])?;
    ws.commit("feat: initial crates")?;
    Ok(ws)
  }

  /// Add a crate with path dependencies on other workspace crates
  pub fn add_crate(&self, name: &str, version: &str, deps: &[(&str, &str)]) -> Result<PathBuf> {
    let crate_path = self.path.join("crates").join(name);
    std::fs::create_dir_all(crate_path.join("src"))?;

    let mut cargo_toml = format!(
      r#"[package]
name = "{}"
version = "{}"
edition.workspace = true
license.workspace = true
authors.workspace = true

[dependencies]
"#,
      name, version
    );

    for (dep_name, dep_path) in deps {
      cargo_toml.push_str(&format!("{} = {{ path = \"{}\" }}\n", dep_name, dep_path));
    }

    std::fs::write(crate_path.join("Cargo.toml"), cargo_toml)?;
    std::fs::write(
      crate_path.join("src/lib.rs"),
      format!("//! {} crate\n\npub fn hello() -> &'static str {{\n    \"Hello from {}\"\n}}\n", name, name),
    )?;

    Ok(crate_path)
  }

  /// Change the version in a crate's manifest
  pub fn set_version(&self, crate_name: &str, version: &str) -> Result<()> {
    let manifest = self.path.join("crates").join(crate_name).join("Cargo.toml");
    let content = std::fs::read_to_string(&manifest)?;
    let updated: Vec<String> = content
      .lines()
      .map(|line| {
        if line.starts_with("version = ") {
          format!("version = \"{}\"", version)
        } else {
          line.to_string()
        }
      })
      .collect();
    std::fs::write(manifest, updated.join("\n") + "\n")?;
    Ok(())
  }

  /// Commit current changes
  pub fn commit(&self, message: &str) -> Result<String> {
    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "-m", message])?;

    let output = git(&self.path, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Create an annotated tag at HEAD
  pub fn tag(&self, name: &str) -> Result<()> {
    git(&self.path, &["tag", "-a", name, "-m", name])?;
    Ok(())
  }

  /// Modify a file in a crate
  pub fn modify_file(&self, crate_name: &str, file: &str, content: &str) -> Result<()> {
    let file_path = self.path.join("crates").join(crate_name).join(file);
    std::fs::write(file_path, content)?;
    Ok(())
  }

  /// Write a file relative to the workspace root
  pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
    let file_path = self.path.join(path);
    if let Some(parent) = file_path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
  }

  /// Check if a file exists
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  /// Read a file
  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }

  /// Tag names in the repository
  pub fn tags(&self) -> Result<Vec<String>> {
    let output = git(&self.path, &["tag", "--list"])?;
    Ok(
      String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect(),
    )
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run cargo-crux-release and return its output, whatever the exit status
pub fn run_crux_release_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_cargo-crux-release");

  Command::new(bin)
    .current_dir(cwd)
    .arg("crux-release")
    .args(args)
    .output()
    .context("Failed to run cargo-crux-release")
}

/// Run cargo-crux-release, failing the test when it exits non-zero
pub fn run_crux_release(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_crux_release_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "cargo-crux-release command failed: cargo crux-release {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Stdout of a run as JSON
pub fn stdout_json(output: &Output) -> Result<serde_json::Value> {
  serde_json::from_slice(&output.stdout).context("stdout is not valid JSON")
}
