//! Publish graph: which crate must reach the registry before which
//!
//! Built from cargo_metadata + petgraph over the *publishable* workspace crates.
//!
//! ## Graph Structure
//!
//! - **Directed Graph**: `A → B` means "A depends on B", so B publishes first
//! - **Nodes**: publishable workspace crates, each with a [`CrateRole`]
//! - **Edges**: normal and build dependencies (dev-dependencies are stripped
//!   by `cargo publish` and never constrain the order)
//! - **Order**: Kahn's algorithm, ready crates taken by `(role, name)` so the
//!   macros → core → capability layering holds wherever the edges allow it

use crate::cargo::metadata::{WorkspaceMetadata, is_publishable};
use crate::core::config::{CruxConfig, ReleaseConfig};
use crate::core::error::{ReleaseError, ReleaseResult, ValidationError};
use cargo_metadata::DependencyKind;
use petgraph::Direction;
use petgraph::algo::{has_path_connecting, tarjan_scc};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt;
use std::path::PathBuf;

/// The part a crate plays in the release layering.
///
/// Declaration order is publish precedence: macros first, then core, then
/// capabilities, then anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CrateRole {
  /// Code-generation macros (generated code targets the core crate)
  Macros,
  /// The shared core crate
  Core,
  /// A capability crate built on the core
  Capability,
  /// Anything else that gets published
  Other,
}

impl CrateRole {
  /// Whether this role takes part in the macros → core → capability layering
  pub fn is_layered(self) -> bool {
    !matches!(self, CrateRole::Other)
  }
}

impl fmt::Display for CrateRole {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let label = match self {
      CrateRole::Macros => "macros",
      CrateRole::Core => "core",
      CrateRole::Capability => "capability",
      CrateRole::Other => "other",
    };
    write!(f, "{}", label)
  }
}

/// Input description of a crate, independent of cargo_metadata
#[derive(Debug, Clone)]
pub struct CrateSpec {
  pub name: String,
  pub version: semver::Version,
  /// Crate directory relative to the workspace root
  pub dir: PathBuf,
  /// Names of crates this one needs at publish time
  pub dependencies: Vec<String>,
}

impl CrateSpec {
  pub fn new(name: &str, version: &str, dependencies: &[&str]) -> ReleaseResult<Self> {
    Ok(Self {
      name: name.to_string(),
      version: version.parse()?,
      dir: PathBuf::from(name),
      dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
    })
  }
}

/// A crate node in the publish graph
#[derive(Debug, Clone, Serialize)]
pub struct CrateNode {
  pub name: String,
  pub version: semver::Version,
  pub dir: PathBuf,
  pub role: CrateRole,
}

/// Problems with a publish order (declared or derived)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum OrderViolation {
  /// Crate listed more than once
  Duplicate { name: String },
  /// Listed crate is not a publishable workspace crate
  Unknown { name: String },
  /// Publishable crate never listed
  Missing { name: String },
  /// A dependency is listed after the crate that needs it
  DependencyAfter { name: String, dependency: String },
  /// A dependency is not listed at all, so it is never published first
  DependencyMissing { name: String, dependency: String },
}

impl OrderViolation {
  /// Whether this violation breaks publishing (Missing only leaves a crate unreleased)
  pub fn is_blocking(&self) -> bool {
    !matches!(self, OrderViolation::Missing { .. })
  }
}

impl fmt::Display for OrderViolation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      OrderViolation::Duplicate { name } => write!(f, "'{}' is listed more than once", name),
      OrderViolation::Unknown { name } => write!(f, "'{}' is not a publishable workspace crate", name),
      OrderViolation::Missing { name } => write!(f, "'{}' is never published", name),
      OrderViolation::DependencyAfter { name, dependency } => {
        write!(f, "'{}' is published before its dependency '{}'", name, dependency)
      }
      OrderViolation::DependencyMissing { name, dependency } => {
        write!(f, "'{}' depends on '{}', which is not in the publish order", name, dependency)
      }
    }
  }
}

/// Problems with the macros → core → capability layering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RoleViolation {
  /// A crate of a later layer is published before one of an earlier layer
  OutOfOrder {
    earlier: String,
    earlier_role: CrateRole,
    later: String,
    later_role: CrateRole,
  },
  /// Configured capability crate does not build on the core crate
  CapabilityWithoutCore { name: String },
  /// The core crate depends on a capability crate
  CoreDependsOnCapability { name: String },
  /// A macros crate depends on the core crate, forcing core first
  MacrosDependsOnCore { name: String },
}

impl RoleViolation {
  /// Structural violations are warnings; ordering violations are errors
  pub fn is_structural(&self) -> bool {
    !matches!(self, RoleViolation::OutOfOrder { .. })
  }
}

impl fmt::Display for RoleViolation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RoleViolation::OutOfOrder {
        earlier,
        earlier_role,
        later,
        later_role,
      } => write!(
        f,
        "{} crate '{}' is published before {} crate '{}'",
        earlier_role, earlier, later_role, later
      ),
      RoleViolation::CapabilityWithoutCore { name } => {
        write!(f, "capability crate '{}' does not depend on the core crate", name)
      }
      RoleViolation::CoreDependsOnCapability { name } => {
        write!(f, "the core crate depends on capability crate '{}'", name)
      }
      RoleViolation::MacrosDependsOnCore { name } => {
        write!(f, "macros crate '{}' depends on the core crate", name)
      }
    }
  }
}

/// Dependency graph of the publishable workspace crates
pub struct PublishGraph {
  graph: DiGraph<CrateNode, ()>,
  name_to_node: HashMap<String, NodeIndex>,
  core: String,
  explicit_capabilities: bool,
}

impl PublishGraph {
  /// Build from cargo metadata, keeping publishable, non-excluded crates
  pub fn from_metadata(metadata: &WorkspaceMetadata, config: &CruxConfig) -> ReleaseResult<Self> {
    let packages: Vec<_> = metadata
      .list_crates()
      .into_iter()
      .filter(|pkg| is_publishable(pkg) && !config.release.is_excluded(&pkg.name.to_string()))
      .collect();

    let names: HashSet<String> = packages.iter().map(|p| p.name.to_string()).collect();

    let specs = packages
      .iter()
      .map(|pkg| {
        let mut dependencies: Vec<String> = pkg
          .dependencies
          .iter()
          .filter(|dep| matches!(dep.kind, DependencyKind::Normal | DependencyKind::Build))
          .filter(|dep| names.contains(&dep.name))
          .map(|dep| dep.name.clone())
          .collect();
        dependencies.sort();
        dependencies.dedup();

        CrateSpec {
          name: pkg.name.to_string(),
          version: pkg.version.clone(),
          dir: metadata.relative_crate_dir(pkg),
          dependencies,
        }
      })
      .collect::<Vec<_>>();

    Ok(Self::from_specs(&specs, &config.release))
  }

  /// Build from plain crate descriptions
  ///
  /// Dependencies on crates outside `specs` are dropped.
  pub fn from_specs(specs: &[CrateSpec], release: &ReleaseConfig) -> Self {
    let mut graph = DiGraph::new();
    let mut name_to_node = HashMap::new();

    let mut sorted: Vec<&CrateSpec> = specs.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    for spec in &sorted {
      let role = Self::classify(spec, release);
      let idx = graph.add_node(CrateNode {
        name: spec.name.clone(),
        version: spec.version.clone(),
        dir: spec.dir.clone(),
        role,
      });
      name_to_node.insert(spec.name.clone(), idx);
    }

    for spec in &sorted {
      let from = name_to_node[&spec.name];
      for dep in &spec.dependencies {
        if let Some(&to) = name_to_node.get(dep)
          && graph.find_edge(from, to).is_none()
        {
          graph.add_edge(from, to, ());
        }
      }
    }

    tracing::debug!(
      crates = graph.node_count(),
      edges = graph.edge_count(),
      "built publish graph"
    );

    Self {
      graph,
      name_to_node,
      core: release.core.clone(),
      explicit_capabilities: !release.capabilities.is_empty(),
    }
  }

  fn classify(spec: &CrateSpec, release: &ReleaseConfig) -> CrateRole {
    if spec.name == release.core {
      CrateRole::Core
    } else if release.is_macros(&spec.name) {
      CrateRole::Macros
    } else if release.capabilities.is_empty() {
      if spec.dependencies.iter().any(|d| d == &release.core) {
        CrateRole::Capability
      } else {
        CrateRole::Other
      }
    } else if release.capabilities.iter().any(|c| c == &spec.name) {
      CrateRole::Capability
    } else {
      CrateRole::Other
    }
  }

  /// Crates in name order
  pub fn crates(&self) -> Vec<&CrateNode> {
    let mut nodes: Vec<_> = self.graph.node_weights().collect();
    nodes.sort_by(|a, b| a.name.cmp(&b.name));
    nodes
  }

  pub fn node(&self, name: &str) -> Option<&CrateNode> {
    self.name_to_node.get(name).map(|&idx| &self.graph[idx])
  }

  pub fn contains(&self, name: &str) -> bool {
    self.name_to_node.contains_key(name)
  }

  pub fn role_of(&self, name: &str) -> Option<CrateRole> {
    self.node(name).map(|n| n.role)
  }

  pub fn len(&self) -> usize {
    self.graph.node_count()
  }

  pub fn is_empty(&self) -> bool {
    self.graph.node_count() == 0
  }

  /// Direct dependencies of a crate, sorted
  pub fn dependencies_of(&self, name: &str) -> Vec<String> {
    self.neighbors(name, Direction::Outgoing)
  }

  /// Direct dependents of a crate, sorted
  pub fn dependents_of(&self, name: &str) -> Vec<String> {
    self.neighbors(name, Direction::Incoming)
  }

  fn neighbors(&self, name: &str, direction: Direction) -> Vec<String> {
    let Some(&idx) = self.name_to_node.get(name) else {
      return Vec::new();
    };
    let mut names: Vec<String> = self
      .graph
      .neighbors_directed(idx, direction)
      .map(|n| self.graph[n].name.clone())
      .collect();
    names.sort();
    names
  }

  /// Whether `from` needs `to` directly or transitively
  pub fn depends_on(&self, from: &str, to: &str) -> bool {
    match (self.name_to_node.get(from), self.name_to_node.get(to)) {
      (Some(&a), Some(&b)) if a != b => has_path_connecting(&self.graph, a, b, None),
      _ => false,
    }
  }

  /// Dependency cycles, each sorted by name
  pub fn cycles(&self) -> Vec<Vec<String>> {
    let mut cycles: Vec<Vec<String>> = tarjan_scc(&self.graph)
      .into_iter()
      .filter(|scc| scc.len() > 1 || self.graph.find_edge(scc[0], scc[0]).is_some())
      .map(|scc| {
        let mut names: Vec<String> = scc.iter().map(|&idx| self.graph[idx].name.clone()).collect();
        names.sort();
        names
      })
      .collect();
    cycles.sort();
    cycles
  }

  /// Publish order: dependencies first, ties broken by role then name
  pub fn publish_order(&self) -> ReleaseResult<Vec<String>> {
    let mut remaining: HashMap<NodeIndex, usize> = self
      .graph
      .node_indices()
      .map(|idx| (idx, self.graph.neighbors_directed(idx, Direction::Outgoing).count()))
      .collect();

    let mut ready: BinaryHeap<Reverse<(CrateRole, String, NodeIndex)>> = remaining
      .iter()
      .filter(|&(_, &count)| count == 0)
      .map(|(&idx, _)| {
        let node = &self.graph[idx];
        Reverse((node.role, node.name.clone(), idx))
      })
      .collect();

    let mut order = Vec::with_capacity(self.graph.node_count());
    while let Some(Reverse((_, name, idx))) = ready.pop() {
      order.push(name);
      for dependent in self.graph.neighbors_directed(idx, Direction::Incoming) {
        if let Some(count) = remaining.get_mut(&dependent) {
          *count -= 1;
          if *count == 0 {
            let node = &self.graph[dependent];
            ready.push(Reverse((node.role, node.name.clone(), dependent)));
          }
        }
      }
    }

    if order.len() < self.graph.node_count() {
      let crates = self.cycles().into_iter().next().unwrap_or_default();
      return Err(ReleaseError::Validation(ValidationError::DependencyCycle { crates }));
    }

    Ok(order)
  }

  /// Check that every listed crate comes after all of its dependencies
  pub fn validate_order(&self, order: &[String]) -> Vec<OrderViolation> {
    let mut violations = Vec::new();
    let mut position: HashMap<&str, usize> = HashMap::new();

    for (i, name) in order.iter().enumerate() {
      if position.contains_key(name.as_str()) {
        violations.push(OrderViolation::Duplicate { name: name.clone() });
        continue;
      }
      if !self.contains(name) {
        violations.push(OrderViolation::Unknown { name: name.clone() });
        continue;
      }
      position.insert(name, i);
    }

    for (i, name) in order.iter().enumerate() {
      if position.get(name.as_str()) != Some(&i) {
        continue;
      }
      for dependency in self.dependencies_of(name) {
        match position.get(dependency.as_str()) {
          Some(&j) if j < i => {}
          Some(_) => violations.push(OrderViolation::DependencyAfter {
            name: name.clone(),
            dependency,
          }),
          None => violations.push(OrderViolation::DependencyMissing {
            name: name.clone(),
            dependency,
          }),
        }
      }
    }

    for node in self.crates() {
      if !position.contains_key(node.name.as_str()) {
        violations.push(OrderViolation::Missing {
          name: node.name.clone(),
        });
      }
    }

    violations
  }

  /// Check the macros → core → capability layering of an order
  ///
  /// An earlier crate of a later layer is only reported when the graph does not
  /// force it there (i.e. the later crate does not depend on it).
  pub fn validate_roles(&self, order: &[String]) -> Vec<RoleViolation> {
    let mut violations = Vec::new();

    let layered: Vec<&CrateNode> = order
      .iter()
      .filter_map(|name| self.node(name))
      .filter(|node| node.role.is_layered())
      .collect();

    for (i, later) in layered.iter().enumerate() {
      let offender = layered[..i]
        .iter()
        .find(|earlier| earlier.role > later.role && !self.depends_on(&later.name, &earlier.name));
      if let Some(earlier) = offender {
        violations.push(RoleViolation::OutOfOrder {
          earlier: earlier.name.clone(),
          earlier_role: earlier.role,
          later: later.name.clone(),
          later_role: later.role,
        });
      }
    }

    let core_present = self.contains(&self.core);
    for node in self.crates() {
      match node.role {
        CrateRole::Capability if core_present && self.explicit_capabilities => {
          if !self.depends_on(&node.name, &self.core) {
            violations.push(RoleViolation::CapabilityWithoutCore {
              name: node.name.clone(),
            });
          }
          if self.depends_on(&self.core, &node.name) {
            violations.push(RoleViolation::CoreDependsOnCapability {
              name: node.name.clone(),
            });
          }
        }
        CrateRole::Macros if core_present && self.depends_on(&node.name, &self.core) => {
          violations.push(RoleViolation::MacrosDependsOnCore {
            name: node.name.clone(),
          });
        }
        _ => {}
      }
    }

    violations
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn crux_specs() -> Vec<CrateSpec> {
    vec![
      CrateSpec::new("crux_http", "0.7.0", &["crux_core"]).unwrap(),
      CrateSpec::new("crux_kv", "0.2.0", &["crux_core"]).unwrap(),
      CrateSpec::new("crux_core", "0.7.3", &["crux_macros"]).unwrap(),
      CrateSpec::new("crux_macros", "0.3.8", &[]).unwrap(),
      CrateSpec::new("crux_time", "0.1.2", &["crux_core", "crux_macros"]).unwrap(),
    ]
  }

  fn names(order: &[&str]) -> Vec<String> {
    order.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn test_empty_graph() {
    let graph = PublishGraph::from_specs(&[], &ReleaseConfig::default());
    assert!(graph.is_empty());
    assert_eq!(graph.publish_order().unwrap(), Vec::<String>::new());
  }

  #[test]
  fn test_roles_inferred_for_crux_layout() {
    let graph = PublishGraph::from_specs(&crux_specs(), &ReleaseConfig::default());
    assert_eq!(graph.role_of("crux_macros"), Some(CrateRole::Macros));
    assert_eq!(graph.role_of("crux_core"), Some(CrateRole::Core));
    assert_eq!(graph.role_of("crux_http"), Some(CrateRole::Capability));
    assert_eq!(graph.role_of("crux_time"), Some(CrateRole::Capability));
    assert_eq!(graph.role_of("missing"), None);
  }

  #[test]
  fn test_publish_order_macros_core_capabilities() {
    let graph = PublishGraph::from_specs(&crux_specs(), &ReleaseConfig::default());
    let order = graph.publish_order().unwrap();
    assert_eq!(
      order,
      names(&["crux_macros", "crux_core", "crux_http", "crux_kv", "crux_time"])
    );
    assert!(graph.validate_order(&order).is_empty());
    assert!(graph.validate_roles(&order).is_empty());
  }

  #[test]
  fn test_independent_crates_follow_role_rank() {
    // Nothing depends on anything: the layering alone decides
    let specs = vec![
      CrateSpec::new("aaa_tool", "1.0.0", &[]).unwrap(),
      CrateSpec::new("crux_core", "1.0.0", &[]).unwrap(),
      CrateSpec::new("zzz_macros", "1.0.0", &[]).unwrap(),
    ];
    let graph = PublishGraph::from_specs(&specs, &ReleaseConfig::default());
    assert_eq!(
      graph.publish_order().unwrap(),
      names(&["zzz_macros", "crux_core", "aaa_tool"])
    );
  }

  #[test]
  fn test_dependencies_and_dependents() {
    let graph = PublishGraph::from_specs(&crux_specs(), &ReleaseConfig::default());
    assert_eq!(graph.dependencies_of("crux_time"), names(&["crux_core", "crux_macros"]));
    assert_eq!(
      graph.dependents_of("crux_core"),
      names(&["crux_http", "crux_kv", "crux_time"])
    );
    assert!(graph.depends_on("crux_http", "crux_macros"));
    assert!(!graph.depends_on("crux_macros", "crux_http"));
    assert!(graph.dependencies_of("unknown").is_empty());
  }

  #[test]
  fn test_unknown_dependencies_dropped() {
    let specs = vec![CrateSpec::new("crux_core", "1.0.0", &["serde"]).unwrap()];
    let graph = PublishGraph::from_specs(&specs, &ReleaseConfig::default());
    assert!(graph.dependencies_of("crux_core").is_empty());
  }

  #[test]
  fn test_cycle_detected() {
    let specs = vec![
      CrateSpec::new("a", "1.0.0", &["b"]).unwrap(),
      CrateSpec::new("b", "1.0.0", &["c"]).unwrap(),
      CrateSpec::new("c", "1.0.0", &["a"]).unwrap(),
      CrateSpec::new("d", "1.0.0", &[]).unwrap(),
    ];
    let graph = PublishGraph::from_specs(&specs, &ReleaseConfig::default());
    assert_eq!(graph.cycles(), vec![names(&["a", "b", "c"])]);

    let err = graph.publish_order().unwrap_err();
    assert!(matches!(
      err,
      ReleaseError::Validation(ValidationError::DependencyCycle { .. })
    ));
  }

  #[test]
  fn test_validate_order_dependency_after() {
    let graph = PublishGraph::from_specs(&crux_specs(), &ReleaseConfig::default());
    let order = names(&["crux_core", "crux_macros", "crux_http", "crux_kv", "crux_time"]);
    let violations = graph.validate_order(&order);
    assert_eq!(
      violations,
      vec![OrderViolation::DependencyAfter {
        name: "crux_core".into(),
        dependency: "crux_macros".into(),
      }]
    );
    assert!(violations[0].is_blocking());
  }

  #[test]
  fn test_validate_order_missing_unknown_duplicate() {
    let graph = PublishGraph::from_specs(&crux_specs(), &ReleaseConfig::default());
    let order = names(&["crux_macros", "crux_core", "crux_core", "crux_http", "crux_platform"]);
    let violations = graph.validate_order(&order);

    assert!(violations.contains(&OrderViolation::Duplicate {
      name: "crux_core".into()
    }));
    assert!(violations.contains(&OrderViolation::Unknown {
      name: "crux_platform".into()
    }));
    assert!(violations.contains(&OrderViolation::Missing { name: "crux_kv".into() }));
    assert!(violations.contains(&OrderViolation::Missing {
      name: "crux_time".into()
    }));
    assert_eq!(violations.len(), 4);
    assert!(
      !violations
        .iter()
        .find(|v| matches!(v, OrderViolation::Missing { .. }))
        .unwrap()
        .is_blocking()
    );
  }

  #[test]
  fn test_validate_order_dependency_missing() {
    let graph = PublishGraph::from_specs(&crux_specs(), &ReleaseConfig::default());
    let order = names(&["crux_core", "crux_http"]);
    let violations = graph.validate_order(&order);
    assert!(violations.contains(&OrderViolation::DependencyMissing {
      name: "crux_core".into(),
      dependency: "crux_macros".into(),
    }));
  }

  #[test]
  fn test_validate_roles_out_of_order() {
    // crux_other is a capability by config but does not depend on core, so
    // nothing forces it before crux_core
    let mut release = ReleaseConfig::default();
    release.capabilities = vec!["crux_http".into(), "crux_other".into()];
    let specs = vec![
      CrateSpec::new("crux_core", "1.0.0", &[]).unwrap(),
      CrateSpec::new("crux_http", "1.0.0", &["crux_core"]).unwrap(),
      CrateSpec::new("crux_other", "1.0.0", &[]).unwrap(),
    ];
    let graph = PublishGraph::from_specs(&specs, &release);

    let violations = graph.validate_roles(&names(&["crux_other", "crux_core", "crux_http"]));
    assert!(violations.contains(&RoleViolation::OutOfOrder {
      earlier: "crux_other".into(),
      earlier_role: CrateRole::Capability,
      later: "crux_core".into(),
      later_role: CrateRole::Core,
    }));
    assert!(violations.contains(&RoleViolation::CapabilityWithoutCore {
      name: "crux_other".into()
    }));
  }

  #[test]
  fn test_validate_roles_forced_order_is_structural_only() {
    // A macros crate that depends on core must come after it; that is a
    // structural warning, not an ordering error
    let specs = vec![
      CrateSpec::new("crux_core", "1.0.0", &[]).unwrap(),
      CrateSpec::new("crux_macros", "1.0.0", &["crux_core"]).unwrap(),
    ];
    let graph = PublishGraph::from_specs(&specs, &ReleaseConfig::default());
    let order = graph.publish_order().unwrap();
    assert_eq!(order, names(&["crux_core", "crux_macros"]));

    let violations = graph.validate_roles(&order);
    assert_eq!(
      violations,
      vec![RoleViolation::MacrosDependsOnCore {
        name: "crux_macros".into()
      }]
    );
    assert!(violations[0].is_structural());
  }

  #[test]
  fn test_core_depending_on_capability() {
    let mut release = ReleaseConfig::default();
    release.capabilities = vec!["crux_http".into()];
    let specs = vec![
      CrateSpec::new("crux_core", "1.0.0", &["crux_http"]).unwrap(),
      CrateSpec::new("crux_http", "1.0.0", &[]).unwrap(),
    ];
    let graph = PublishGraph::from_specs(&specs, &release);
    let violations = graph.validate_roles(&graph.publish_order().unwrap());
    assert!(violations.contains(&RoleViolation::CoreDependsOnCapability {
      name: "crux_http".into()
    }));
  }

  #[test]
  fn test_violation_messages() {
    let v = OrderViolation::DependencyAfter {
      name: "crux_core".into(),
      dependency: "crux_macros".into(),
    };
    assert_eq!(
      v.to_string(),
      "'crux_core' is published before its dependency 'crux_macros'"
    );
    assert_eq!(CrateRole::Capability.to_string(), "capability");
  }
}
