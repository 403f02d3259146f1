//! Read-only introspection for startup self-checks and tests.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::registry::ServiceRegistry;

/// Read-only snapshot of container state.
///
/// Consumed by startup health checks and test assertions; never exposes
/// instances.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerStats {
    /// Number of registered services.
    pub total: usize,
    /// Number of singleton registrations.
    pub singletons: usize,
    /// Number of transient registrations.
    pub transients: usize,
    /// Singletons already constructed and cached.
    pub realized_count: usize,
    /// Services whose factory has errored at least once.
    pub failed: Vec<&'static str>,
}

/// A wiring problem reported by [`Diagnostics::verify_wiring`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WiringIssue {
    /// `service` declares a dependency that is not registered.
    MissingDependency {
        /// The service with the dangling declaration.
        service: &'static str,
        /// The declared dependency that is missing.
        missing: &'static str,
    },
    /// The declared dependency graph contains this cycle.
    DeclaredCycle(Vec<&'static str>),
}

impl fmt::Display for WiringIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WiringIssue::MissingDependency { service, missing } => {
                write!(f, "'{}' depends on unregistered '{}'", service, missing)
            }
            WiringIssue::DeclaredCycle(path) => {
                write!(f, "declared dependency cycle: {}", path.join(" -> "))
            }
        }
    }
}

/// Diagnostics facade combining the registry's query operations into the
/// shape consumed by startup self-checks. Introduces no new invariants.
///
/// # Examples
///
/// ```rust
/// use stockpoint_registry::{setup_default_container, BootstrapConfig};
///
/// let registry = setup_default_container(&BootstrapConfig::default()).unwrap();
/// let diagnostics = registry.diagnostics();
///
/// assert!(diagnostics.is_registered("database"));
/// assert!(diagnostics.ensure_ready().is_ok());
/// assert_eq!(diagnostics.stats().realized_count, 0);
/// ```
pub struct Diagnostics<'a> {
    registry: &'a ServiceRegistry,
}

impl<'a> Diagnostics<'a> {
    pub(crate) fn new(registry: &'a ServiceRegistry) -> Self {
        Self { registry }
    }

    /// See [`ServiceRegistry::is_registered`].
    pub fn is_registered(&self, name: &str) -> bool {
        self.registry.is_registered(name)
    }

    /// See [`ServiceRegistry::get_registered_services`].
    pub fn registered_services(&self) -> Vec<&'static str> {
        self.registry.get_registered_services()
    }

    /// See [`ServiceRegistry::get_container_stats`].
    pub fn stats(&self) -> ContainerStats {
        self.registry.get_container_stats()
    }

    /// Validates the declared dependency graph without constructing
    /// anything: every declared dependency must be registered, and the
    /// graph must be acyclic.
    pub fn verify_wiring(&self) -> Vec<WiringIssue> {
        let descriptors = self.registry.descriptors();
        let graph: HashMap<&'static str, Vec<&'static str>> = descriptors
            .iter()
            .map(|descriptor| (descriptor.name, descriptor.dependencies.clone()))
            .collect();

        let mut issues = Vec::new();
        for descriptor in &descriptors {
            for &dependency in &descriptor.dependencies {
                if !graph.contains_key(dependency) {
                    issues.push(WiringIssue::MissingDependency {
                        service: descriptor.name,
                        missing: dependency,
                    });
                }
            }
        }

        let mut visited = HashSet::new();
        let mut stack = Vec::new();
        for descriptor in &descriptors {
            if let Some(cycle) = Self::dfs_cycle(descriptor.name, &graph, &mut visited, &mut stack)
            {
                // Mark the cycle's members visited so the same loop is not
                // reported once per entry point.
                for &member in &cycle {
                    visited.insert(member);
                }
                stack.clear();
                issues.push(WiringIssue::DeclaredCycle(cycle));
            }
        }
        issues
    }

    /// Startup health check: succeeds iff the wiring is complete and
    /// acyclic.
    pub fn ensure_ready(&self) -> Result<(), Vec<WiringIssue>> {
        let issues = self.verify_wiring();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }

    fn dfs_cycle(
        node: &'static str,
        graph: &HashMap<&'static str, Vec<&'static str>>,
        visited: &mut HashSet<&'static str>,
        stack: &mut Vec<&'static str>,
    ) -> Option<Vec<&'static str>> {
        if visited.contains(node) {
            return None;
        }
        if let Some(pos) = stack.iter().position(|&frame| frame == node) {
            let mut cycle: Vec<&'static str> = stack[pos..].to_vec();
            cycle.push(node);
            return Some(cycle);
        }
        stack.push(node);
        if let Some(dependencies) = graph.get(node) {
            for &dependency in dependencies {
                if let Some(cycle) = Self::dfs_cycle(dependency, graph, visited, stack) {
                    return Some(cycle);
                }
            }
        }
        stack.pop();
        visited.insert(node);
        None
    }
}
