//! Service descriptors for introspection and diagnostics.

use crate::lifetime::Lifetime;

/// Read-only metadata about a registered service.
///
/// Descriptors expose what the registry knows about a registration without
/// touching factories or instances. Used by startup health checks, wiring
/// validation, and tests.
///
/// # Examples
///
/// ```rust
/// use stockpoint_registry::ServiceRegistry;
///
/// let mut registry = ServiceRegistry::new("docs");
/// registry
///     .register_singleton::<String, _>("motd", &[], |_| Ok("hello".to_string()))
///     .unwrap();
///
/// let descriptor = registry.describe("motd").unwrap();
/// assert_eq!(descriptor.name, "motd");
/// assert!(descriptor.is_singleton());
/// assert!(descriptor.dependencies.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    /// Unique service name.
    pub name: &'static str,
    /// Lifetime policy of the registration.
    pub lifetime: Lifetime,
    /// Declared dependency names. Used for wiring validation and
    /// diagnostics only; factories still resolve their own dependencies.
    pub dependencies: Vec<&'static str>,
}

impl ServiceDescriptor {
    /// True if this registration is a singleton.
    pub fn is_singleton(&self) -> bool {
        self.lifetime.is_singleton()
    }

    /// True if this service declares a dependency on `name`.
    pub fn depends_on(&self, name: &str) -> bool {
        self.dependencies.iter().any(|&dep| dep == name)
    }
}
