//! Service lifetime definitions.

/// Service lifetimes controlling instance caching behavior.
///
/// # Examples
///
/// ```rust
/// use stockpoint_registry::{Lifetime, ServiceRegistry};
///
/// let mut registry = ServiceRegistry::new("docs");
/// registry
///     .register::<u64, _>("sequence", Lifetime::Transient, &[], |_| Ok(7))
///     .unwrap();
///
/// assert_eq!(registry.describe("sequence").unwrap().lifetime, Lifetime::Transient);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// Exactly one instance per registry, created lazily on first
    /// resolution and cached for the registry's lifetime.
    Singleton,
    /// New instance on every resolution, never cached.
    Transient,
}

impl Lifetime {
    /// True for [`Lifetime::Singleton`].
    pub fn is_singleton(self) -> bool {
        matches!(self, Lifetime::Singleton)
    }
}
