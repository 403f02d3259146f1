//! # stockpoint-registry
//!
//! Named-service registry and lifecycle container for the Stockpoint
//! inventory desktop application.
//!
//! Every shared resource of the application (the database connection, the
//! domain services, the session manager) is registered once in a
//! [`ServiceRegistry`] and resolved by name wherever it is needed. The
//! registry owns lazy construction, singleton caching, circular dependency
//! detection, and ordered teardown; it knows nothing about the internals
//! of the services it wires.
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use stockpoint_registry::ServiceRegistry;
//!
//! struct Database {
//!     path: String,
//! }
//!
//! struct ProductService {
//!     db: Arc<Database>,
//! }
//!
//! let mut registry = ServiceRegistry::new("main");
//! registry.register_singleton::<Database, _>("database", &[], |_| {
//!     Ok(Database { path: "inventory.db".to_string() })
//! })?;
//! registry.register_singleton::<ProductService, _>("product_service", &["database"], |r| {
//!     Ok(ProductService { db: r.resolve("database")? })
//! })?;
//!
//! // Lazy: nothing is constructed until first resolution.
//! assert_eq!(registry.get_container_stats().realized_count, 0);
//!
//! let products: Arc<ProductService> = registry.resolve("product_service")?;
//! let database: Arc<Database> = registry.resolve("database")?;
//! assert!(Arc::ptr_eq(&products.db, &database));
//!
//! registry.cleanup()?;
//! # Ok::<(), stockpoint_registry::RegistryError>(())
//! ```
//!
//! The application itself never composes by hand: it calls
//! [`setup_default_container`] once at startup, runs the
//! [`Diagnostics`] self-check, resolves what it needs, and calls
//! [`cleanup`](ServiceRegistry::cleanup) once at shutdown.
//!
//! ## Lifetimes
//!
//! - **Singleton**: one instance per registry, created lazily on first
//!   resolution and cached.
//! - **Transient**: a fresh instance on every resolution.
//!
//! ## Lifecycle and threading
//!
//! A registry moves through three phases: registration (`&mut self`),
//! resolution, and a terminal torn-down phase entered exactly once by
//! `cleanup()`. Resolution of cached singletons is safe from any thread;
//! *first-time* resolutions must be serialized externally: in practice,
//! resolve every singleton from the main thread during startup before
//! worker threads exist, and call `cleanup()` after they are joined.

pub mod bootstrap;
pub mod descriptor;
pub mod diagnostics;
pub mod error;
pub mod lifetime;
pub mod observer;
pub mod registry;
pub mod services;
pub mod traits;

mod internal;
mod registration;

pub use bootstrap::{setup_default_container, setup_logged_container, BootstrapConfig};
pub use descriptor::ServiceDescriptor;
pub use diagnostics::{ContainerStats, Diagnostics, WiringIssue};
pub use error::{BoxedError, CleanupFailure, RegistryError, RegistryResult};
pub use lifetime::Lifetime;
pub use observer::{LoggingObserver, RegistryObserver};
pub use registry::{OverridePolicy, ServiceRegistry};
pub use traits::Dispose;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn singleton_resolution_returns_same_instance() {
        let mut registry = ServiceRegistry::new("unit");
        registry
            .register_singleton::<u64, _>("answer", &[], |_| Ok(42))
            .unwrap();

        let a = registry.resolve::<u64>("answer").unwrap();
        let b = registry.resolve::<u64>("answer").unwrap();

        assert_eq!(*a, 42);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn transient_resolution_returns_fresh_instances() {
        use std::sync::Mutex;

        let counter = Arc::new(Mutex::new(0u32));
        let factory_counter = counter.clone();

        let mut registry = ServiceRegistry::new("unit");
        registry
            .register_transient::<String, _>("label", &[], move |_| {
                let mut count = factory_counter.lock().unwrap();
                *count += 1;
                Ok(format!("label-{}", count))
            })
            .unwrap();

        let a = registry.resolve::<String>("label").unwrap();
        let b = registry.resolve::<String>("label").unwrap();

        assert_eq!(a.as_str(), "label-1");
        assert_eq!(b.as_str(), "label-2");
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn typed_accessor_rejects_wrong_type() {
        let mut registry = ServiceRegistry::new("unit");
        registry
            .register_singleton::<u64, _>("answer", &[], |_| Ok(42))
            .unwrap();

        match registry.resolve::<String>("answer") {
            Err(RegistryError::TypeMismatch(name)) => assert_eq!(name, "answer"),
            other => panic!("expected TypeMismatch, got {:?}", other.map(|_| ())),
        }
    }
}
