//! Registry core: registration, resolution, and lifecycle.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use log::{debug, info, warn};

use crate::descriptor::ServiceDescriptor;
use crate::diagnostics::{ContainerStats, Diagnostics};
use crate::error::{BoxedError, CleanupFailure, RegistryError, RegistryResult};
use crate::internal::{enter, ResolutionStack};
use crate::lifetime::Lifetime;
use crate::observer::{Observers, RegistryObserver};
use crate::registration::{AnyArc, ErasedCtor, ErasedFinalizer, Registration, RegistrationTable};
use crate::traits::Dispose;

/// Policy applied when a name is registered twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverridePolicy {
    /// Reject re-registration with
    /// [`DuplicateRegistration`](RegistryError::DuplicateRegistration).
    /// This is the default.
    Strict,
    /// Replace the descriptor and evict any cached singleton.
    Permissive,
}

/// Runtime state populated during the resolve phase. Lives behind one
/// mutex; the lock is never held while a factory runs.
#[derive(Default)]
struct RuntimeState {
    /// Realized singleton instances, keyed by service name.
    singletons: HashMap<&'static str, AnyArc>,
    /// Names in first-resolution order; teardown runs in reverse.
    realized: Vec<&'static str>,
    /// Names whose factory has errored at least once.
    failed: Vec<&'static str>,
    /// Set once by `cleanup()`. Terminal: the registry is unusable after.
    torn_down: bool,
}

/// The application-wide service registry.
///
/// Maps service names to lazily-constructed, lifecycle-managed instances.
/// Created empty, populated during the registration phase (`register_*`,
/// which take `&mut self`), then resolved against for the application's
/// running lifetime, and finally torn down exactly once at shutdown.
///
/// # Concurrency
///
/// The registry is `Send + Sync`, but `resolve` is not safe for
/// *concurrent first-time* resolutions: two threads racing on an uncached
/// singleton can run the factory twice, with the later instance replacing
/// the earlier one in the cache. Resolve every singleton once from the
/// startup thread before spawning workers; resolution of already-cached
/// singletons is a plain guarded map read and safe from any thread.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use stockpoint_registry::ServiceRegistry;
///
/// struct Database {
///     path: String,
/// }
///
/// struct ProductService {
///     db: Arc<Database>,
/// }
///
/// let mut registry = ServiceRegistry::new("docs");
/// registry.register_singleton::<Database, _>("database", &[], |_| {
///     Ok(Database { path: "inventory.db".to_string() })
/// })?;
/// registry.register_singleton::<ProductService, _>("product_service", &["database"], |r| {
///     Ok(ProductService { db: r.resolve("database")? })
/// })?;
///
/// let products: Arc<ProductService> = registry.resolve("product_service")?;
/// assert_eq!(products.db.path, "inventory.db");
/// # Ok::<(), stockpoint_registry::RegistryError>(())
/// ```
pub struct ServiceRegistry {
    name: String,
    policy: OverridePolicy,
    observers: Observers,
    table: RegistrationTable,
    stack: ResolutionStack,
    state: Mutex<RuntimeState>,
}

impl ServiceRegistry {
    /// Creates an empty registry with the strict duplicate policy.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_policy(name, OverridePolicy::Strict)
    }

    /// Creates an empty registry with the permissive duplicate policy:
    /// re-registration replaces the descriptor and evicts any cached
    /// singleton under that name.
    pub fn permissive(name: impl Into<String>) -> Self {
        Self::with_policy(name, OverridePolicy::Permissive)
    }

    /// Creates an empty registry with an explicit [`OverridePolicy`].
    pub fn with_policy(name: impl Into<String>, policy: OverridePolicy) -> Self {
        let name = name.into();
        debug!("{}: container created ({:?})", name, policy);
        Self {
            name,
            policy,
            observers: Observers::new(),
            table: RegistrationTable::new(),
            stack: ResolutionStack::default(),
            state: Mutex::new(RuntimeState::default()),
        }
    }

    /// The container name used in logs and diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The duplicate-registration policy in effect.
    pub fn policy(&self) -> OverridePolicy {
        self.policy
    }

    /// Installs an observer receiving registration and resolution events.
    pub fn add_observer(&mut self, observer: Arc<dyn RegistryObserver>) {
        self.observers.add(observer);
    }

    // ----- Registration -----

    /// Registers `name` with an explicit lifetime.
    ///
    /// Pure declaration: no instance is created here. The factory receives
    /// the registry and resolves its own dependencies from it. Fails with
    /// [`InvalidName`](RegistryError::InvalidName) for an empty name and,
    /// under the strict policy, with
    /// [`DuplicateRegistration`](RegistryError::DuplicateRegistration) for
    /// a name that already exists.
    pub fn register<T, F>(
        &mut self,
        name: &'static str,
        lifetime: Lifetime,
        dependencies: &[&'static str],
        factory: F,
    ) -> RegistryResult<()>
    where
        T: Send + Sync + 'static,
        F: Fn(&ServiceRegistry) -> Result<T, BoxedError> + Send + Sync + 'static,
    {
        let ctor: ErasedCtor =
            Arc::new(move |registry| factory(registry).map(|value| Arc::new(value) as AnyArc));
        self.register_erased(name, lifetime, dependencies.to_vec(), ctor, None)
    }

    /// Registers a lazily-constructed singleton.
    pub fn register_singleton<T, F>(
        &mut self,
        name: &'static str,
        dependencies: &[&'static str],
        factory: F,
    ) -> RegistryResult<()>
    where
        T: Send + Sync + 'static,
        F: Fn(&ServiceRegistry) -> Result<T, BoxedError> + Send + Sync + 'static,
    {
        self.register(name, Lifetime::Singleton, dependencies, factory)
    }

    /// Registers a transient service: the factory runs on every resolution.
    pub fn register_transient<T, F>(
        &mut self,
        name: &'static str,
        dependencies: &[&'static str],
        factory: F,
    ) -> RegistryResult<()>
    where
        T: Send + Sync + 'static,
        F: Fn(&ServiceRegistry) -> Result<T, BoxedError> + Send + Sync + 'static,
    {
        self.register(name, Lifetime::Transient, dependencies, factory)
    }

    /// Registers a singleton whose [`Dispose`] implementation runs during
    /// [`cleanup`](ServiceRegistry::cleanup) (and on
    /// [`unregister`](ServiceRegistry::unregister) of a realized instance).
    pub fn register_disposable_singleton<T, F>(
        &mut self,
        name: &'static str,
        dependencies: &[&'static str],
        factory: F,
    ) -> RegistryResult<()>
    where
        T: Dispose + 'static,
        F: Fn(&ServiceRegistry) -> Result<T, BoxedError> + Send + Sync + 'static,
    {
        let ctor: ErasedCtor =
            Arc::new(move |registry| factory(registry).map(|value| Arc::new(value) as AnyArc));
        // The cached instance is always produced by this registration's
        // ctor, so the downcast cannot miss.
        let finalizer: ErasedFinalizer = Arc::new(|instance: &AnyArc| {
            match instance.downcast_ref::<T>() {
                Some(service) => service.dispose(),
                None => Ok(()),
            }
        });
        self.register_erased(name, Lifetime::Singleton, dependencies.to_vec(), ctor, Some(finalizer))
    }

    fn register_erased(
        &mut self,
        name: &'static str,
        lifetime: Lifetime,
        dependencies: Vec<&'static str>,
        ctor: ErasedCtor,
        finalizer: Option<ErasedFinalizer>,
    ) -> RegistryResult<()> {
        if name.trim().is_empty() {
            return Err(RegistryError::InvalidName);
        }
        let state = self.state.get_mut().unwrap();
        if state.torn_down {
            return Err(RegistryError::TornDown(name));
        }
        if self.table.contains(name) {
            match self.policy {
                OverridePolicy::Strict => {
                    return Err(RegistryError::DuplicateRegistration(name));
                }
                OverridePolicy::Permissive => {
                    if state.singletons.remove(name).is_some() {
                        state.realized.retain(|&realized| realized != name);
                        debug!("{}: evicted cached '{}' on re-registration", self.name, name);
                    }
                    state.failed.retain(|&failed| failed != name);
                }
            }
        }
        self.table
            .insert(name, Registration::new(lifetime, ctor, dependencies, finalizer));
        self.observers.registered(name, lifetime);
        debug!("{}: registered '{}' as {:?}", self.name, name, lifetime);
        Ok(())
    }

    // ----- Resolution -----

    /// Resolves `name` as a `T`.
    ///
    /// Singletons are constructed on first resolution and cached; every
    /// later call returns the same instance. Transients run their factory
    /// on every call. Fails with
    /// [`TypeMismatch`](RegistryError::TypeMismatch) when the registered
    /// instance is not a `T`.
    pub fn resolve<T: Send + Sync + 'static>(&self, name: &'static str) -> RegistryResult<Arc<T>> {
        self.resolve_any(name)?
            .downcast::<T>()
            .map_err(|_| RegistryError::TypeMismatch(name))
    }

    /// Resolves `name` type-erased. Prefer [`resolve`](ServiceRegistry::resolve).
    pub fn resolve_any(&self, name: &'static str) -> RegistryResult<Arc<dyn Any + Send + Sync>> {
        // Cached singleton fast path: a guarded map read, no factory call,
        // same object identity on every hit.
        {
            let state = self.state.lock().unwrap();
            if state.torn_down {
                return Err(RegistryError::TornDown(name));
            }
            if let Some(instance) = state.singletons.get(name) {
                return Ok(instance.clone());
            }
        }

        let registration = match self.table.get(name) {
            Some(registration) => registration,
            None => return Err(RegistryError::UnknownService(name)),
        };

        let _frame = enter(&self.stack, name).map_err(RegistryError::Circular)?;

        self.observers.resolving(name);
        let started = Instant::now();
        // No lock is held here: the factory re-enters `resolve` for its
        // own dependencies.
        match (registration.ctor)(self) {
            Ok(instance) => {
                let elapsed = started.elapsed();
                self.observers.resolved(name, elapsed);
                debug!("{}: resolved '{}' in {:?}", self.name, name, elapsed);
                if registration.lifetime.is_singleton() {
                    let mut state = self.state.lock().unwrap();
                    // Racing first resolutions land here twice; the later
                    // instance wins (see the concurrency notes above).
                    if state.singletons.insert(name, instance.clone()).is_none() {
                        state.realized.push(name);
                    }
                }
                Ok(instance)
            }
            Err(source) => {
                {
                    let mut state = self.state.lock().unwrap();
                    if !state.failed.contains(&name) {
                        state.failed.push(name);
                    }
                }
                self.observers.construction_failed(name, &source.to_string());
                warn!("{}: construction of '{}' failed: {}", self.name, name, source);
                // Registry errors surfaced by nested resolves keep their
                // root cause; only foreign factory errors are wrapped.
                match source.downcast::<RegistryError>() {
                    Ok(inner) => Err(*inner),
                    Err(source) => Err(RegistryError::Construction {
                        service: name,
                        source: source.into(),
                    }),
                }
            }
        }
    }

    // ----- Queries -----

    /// True iff `name` is registered. Pure query, never constructs.
    /// False once the registry is torn down.
    pub fn is_registered(&self, name: &str) -> bool {
        !self.state.lock().unwrap().torn_down && self.table.contains(name)
    }

    /// True iff a singleton instance for `name` is already cached.
    pub fn is_realized(&self, name: &str) -> bool {
        self.state.lock().unwrap().singletons.contains_key(name)
    }

    /// Declared dependencies of `name`.
    pub fn dependencies_of(&self, name: &'static str) -> RegistryResult<Vec<&'static str>> {
        if self.state.lock().unwrap().torn_down {
            return Err(RegistryError::TornDown(name));
        }
        match self.table.get(name) {
            Some(registration) => Ok(registration.dependencies.clone()),
            None => Err(RegistryError::UnknownService(name)),
        }
    }

    /// All registered names in registration order. Empty once torn down.
    pub fn get_registered_services(&self) -> Vec<&'static str> {
        if self.state.lock().unwrap().torn_down {
            return Vec::new();
        }
        self.table.names()
    }

    /// Descriptor for `name`, if registered.
    pub fn describe(&self, name: &str) -> Option<ServiceDescriptor> {
        if self.state.lock().unwrap().torn_down {
            return None;
        }
        self.table.iter().find(|(entry_name, _)| *entry_name == name).map(
            |(entry_name, registration)| ServiceDescriptor {
                name: entry_name,
                lifetime: registration.lifetime,
                dependencies: registration.dependencies.clone(),
            },
        )
    }

    /// Descriptors for every registration, in registration order.
    pub fn descriptors(&self) -> Vec<ServiceDescriptor> {
        if self.state.lock().unwrap().torn_down {
            return Vec::new();
        }
        self.table
            .iter()
            .map(|(name, registration)| ServiceDescriptor {
                name,
                lifetime: registration.lifetime,
                dependencies: registration.dependencies.clone(),
            })
            .collect()
    }

    /// Read-only snapshot of container state for startup health checks.
    pub fn get_container_stats(&self) -> ContainerStats {
        let state = self.state.lock().unwrap();
        if state.torn_down {
            return ContainerStats::default();
        }
        let mut singletons = 0;
        let mut transients = 0;
        for (_, registration) in self.table.iter() {
            match registration.lifetime {
                Lifetime::Singleton => singletons += 1,
                Lifetime::Transient => transients += 1,
            }
        }
        ContainerStats {
            total: self.table.len(),
            singletons,
            transients,
            realized_count: state.singletons.len(),
            failed: state.failed.clone(),
        }
    }

    /// Diagnostics facade over this registry.
    pub fn diagnostics(&self) -> Diagnostics<'_> {
        Diagnostics::new(self)
    }

    // ----- Lifecycle -----

    /// Removes the registration for `name`, tearing down its cached
    /// singleton first when one exists. Returns `false` when the name was
    /// never registered.
    pub fn unregister(&mut self, name: &'static str) -> RegistryResult<bool> {
        let state = self.state.get_mut().unwrap();
        if state.torn_down {
            return Err(RegistryError::TornDown(name));
        }
        let registration = match self.table.remove(name) {
            Some(registration) => registration,
            None => return Ok(false),
        };
        state.failed.retain(|&failed| failed != name);
        if let Some(instance) = state.singletons.remove(name) {
            state.realized.retain(|&realized| realized != name);
            if let Some(finalizer) = &registration.finalizer {
                if let Err(source) = finalizer(&instance) {
                    return Err(RegistryError::Cleanup(vec![CleanupFailure {
                        service: name,
                        source: source.into(),
                    }]));
                }
            }
        }
        debug!("{}: unregistered '{}'", self.name, name);
        Ok(true)
    }

    /// Tears down every realized singleton in reverse realization order
    /// and leaves the registry in its terminal state.
    ///
    /// Every teardown hook is attempted; failures are collected into an
    /// aggregate [`Cleanup`](RegistryError::Cleanup) error. Idempotent:
    /// calling again on a torn-down registry is a successful no-op. A
    /// fresh registry must be composed for any further resolution.
    pub fn cleanup(&self) -> RegistryResult<()> {
        let (order, instances) = {
            let mut state = self.state.lock().unwrap();
            if state.torn_down {
                return Ok(());
            }
            state.torn_down = true;
            state.failed.clear();
            (
                std::mem::take(&mut state.realized),
                std::mem::take(&mut state.singletons),
            )
        };
        info!("{}: tearing down {} realized service(s)", self.name, order.len());

        let mut failures = Vec::new();
        for &name in order.iter().rev() {
            let registration = match self.table.get(name) {
                Some(registration) => registration,
                None => continue,
            };
            let finalizer = match &registration.finalizer {
                Some(finalizer) => finalizer,
                None => continue,
            };
            let instance = match instances.get(name) {
                Some(instance) => instance,
                None => continue,
            };
            if let Err(source) = finalizer(instance) {
                warn!("{}: teardown of '{}' failed: {}", self.name, name, source);
                failures.push(CleanupFailure {
                    service: name,
                    source: source.into(),
                });
            }
        }

        if failures.is_empty() {
            info!("{}: cleanup complete", self.name);
            Ok(())
        } else {
            Err(RegistryError::Cleanup(failures))
        }
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new("main")
    }
}

impl Drop for ServiceRegistry {
    fn drop(&mut self) {
        if let Ok(state) = self.state.get_mut() {
            if !state.torn_down && !state.realized.is_empty() {
                warn!(
                    "{}: dropped with {} realized service(s), call cleanup() before shutdown",
                    self.name,
                    state.realized.len()
                );
            }
        }
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock().unwrap();
        f.debug_struct("ServiceRegistry")
            .field("name", &self.name)
            .field("policy", &self.policy)
            .field("registered", &self.table.len())
            .field("realized", &state.singletons.len())
            .field("torn_down", &state.torn_down)
            .finish()
    }
}
