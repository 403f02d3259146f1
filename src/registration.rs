//! Stored service registrations.

use std::any::Any;
use std::sync::Arc;

use crate::error::BoxedError;
use crate::lifetime::Lifetime;
use crate::registry::ServiceRegistry;

/// Type-erased Arc for instance storage.
pub(crate) type AnyArc = Arc<dyn Any + Send + Sync>;

/// Erased factory stored in a registration. Receives the registry so it
/// can resolve its own dependencies.
pub(crate) type ErasedCtor =
    Arc<dyn Fn(&ServiceRegistry) -> Result<AnyArc, BoxedError> + Send + Sync>;

/// Erased teardown hook, run against the cached singleton during cleanup.
pub(crate) type ErasedFinalizer = Arc<dyn Fn(&AnyArc) -> Result<(), BoxedError> + Send + Sync>;

/// A registered service: lifetime, constructor, declared dependencies,
/// and an optional teardown finalizer.
pub(crate) struct Registration {
    pub(crate) lifetime: Lifetime,
    pub(crate) ctor: ErasedCtor,
    pub(crate) dependencies: Vec<&'static str>,
    pub(crate) finalizer: Option<ErasedFinalizer>,
}

impl Registration {
    pub(crate) fn new(
        lifetime: Lifetime,
        ctor: ErasedCtor,
        dependencies: Vec<&'static str>,
        finalizer: Option<ErasedFinalizer>,
    ) -> Self {
        Self {
            lifetime,
            ctor,
            dependencies,
            finalizer,
        }
    }
}

/// Insertion-ordered registration table.
///
/// A `Vec` with linear scan: the container holds ten to twenty services,
/// where a scan beats hashing and keeps registration order for free.
#[derive(Default)]
pub(crate) struct RegistrationTable {
    entries: Vec<(&'static str, Registration)>,
}

impl RegistrationTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn get(&self, name: &str) -> Option<&Registration> {
        self.entries
            .iter()
            .find(|(entry_name, _)| *entry_name == name)
            .map(|(_, registration)| registration)
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(entry_name, _)| *entry_name == name)
    }

    /// Inserts `registration` under `name`, replacing an existing entry in
    /// place so its position in the insertion order is preserved.
    pub(crate) fn insert(&mut self, name: &'static str, registration: Registration) {
        match self.entries.iter().position(|(entry_name, _)| *entry_name == name) {
            Some(pos) => self.entries[pos] = (name, registration),
            None => self.entries.push((name, registration)),
        }
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<Registration> {
        let pos = self
            .entries
            .iter()
            .position(|(entry_name, _)| *entry_name == name)?;
        Some(self.entries.remove(pos).1)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&'static str, &Registration)> {
        self.entries.iter().map(|(name, registration)| (*name, registration))
    }

    pub(crate) fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(name, _)| *name).collect()
    }
}
