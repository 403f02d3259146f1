//! Resolution observers for container traceability.
//!
//! Observers hook registry events (registration, resolution start/finish,
//! construction failures) for structured logging and debugging. The
//! built-in [`LoggingObserver`] forwards events to the `log` facade.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, trace, warn};

use crate::lifetime::Lifetime;

/// Observer hooks for registry events.
///
/// Observer calls are made synchronously during registration and
/// resolution. Keep implementations lightweight; for expensive sinks,
/// queue events and process them elsewhere.
///
/// # Examples
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
/// use stockpoint_registry::{RegistryObserver, ServiceRegistry};
///
/// #[derive(Default)]
/// struct Recorder {
///     events: Mutex<Vec<String>>,
/// }
///
/// impl RegistryObserver for Recorder {
///     fn resolving(&self, name: &'static str) {
///         self.events.lock().unwrap().push(format!("resolving {}", name));
///     }
///
///     fn resolved(&self, name: &'static str, _duration: Duration) {
///         self.events.lock().unwrap().push(format!("resolved {}", name));
///     }
///
///     fn construction_failed(&self, name: &'static str, message: &str) {
///         self.events.lock().unwrap().push(format!("failed {}: {}", name, message));
///     }
/// }
///
/// let mut registry = ServiceRegistry::new("docs");
/// let recorder = Arc::new(Recorder::default());
/// registry.add_observer(recorder.clone());
/// registry
///     .register_singleton::<u32, _>("answer", &[], |_| Ok(42))
///     .unwrap();
/// registry.resolve::<u32>("answer").unwrap();
///
/// let events = recorder.events.lock().unwrap();
/// assert_eq!(events.as_slice(), ["resolving answer", "resolved answer"]);
/// ```
pub trait RegistryObserver: Send + Sync {
    /// Called when a service is registered.
    fn registered(&self, name: &'static str, lifetime: Lifetime) {
        let _ = (name, lifetime);
    }

    /// Called before the factory for `name` runs. Not called for cached
    /// singleton hits.
    fn resolving(&self, name: &'static str);

    /// Called when `name` resolved successfully, with the time elapsed
    /// since the matching [`resolving`](RegistryObserver::resolving) call.
    fn resolved(&self, name: &'static str, duration: Duration);

    /// Called when the factory for `name` failed.
    fn construction_failed(&self, name: &'static str, message: &str);
}

/// Container for registered observers. Minimal overhead when empty.
#[derive(Default)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn RegistryObserver>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, observer: Arc<dyn RegistryObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub(crate) fn registered(&self, name: &'static str, lifetime: Lifetime) {
        for observer in &self.observers {
            observer.registered(name, lifetime);
        }
    }

    #[inline]
    pub(crate) fn resolving(&self, name: &'static str) {
        for observer in &self.observers {
            observer.resolving(name);
        }
    }

    #[inline]
    pub(crate) fn resolved(&self, name: &'static str, duration: Duration) {
        for observer in &self.observers {
            observer.resolved(name, duration);
        }
    }

    #[inline]
    pub(crate) fn construction_failed(&self, name: &'static str, message: &str) {
        for observer in &self.observers {
            observer.construction_failed(name, message);
        }
    }
}

/// Built-in observer that forwards registry events to the `log` facade.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use stockpoint_registry::{LoggingObserver, ServiceRegistry};
///
/// let mut registry = ServiceRegistry::new("main");
/// registry.add_observer(Arc::new(LoggingObserver::new()));
/// ```
pub struct LoggingObserver {
    prefix: String,
}

impl LoggingObserver {
    /// Creates a logging observer with the default `registry` prefix.
    pub fn new() -> Self {
        Self {
            prefix: "registry".to_string(),
        }
    }

    /// Creates a logging observer with a custom prefix, useful when
    /// several registries coexist in tests.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryObserver for LoggingObserver {
    fn registered(&self, name: &'static str, lifetime: Lifetime) {
        debug!("{}: registered '{}' as {:?}", self.prefix, name, lifetime);
    }

    fn resolving(&self, name: &'static str) {
        trace!("{}: resolving '{}'", self.prefix, name);
    }

    fn resolved(&self, name: &'static str, duration: Duration) {
        debug!("{}: resolved '{}' in {:?}", self.prefix, name, duration);
    }

    fn construction_failed(&self, name: &'static str, message: &str) {
        warn!("{}: construction of '{}' failed: {}", self.prefix, name, message);
    }
}
