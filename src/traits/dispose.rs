//! Disposal trait for resource teardown.

use crate::error::BoxedError;

/// Structured teardown for services that hold external resources.
///
/// Singletons registered through
/// [`register_disposable_singleton`](crate::ServiceRegistry::register_disposable_singleton)
/// get `dispose` invoked by [`cleanup`](crate::ServiceRegistry::cleanup), in
/// reverse realization order. Teardown failures are collected rather than
/// short-circuiting, so every resource gets a teardown attempt.
///
/// # Examples
///
/// ```rust
/// use stockpoint_registry::{BoxedError, Dispose, ServiceRegistry};
///
/// struct Connection;
///
/// impl Dispose for Connection {
///     fn dispose(&self) -> Result<(), BoxedError> {
///         // flush buffers, close the handle...
///         Ok(())
///     }
/// }
///
/// let mut registry = ServiceRegistry::new("docs");
/// registry
///     .register_disposable_singleton::<Connection, _>("connection", &[], |_| Ok(Connection))
///     .unwrap();
/// registry.resolve::<Connection>("connection").unwrap();
/// registry.cleanup().unwrap();
/// ```
pub trait Dispose: Send + Sync {
    /// Release held resources. Invoked at most once per cached instance.
    fn dispose(&self) -> Result<(), BoxedError>;
}
