//! Error types for the service registry.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Boxed error produced by service factories and teardown hooks.
pub type BoxedError = Box<dyn Error + Send + Sync>;

/// A single failed teardown attempt, collected by [`RegistryError::Cleanup`].
#[derive(Debug, Clone)]
pub struct CleanupFailure {
    /// Name of the service whose teardown failed.
    pub service: &'static str,
    /// The error raised by the teardown hook.
    pub source: Arc<dyn Error + Send + Sync>,
}

impl fmt::Display for CleanupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.service, self.source)
    }
}

/// Registry errors.
///
/// Covers the failure modes of registration, resolution, and teardown.
/// All of these surface to the immediate caller; the registry never
/// swallows or retries. Retry policy, if any, belongs to the factory or
/// the application layer.
///
/// # Examples
///
/// ```rust
/// use stockpoint_registry::{RegistryError, ServiceRegistry};
///
/// let registry = ServiceRegistry::new("docs");
/// match registry.resolve::<u32>("missing") {
///     Err(RegistryError::UnknownService(name)) => assert_eq!(name, "missing"),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone)]
pub enum RegistryError {
    /// Registration was attempted with an empty service name
    InvalidName,
    /// Service name is not registered
    UnknownService(&'static str),
    /// Strict-mode re-registration of an existing name
    DuplicateRegistration(&'static str),
    /// Circular dependency detected (includes the full cycle path)
    Circular(Vec<&'static str>),
    /// The factory for the named service failed
    Construction {
        /// Service whose factory raised the error.
        service: &'static str,
        /// The factory's error.
        source: Arc<dyn Error + Send + Sync>,
    },
    /// One or more teardown hooks failed during cleanup
    Cleanup(Vec<CleanupFailure>),
    /// Typed accessor downcast failed for the named service
    TypeMismatch(&'static str),
    /// Operation on a registry that has already been torn down
    TornDown(&'static str),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::InvalidName => write!(f, "service name must not be empty"),
            RegistryError::UnknownService(name) => {
                write!(f, "service not registered: {}", name)
            }
            RegistryError::DuplicateRegistration(name) => {
                write!(f, "service already registered: {}", name)
            }
            RegistryError::Circular(path) => {
                write!(f, "circular dependency: {}", path.join(" -> "))
            }
            RegistryError::Construction { service, source } => {
                write!(f, "construction of '{}' failed: {}", service, source)
            }
            RegistryError::Cleanup(failures) => {
                write!(f, "cleanup failed for {} service(s): ", failures.len())?;
                for (i, failure) in failures.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", failure)?;
                }
                Ok(())
            }
            RegistryError::TypeMismatch(name) => {
                write!(f, "type mismatch for service: {}", name)
            }
            RegistryError::TornDown(name) => {
                write!(f, "registry torn down, cannot access '{}'", name)
            }
        }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RegistryError::Construction { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
