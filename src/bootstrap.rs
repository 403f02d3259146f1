//! Default container composition for the application.
//!
//! [`setup_default_container`] is the single composition root: it builds a
//! fresh registry with every known application service registered in
//! dependency order. Registration order only matters for readability;
//! resolution is lazy, so the one hard requirement is that every name a
//! factory resolves is registered somewhere in the same composition.

use std::path::PathBuf;
use std::sync::Arc;

use log::info;
use serde::Deserialize;

use crate::error::RegistryResult;
use crate::registry::ServiceRegistry;
use crate::services::{
    AuthService, CategoryService, ClientService, CompanyService, DatabaseConnection,
    ExportService, InventoryService, MovementService, PasswordHasher, ProductService,
    ReportService, SalesService, SessionManager, TicketService, UserService,
};

/// Well-known service names registered by [`setup_default_container`].
pub mod names {
    pub const DATABASE: &str = "database";
    pub const PASSWORD_HASHER: &str = "password_hasher";
    pub const SESSION_MANAGER: &str = "session_manager";
    pub const CATEGORY_SERVICE: &str = "category_service";
    pub const PRODUCT_SERVICE: &str = "product_service";
    pub const CLIENT_SERVICE: &str = "client_service";
    pub const MOVEMENT_SERVICE: &str = "movement_service";
    pub const REPORT_SERVICE: &str = "report_service";
    pub const INVENTORY_SERVICE: &str = "inventory_service";
    pub const COMPANY_SERVICE: &str = "company_service";
    pub const TICKET_SERVICE: &str = "ticket_service";
    pub const SALES_SERVICE: &str = "sales_service";
    pub const EXPORT_SERVICE: &str = "export_service";
    pub const USER_SERVICE: &str = "user_service";
    pub const AUTH_SERVICE: &str = "auth_service";
}

/// Settings consumed by the bootstrap composer. The application loads this
/// from its own configuration file; the crate only owns the shape.
///
/// # Examples
///
/// ```rust
/// use stockpoint_registry::BootstrapConfig;
///
/// let config: BootstrapConfig =
///     serde_json::from_str(r#"{ "database_path": "data/stock.db" }"#).unwrap();
/// assert_eq!(config.database_path.to_str(), Some("data/stock.db"));
/// assert_eq!(config.container_name, "main");
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Path of the database file opened by the `database` service.
    pub database_path: PathBuf,
    /// Container name used in logs and diagnostics.
    pub container_name: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("inventory.db"),
            container_name: "main".to_string(),
        }
    }
}

/// Builds the application's registry with every known service registered,
/// in dependency order.
///
/// Pure composition: nothing is constructed here. Factories run on first
/// resolution, so missing wiring surfaces lazily as
/// [`UnknownService`](crate::RegistryError::UnknownService), or eagerly
/// through [`Diagnostics::verify_wiring`](crate::Diagnostics::verify_wiring)
/// during the startup self-check.
pub fn setup_default_container(config: &BootstrapConfig) -> RegistryResult<ServiceRegistry> {
    let mut registry = ServiceRegistry::new(config.container_name.clone());

    let database_path = config.database_path.clone();
    registry.register_disposable_singleton::<DatabaseConnection, _>(
        names::DATABASE,
        &[],
        move |_| Ok(DatabaseConnection::open(database_path.clone())),
    )?;

    registry.register_singleton::<PasswordHasher, _>(names::PASSWORD_HASHER, &[], |_| {
        Ok(PasswordHasher::new())
    })?;

    registry.register_disposable_singleton::<SessionManager, _>(
        names::SESSION_MANAGER,
        &[],
        |_| Ok(SessionManager::new()),
    )?;

    registry.register_singleton::<CategoryService, _>(
        names::CATEGORY_SERVICE,
        &[names::DATABASE],
        |r| Ok(CategoryService::new(r.resolve(names::DATABASE)?)),
    )?;

    registry.register_singleton::<ProductService, _>(
        names::PRODUCT_SERVICE,
        &[names::DATABASE],
        |r| Ok(ProductService::new(r.resolve(names::DATABASE)?)),
    )?;

    registry.register_singleton::<ClientService, _>(
        names::CLIENT_SERVICE,
        &[names::DATABASE],
        |r| Ok(ClientService::new(r.resolve(names::DATABASE)?)),
    )?;

    registry.register_singleton::<MovementService, _>(
        names::MOVEMENT_SERVICE,
        &[names::DATABASE],
        |r| Ok(MovementService::new(r.resolve(names::DATABASE)?)),
    )?;

    registry.register_singleton::<ReportService, _>(
        names::REPORT_SERVICE,
        &[names::DATABASE],
        |r| Ok(ReportService::new(r.resolve(names::DATABASE)?)),
    )?;

    registry.register_singleton::<InventoryService, _>(
        names::INVENTORY_SERVICE,
        &[names::DATABASE],
        |r| Ok(InventoryService::new(r.resolve(names::DATABASE)?)),
    )?;

    registry.register_singleton::<CompanyService, _>(
        names::COMPANY_SERVICE,
        &[names::DATABASE],
        |r| Ok(CompanyService::new(r.resolve(names::DATABASE)?)),
    )?;

    registry.register_singleton::<TicketService, _>(
        names::TICKET_SERVICE,
        &[names::DATABASE],
        |r| Ok(TicketService::new(r.resolve(names::DATABASE)?)),
    )?;

    registry.register_singleton::<SalesService, _>(
        names::SALES_SERVICE,
        &[names::DATABASE, names::PRODUCT_SERVICE],
        |r| {
            Ok(SalesService::new(
                r.resolve(names::DATABASE)?,
                r.resolve(names::PRODUCT_SERVICE)?,
            ))
        },
    )?;

    registry.register_singleton::<ExportService, _>(
        names::EXPORT_SERVICE,
        &[names::MOVEMENT_SERVICE, names::REPORT_SERVICE],
        |r| {
            Ok(ExportService::new(
                r.resolve(names::MOVEMENT_SERVICE)?,
                r.resolve(names::REPORT_SERVICE)?,
            ))
        },
    )?;

    registry.register_singleton::<UserService, _>(
        names::USER_SERVICE,
        &[names::DATABASE, names::PASSWORD_HASHER],
        |r| {
            Ok(UserService::new(
                r.resolve(names::DATABASE)?,
                r.resolve(names::PASSWORD_HASHER)?,
            ))
        },
    )?;

    registry.register_singleton::<AuthService, _>(
        names::AUTH_SERVICE,
        &[
            names::USER_SERVICE,
            names::SESSION_MANAGER,
            names::PASSWORD_HASHER,
        ],
        |r| {
            Ok(AuthService::new(
                r.resolve(names::USER_SERVICE)?,
                r.resolve(names::SESSION_MANAGER)?,
                r.resolve(names::PASSWORD_HASHER)?,
            ))
        },
    )?;

    info!(
        "{}: default container composed with {} services",
        registry.name(),
        registry.get_registered_services().len()
    );
    Ok(registry)
}

/// Composes the default container and installs a [`LoggingObserver`]
/// before returning it.
///
/// [`LoggingObserver`]: crate::LoggingObserver
pub fn setup_logged_container(config: &BootstrapConfig) -> RegistryResult<ServiceRegistry> {
    let mut registry = setup_default_container(config)?;
    let prefix = registry.name().to_string();
    registry.add_observer(Arc::new(crate::observer::LoggingObserver::with_prefix(prefix)));
    Ok(registry)
}
