use std::path::PathBuf;
use std::sync::Arc;

use stockpoint_registry::bootstrap::names;
use stockpoint_registry::services::{
    AuthService, DatabaseConnection, ProductService, SalesService, SessionManager,
};
use stockpoint_registry::{setup_default_container, BootstrapConfig};

#[test]
fn default_container_registers_the_full_service_set_in_order() {
    let registry = setup_default_container(&BootstrapConfig::default()).unwrap();

    assert_eq!(
        registry.get_registered_services(),
        vec![
            names::DATABASE,
            names::PASSWORD_HASHER,
            names::SESSION_MANAGER,
            names::CATEGORY_SERVICE,
            names::PRODUCT_SERVICE,
            names::CLIENT_SERVICE,
            names::MOVEMENT_SERVICE,
            names::REPORT_SERVICE,
            names::INVENTORY_SERVICE,
            names::COMPANY_SERVICE,
            names::TICKET_SERVICE,
            names::SALES_SERVICE,
            names::EXPORT_SERVICE,
            names::USER_SERVICE,
            names::AUTH_SERVICE,
        ]
    );

    let stats = registry.get_container_stats();
    assert_eq!(stats.total, 15);
    assert_eq!(stats.singletons, 15);
    assert_eq!(stats.transients, 0);
    // Composition is pure declaration.
    assert_eq!(stats.realized_count, 0);
}

#[test]
fn default_container_passes_the_startup_self_check() {
    let registry = setup_default_container(&BootstrapConfig::default()).unwrap();
    let diagnostics = registry.diagnostics();

    assert!(diagnostics.ensure_ready().is_ok());
    assert!(diagnostics.verify_wiring().is_empty());
}

#[test]
fn resolving_auth_service_realizes_exactly_its_dependency_closure() {
    let registry = setup_default_container(&BootstrapConfig::default()).unwrap();

    registry.resolve::<AuthService>(names::AUTH_SERVICE).unwrap();

    // auth_service -> user_service -> database + password_hasher,
    // plus session_manager: five singletons realized, nothing else.
    let stats = registry.get_container_stats();
    assert_eq!(stats.realized_count, 5);
    for name in [
        names::AUTH_SERVICE,
        names::USER_SERVICE,
        names::SESSION_MANAGER,
        names::PASSWORD_HASHER,
        names::DATABASE,
    ] {
        assert!(registry.is_realized(name), "{} should be realized", name);
    }
    assert!(!registry.is_realized(names::PRODUCT_SERVICE));
    assert!(!registry.is_realized(names::SALES_SERVICE));
}

#[test]
fn every_service_shares_the_same_database_connection() {
    let registry = setup_default_container(&BootstrapConfig::default()).unwrap();

    let database = registry
        .resolve::<DatabaseConnection>(names::DATABASE)
        .unwrap();
    let products = registry
        .resolve::<ProductService>(names::PRODUCT_SERVICE)
        .unwrap();
    let sales = registry.resolve::<SalesService>(names::SALES_SERVICE).unwrap();
    let auth = registry.resolve::<AuthService>(names::AUTH_SERVICE).unwrap();

    assert!(Arc::ptr_eq(products.database(), &database));
    assert!(Arc::ptr_eq(sales.database(), &database));
    assert!(Arc::ptr_eq(auth.users().database(), &database));
    // The sales service received the one product service instance.
    assert!(Arc::ptr_eq(sales.products(), &products));
}

#[test]
fn config_controls_the_database_path() {
    let config = BootstrapConfig {
        database_path: PathBuf::from("data/stockpoint.db"),
        container_name: "custom".to_string(),
    };
    let registry = setup_default_container(&config).unwrap();

    assert_eq!(registry.name(), "custom");
    let database = registry
        .resolve::<DatabaseConnection>(names::DATABASE)
        .unwrap();
    assert_eq!(database.path(), PathBuf::from("data/stockpoint.db"));
}

#[test]
fn cleanup_closes_the_database_connection() {
    let registry = setup_default_container(&BootstrapConfig::default()).unwrap();

    let database = registry
        .resolve::<DatabaseConnection>(names::DATABASE)
        .unwrap();
    let sessions = registry
        .resolve::<SessionManager>(names::SESSION_MANAGER)
        .unwrap();
    sessions.open_session("admin");

    assert!(database.is_open());
    registry.cleanup().unwrap();

    assert!(!database.is_open());
    assert!(sessions.current_user().is_none());
}

#[test]
fn each_composition_yields_an_isolated_registry() {
    let first = setup_default_container(&BootstrapConfig::default()).unwrap();
    let second = setup_default_container(&BootstrapConfig::default()).unwrap();

    let db_first = first.resolve::<DatabaseConnection>(names::DATABASE).unwrap();
    let db_second = second
        .resolve::<DatabaseConnection>(names::DATABASE)
        .unwrap();

    assert!(!Arc::ptr_eq(&db_first, &db_second));

    // Tearing down one registry does not touch the other.
    first.cleanup().unwrap();
    assert!(!db_first.is_open());
    assert!(db_second.is_open());
    second.cleanup().unwrap();
}
