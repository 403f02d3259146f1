use std::sync::Arc;

use stockpoint_registry::{CleanupFailure, RegistryError};

#[test]
fn display_formats() {
    assert_eq!(
        RegistryError::InvalidName.to_string(),
        "service name must not be empty"
    );
    assert_eq!(
        RegistryError::UnknownService("barcode_service").to_string(),
        "service not registered: barcode_service"
    );
    assert_eq!(
        RegistryError::DuplicateRegistration("database").to_string(),
        "service already registered: database"
    );
    assert_eq!(
        RegistryError::Circular(vec!["a", "b", "a"]).to_string(),
        "circular dependency: a -> b -> a"
    );
    assert_eq!(
        RegistryError::TypeMismatch("database").to_string(),
        "type mismatch for service: database"
    );
    assert_eq!(
        RegistryError::TornDown("database").to_string(),
        "registry torn down, cannot access 'database'"
    );
}

#[test]
fn construction_display_includes_service_and_cause() {
    let error = RegistryError::Construction {
        service: "export_service",
        source: Arc::from(Box::<dyn std::error::Error + Send + Sync>::from("no printer")),
    };
    assert_eq!(
        error.to_string(),
        "construction of 'export_service' failed: no printer"
    );
}

#[test]
fn cleanup_display_lists_every_failure() {
    let error = RegistryError::Cleanup(vec![
        CleanupFailure {
            service: "session_manager",
            source: Arc::from(Box::<dyn std::error::Error + Send + Sync>::from("still open")),
        },
        CleanupFailure {
            service: "database",
            source: Arc::from(Box::<dyn std::error::Error + Send + Sync>::from("locked")),
        },
    ]);
    assert_eq!(
        error.to_string(),
        "cleanup failed for 2 service(s): session_manager (still open); database (locked)"
    );
}

#[test]
fn only_construction_has_a_source() {
    use std::error::Error;

    let construction = RegistryError::Construction {
        service: "database",
        source: Arc::from(Box::<dyn std::error::Error + Send + Sync>::from("locked")),
    };
    assert!(construction.source().is_some());

    assert!(RegistryError::UnknownService("database").source().is_none());
    assert!(RegistryError::Circular(vec!["a", "a"]).source().is_none());
}
