use stockpoint_registry::{ServiceRegistry, WiringIssue};

fn registry_with(edges: &[(&'static str, &'static [&'static str])]) -> ServiceRegistry {
    let mut registry = ServiceRegistry::new("test");
    for &(name, dependencies) in edges {
        registry
            .register_singleton::<u32, _>(name, dependencies, |_| Ok(0))
            .unwrap();
    }
    registry
}

#[test]
fn complete_wiring_reports_no_issues() {
    let registry = registry_with(&[
        ("database", &[]),
        ("product_service", &["database"]),
        ("sales_service", &["database", "product_service"]),
    ]);

    assert!(registry.diagnostics().verify_wiring().is_empty());
    assert!(registry.diagnostics().ensure_ready().is_ok());
}

#[test]
fn missing_dependencies_are_reported_per_edge() {
    let registry = registry_with(&[
        ("product_service", &["database"]),
        ("export_service", &["movement_service", "report_service"]),
    ]);

    let issues = registry.diagnostics().verify_wiring();
    assert_eq!(
        issues,
        vec![
            WiringIssue::MissingDependency {
                service: "product_service",
                missing: "database",
            },
            WiringIssue::MissingDependency {
                service: "export_service",
                missing: "movement_service",
            },
            WiringIssue::MissingDependency {
                service: "export_service",
                missing: "report_service",
            },
        ]
    );
    assert!(registry.diagnostics().ensure_ready().is_err());
}

#[test]
fn declared_cycles_are_reported_without_construction() {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    let constructions = Arc::new(AtomicUsize::new(0));
    let counter_a = constructions.clone();
    let counter_b = constructions.clone();

    let mut registry = ServiceRegistry::new("test");
    registry
        .register_singleton::<u32, _>("a", &["b"], move |_| {
            counter_a.fetch_add(1, Ordering::SeqCst);
            Ok(1)
        })
        .unwrap();
    registry
        .register_singleton::<u32, _>("b", &["a"], move |_| {
            counter_b.fetch_add(1, Ordering::SeqCst);
            Ok(2)
        })
        .unwrap();

    let issues = registry.diagnostics().verify_wiring();
    assert_eq!(issues, vec![WiringIssue::DeclaredCycle(vec!["a", "b", "a"])]);

    // Validation walks descriptors only; no factory ran.
    assert_eq!(constructions.load(Ordering::SeqCst), 0);
}

#[test]
fn each_cycle_is_reported_once() {
    let registry = registry_with(&[
        ("a", &["b"]),
        ("b", &["a"]),
        ("x", &["y"]),
        ("y", &["x"]),
    ]);

    let issues = registry.diagnostics().verify_wiring();
    assert_eq!(
        issues,
        vec![
            WiringIssue::DeclaredCycle(vec!["a", "b", "a"]),
            WiringIssue::DeclaredCycle(vec!["x", "y", "x"]),
        ]
    );
}

#[test]
fn wiring_issues_format_for_startup_logs() {
    let missing = WiringIssue::MissingDependency {
        service: "product_service",
        missing: "database",
    };
    assert_eq!(
        missing.to_string(),
        "'product_service' depends on unregistered 'database'"
    );

    let cycle = WiringIssue::DeclaredCycle(vec!["a", "b", "a"]);
    assert_eq!(cycle.to_string(), "declared dependency cycle: a -> b -> a");
}

#[test]
fn facade_mirrors_registry_queries() {
    let registry = registry_with(&[("database", &[])]);
    let diagnostics = registry.diagnostics();

    assert!(diagnostics.is_registered("database"));
    assert_eq!(diagnostics.registered_services(), vec!["database"]);
    assert_eq!(diagnostics.stats().total, 1);
}
