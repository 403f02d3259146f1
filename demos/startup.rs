//! Application startup walkthrough: compose the container, run the
//! self-check, resolve services, shut down.
//!
//! Run with `RUST_LOG=debug cargo run --example startup` to watch the
//! registry's log output.

use std::sync::Arc;

use stockpoint_registry::bootstrap::names;
use stockpoint_registry::services::{AuthService, DatabaseConnection, SalesService};
use stockpoint_registry::{setup_logged_container, BootstrapConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = BootstrapConfig::default();
    let registry = setup_logged_container(&config)?;

    // Startup self-check: every declared dependency registered, no cycles.
    if let Err(issues) = registry.diagnostics().ensure_ready() {
        for issue in &issues {
            eprintln!("wiring issue: {}", issue);
        }
        std::process::exit(1);
    }

    // Resolve the startup chain from the main thread, before any worker
    // threads exist.
    let database: Arc<DatabaseConnection> = registry.resolve(names::DATABASE)?;
    let sales: Arc<SalesService> = registry.resolve(names::SALES_SERVICE)?;
    let auth: Arc<AuthService> = registry.resolve(names::AUTH_SERVICE)?;

    auth.sessions().open_session("admin");
    println!("database file: {}", database.path().display());
    println!(
        "sales service wired to the shared connection: {}",
        Arc::ptr_eq(sales.database(), &database)
    );
    println!(
        "signed in as: {}",
        auth.sessions().current_user().unwrap_or_default()
    );

    let stats = registry.get_container_stats();
    println!(
        "{} services registered, {} realized, {} failed",
        stats.total,
        stats.realized_count,
        stats.failed.len()
    );

    // Shutdown: tears down realized singletons in reverse realization
    // order (auth chain first, database last).
    registry.cleanup()?;
    println!("database closed: {}", !database.is_open());
    Ok(())
}
