//! Sales-side services: clients, sales, stock movements, tickets.

use std::sync::Arc;

use super::catalog::ProductService;
use super::database::DatabaseConnection;

/// Client records.
pub struct ClientService {
    db: Arc<DatabaseConnection>,
}

impl ClientService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Arc<DatabaseConnection> {
        &self.db
    }
}

/// Sales processing. Consults the product service for stock checks before
/// committing a sale.
pub struct SalesService {
    db: Arc<DatabaseConnection>,
    products: Arc<ProductService>,
}

impl SalesService {
    pub fn new(db: Arc<DatabaseConnection>, products: Arc<ProductService>) -> Self {
        Self { db, products }
    }

    pub fn database(&self) -> &Arc<DatabaseConnection> {
        &self.db
    }

    pub fn products(&self) -> &Arc<ProductService> {
        &self.products
    }
}

/// Inventory movement entries (receipts, adjustments, transfers).
pub struct MovementService {
    db: Arc<DatabaseConnection>,
}

impl MovementService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Arc<DatabaseConnection> {
        &self.db
    }
}

/// Sale and entry ticket persistence.
pub struct TicketService {
    db: Arc<DatabaseConnection>,
}

impl TicketService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Arc<DatabaseConnection> {
        &self.db
    }
}
