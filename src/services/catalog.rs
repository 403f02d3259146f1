//! Catalog services: categories, products, inventory counts.

use std::sync::Arc;

use super::database::DatabaseConnection;

/// Category management.
pub struct CategoryService {
    db: Arc<DatabaseConnection>,
}

impl CategoryService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Arc<DatabaseConnection> {
        &self.db
    }
}

/// Product management, including stock lookups used by sales.
pub struct ProductService {
    db: Arc<DatabaseConnection>,
}

impl ProductService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Arc<DatabaseConnection> {
        &self.db
    }
}

/// Physical inventory counts and adjustments.
pub struct InventoryService {
    db: Arc<DatabaseConnection>,
}

impl InventoryService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Arc<DatabaseConnection> {
        &self.db
    }
}
