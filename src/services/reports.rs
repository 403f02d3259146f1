//! Reporting services: reports, exports, company data for letterheads.

use std::sync::Arc;

use super::database::DatabaseConnection;
use super::sales::MovementService;

/// Report queries over the database.
pub struct ReportService {
    db: Arc<DatabaseConnection>,
}

impl ReportService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Arc<DatabaseConnection> {
        &self.db
    }
}

/// Document export built on top of movements and reports.
pub struct ExportService {
    movements: Arc<MovementService>,
    reports: Arc<ReportService>,
}

impl ExportService {
    pub fn new(movements: Arc<MovementService>, reports: Arc<ReportService>) -> Self {
        Self { movements, reports }
    }

    pub fn movements(&self) -> &Arc<MovementService> {
        &self.movements
    }

    pub fn reports(&self) -> &Arc<ReportService> {
        &self.reports
    }
}

/// Company master data shown on tickets and report headers.
pub struct CompanyService {
    db: Arc<DatabaseConnection>,
}

impl CompanyService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Arc<DatabaseConnection> {
        &self.db
    }
}
