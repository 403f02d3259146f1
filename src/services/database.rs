//! Database connection handle shared by every domain service.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::BoxedError;
use crate::traits::Dispose;

/// Handle to the application's database file.
///
/// Schema and queries belong to the consuming services; the registry only
/// manages this handle's lifecycle, closing it during cleanup.
#[derive(Debug)]
pub struct DatabaseConnection {
    path: PathBuf,
    open: AtomicBool,
}

impl DatabaseConnection {
    /// Opens a connection handle for the database file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            open: AtomicBool::new(true),
        }
    }

    /// Path of the backing database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True until [`close`](DatabaseConnection::close) has run.
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    /// Closes the handle. Fails if it was already closed.
    pub fn close(&self) -> Result<(), BoxedError> {
        if self.open.swap(false, Ordering::SeqCst) {
            Ok(())
        } else {
            Err("database connection already closed".into())
        }
    }
}

impl Dispose for DatabaseConnection {
    fn dispose(&self) -> Result<(), BoxedError> {
        self.close()
    }
}
