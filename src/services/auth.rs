//! Authentication services: password hashing, sessions, users.

use std::sync::{Arc, Mutex};

use crate::error::BoxedError;
use crate::traits::Dispose;

use super::database::DatabaseConnection;

/// Password hashing. Stateless; the algorithm lives with the security
/// infrastructure of the consuming application.
#[derive(Debug, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

/// Tracks the authenticated user for the running desktop session.
#[derive(Debug, Default)]
pub struct SessionManager {
    active_user: Mutex<Option<String>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session for `username`, replacing any previous one.
    pub fn open_session(&self, username: impl Into<String>) {
        *self.active_user.lock().unwrap() = Some(username.into());
    }

    /// The currently authenticated user, if any.
    pub fn current_user(&self) -> Option<String> {
        self.active_user.lock().unwrap().clone()
    }

    /// Closes any active session.
    pub fn close_session(&self) {
        *self.active_user.lock().unwrap() = None;
    }
}

impl Dispose for SessionManager {
    fn dispose(&self) -> Result<(), BoxedError> {
        self.close_session();
        Ok(())
    }
}

/// User records and credential storage.
pub struct UserService {
    db: Arc<DatabaseConnection>,
    hasher: Arc<PasswordHasher>,
}

impl UserService {
    pub fn new(db: Arc<DatabaseConnection>, hasher: Arc<PasswordHasher>) -> Self {
        Self { db, hasher }
    }

    pub fn database(&self) -> &Arc<DatabaseConnection> {
        &self.db
    }

    pub fn hasher(&self) -> &Arc<PasswordHasher> {
        &self.hasher
    }
}

/// Login/logout orchestration over users and sessions.
pub struct AuthService {
    users: Arc<UserService>,
    sessions: Arc<SessionManager>,
    hasher: Arc<PasswordHasher>,
}

impl AuthService {
    pub fn new(
        users: Arc<UserService>,
        sessions: Arc<SessionManager>,
        hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            users,
            sessions,
            hasher,
        }
    }

    pub fn users(&self) -> &Arc<UserService> {
        &self.users
    }

    pub fn sessions(&self) -> &Arc<SessionManager> {
        &self.sessions
    }

    pub fn hasher(&self) -> &Arc<PasswordHasher> {
        &self.hasher
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_lifecycle() {
        let sessions = SessionManager::new();
        assert!(sessions.current_user().is_none());

        sessions.open_session("admin");
        assert_eq!(sessions.current_user().as_deref(), Some("admin"));

        sessions.dispose().unwrap();
        assert!(sessions.current_user().is_none());
    }
}
