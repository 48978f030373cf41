//! Explicit session context passed down to views.

use super::{AuthBackend, AuthResult, Credentials, Registration, Session};
use crate::storage::{Storage, StorageError, load_json, save_json};
use std::sync::Arc;

/// Storage key under which the active session is persisted.
pub const SESSION_KEY: &str = "session";

/// Owns the signed-in session for one running dashboard.
///
/// Call [`SessionContext::init`] once at startup to restore a persisted
/// session and [`SessionContext::sign_out`] to tear it down.
pub struct SessionContext {
    backend: Arc<dyn AuthBackend>,
    storage: Arc<dyn Storage>,
    current: Option<Session>,
}

impl SessionContext {
    pub fn new(backend: Arc<dyn AuthBackend>, storage: Arc<dyn Storage>) -> Self {
        Self {
            backend,
            storage,
            current: None,
        }
    }

    /// Restore the persisted session, if any.
    ///
    /// An unreadable stored session is discarded rather than reported, so a
    /// stale format never locks the user out.
    pub async fn init(&mut self) -> AuthResult<Option<&Session>> {
        match load_json::<Session>(self.storage.as_ref(), SESSION_KEY).await {
            Ok(session) => {
                log::info!("Restored session for {}", session.user.email);
                self.current = Some(session);
            }
            Err(StorageError::NotFound(_)) => self.current = None,
            Err(StorageError::Serialization(e)) => {
                log::warn!("Discarding unreadable session: {}", e);
                self.storage.delete(SESSION_KEY).await?;
                self.current = None;
            }
            Err(e) => return Err(e.into()),
        }
        Ok(self.current.as_ref())
    }

    /// The signed-in session.
    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.is_some()
    }

    /// Sign in and persist the new session.
    pub async fn sign_in(&mut self, credentials: &Credentials) -> AuthResult<&Session> {
        let session = self.backend.authenticate(credentials).await?;
        self.establish(session).await
    }

    /// Create an account, sign in as it and persist the session.
    pub async fn register(&mut self, registration: &Registration) -> AuthResult<&Session> {
        let session = self.backend.register(registration).await?;
        self.establish(session).await
    }

    async fn establish(&mut self, session: Session) -> AuthResult<&Session> {
        save_json(self.storage.as_ref(), SESSION_KEY, &session).await?;
        Ok(self.current.insert(session))
    }

    /// End the session and remove it from storage.
    pub async fn sign_out(&mut self) -> AuthResult<()> {
        if let Some(session) = self.current.take() {
            log::info!("Signed out {}", session.user.email);
        }
        self.storage.delete(SESSION_KEY).await?;
        Ok(())
    }
}
