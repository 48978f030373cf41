//! In-process authentication backend.

use super::{
    AuthBackend, AuthError, AuthResult, Credentials, Registration, Role, Session, User,
    validate_email,
};
use crate::storage::BoxFuture;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Password shared by the demo accounts.
pub const DEMO_PASSWORD: &str = "classboard";

#[derive(Debug, Clone)]
struct Account {
    user: User,
    password: String,
}

/// Account directory held in memory.
///
/// Roles are stored with each account; nothing is inferred from the email
/// text.
#[derive(Debug, Default)]
pub struct MockAuthBackend {
    accounts: RwLock<HashMap<String, Account>>,
}

impl MockAuthBackend {
    /// Create a backend with no accounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend with one demo account per role:
    /// `student@classboard.dev`, `teacher@classboard.dev` and
    /// `parent@classboard.dev`, all using [`DEMO_PASSWORD`].
    pub fn with_demo_accounts() -> Self {
        let backend = Self::new();
        for (name, role) in [
            ("Demo Student", Role::Student),
            ("Demo Teacher", Role::Teacher),
            ("Demo Parent", Role::Parent),
        ] {
            let email = format!("{}@classboard.dev", role);
            // Fresh backend with distinct emails; cannot collide.
            let _ = backend.add_account(name, &email, DEMO_PASSWORD, role);
        }
        backend
    }

    /// Add an account directly.
    pub fn add_account(&self, name: &str, email: &str, password: &str, role: Role) -> AuthResult<User> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::MissingName);
        }
        let email = validate_email(email)?;
        if password.is_empty() {
            return Err(AuthError::MissingPassword);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::PasswordTooShort { min: MIN_PASSWORD_LEN });
        }

        let mut accounts = self
            .accounts
            .write()
            .map_err(|e| AuthError::Backend(format!("Lock error: {}", e)))?;
        if accounts.contains_key(&email) {
            return Err(AuthError::AccountExists(email));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.clone(),
            role,
        };
        accounts.insert(
            email,
            Account {
                user: user.clone(),
                password: password.to_string(),
            },
        );
        Ok(user)
    }

    /// Number of registered accounts.
    pub fn account_count(&self) -> usize {
        self.accounts.read().map(|a| a.len()).unwrap_or(0)
    }

    fn check(&self, credentials: &Credentials) -> AuthResult<Session> {
        let email = validate_email(&credentials.email)?;
        if credentials.password.is_empty() {
            return Err(AuthError::MissingPassword);
        }

        let accounts = self
            .accounts
            .read()
            .map_err(|e| AuthError::Backend(format!("Lock error: {}", e)))?;
        match accounts.get(&email) {
            Some(account) if account.password == credentials.password => {
                log::info!("Signed in {} as {}", email, account.user.role);
                Ok(Session::start(account.user.clone()))
            }
            _ => {
                log::debug!("Rejected sign-in for {}", email);
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}

impl AuthBackend for MockAuthBackend {
    fn authenticate(&self, credentials: &Credentials) -> BoxFuture<'_, AuthResult<Session>> {
        let result = self.check(credentials);
        Box::pin(async move { result })
    }

    fn register(&self, registration: &Registration) -> BoxFuture<'_, AuthResult<Session>> {
        let result = self
            .add_account(
                &registration.name,
                &registration.email,
                &registration.password,
                registration.role,
            )
            .map(|user| {
                log::info!("Registered {} as {}", user.email, user.role);
                Session::start(user)
            });
        Box::pin(async move { result })
    }
}
