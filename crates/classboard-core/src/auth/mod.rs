//! Authentication: users, sessions and the backend seam.
//!
//! The dashboard never talks to a real identity provider. Views depend on
//! [`AuthBackend`]; [`MockAuthBackend`] is the in-process implementation.

mod mock;
mod session;

pub use mock::{DEMO_PASSWORD, MIN_PASSWORD_LEN, MockAuthBackend};
pub use session::{SESSION_KEY, SessionContext};

use crate::storage::{BoxFuture, StorageError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use uuid::Uuid;

/// Dashboard roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Teacher,
    Parent,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Teacher, Role::Parent];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Parent => "parent",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AuthError::UnknownRole(s.to_string()))
    }
}

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email is required")]
    MissingEmail,
    #[error("Password is required")]
    MissingPassword,
    #[error("Name is required")]
    MissingName,
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("An account already exists for {0}")]
    AccountExists(String),
    #[error("Unknown role: {0}")]
    UnknownRole(String),
    #[error("Session storage failed: {0}")]
    Storage(#[from] StorageError),
    #[error("Auth backend error: {0}")]
    Backend(String),
}

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Sign-in form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Sign-up form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: User,
    pub token: Uuid,
    /// Sign-in time, seconds since the Unix epoch.
    pub signed_in_at: u64,
}

impl Session {
    /// Start a new session for `user` with a fresh token.
    pub fn start(user: User) -> Self {
        let signed_in_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            user,
            token: Uuid::new_v4(),
            signed_in_at,
        }
    }

    pub fn role(&self) -> Role {
        self.user.role
    }
}

/// Identity backend used by the session context.
pub trait AuthBackend: Send + Sync {
    /// Check credentials and open a session.
    fn authenticate(&self, credentials: &Credentials) -> BoxFuture<'_, AuthResult<Session>>;

    /// Create an account and open a session for it.
    fn register(&self, registration: &Registration) -> BoxFuture<'_, AuthResult<Session>>;
}

/// Normalize and check an email address.
pub(crate) fn validate_email(email: &str) -> AuthResult<String> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AuthError::MissingEmail);
    }
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !valid {
        return Err(AuthError::InvalidEmail(email.to_string()));
    }
    Ok(email.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!("teacher".parse::<Role>().unwrap(), Role::Teacher);
        assert_eq!(" Parent ".parse::<Role>().unwrap(), Role::Parent);
        assert!(matches!("admin".parse::<Role>(), Err(AuthError::UnknownRole(_))));
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&Role::Student).unwrap(), "\"student\"");
    }

    #[test]
    fn test_validate_email() {
        assert_eq!(validate_email(" Ana@School.org ").unwrap(), "ana@school.org");
        assert!(matches!(validate_email(""), Err(AuthError::MissingEmail)));
        assert!(matches!(validate_email("ana"), Err(AuthError::InvalidEmail(_))));
        assert!(matches!(validate_email("@school.org"), Err(AuthError::InvalidEmail(_))));
    }

    #[test]
    fn test_session_json() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Ana".to_string(),
            email: "ana@school.org".to_string(),
            role: Role::Student,
        };
        let session = Session::start(user);
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["user"]["role"], "student");
        assert!(json.get("signedInAt").is_some());
    }
}
