//! Role-based view gating.
//!
//! This decides which view to show; it is not a security boundary.

use crate::auth::{Role, Session};

/// Why a view was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// Nobody is signed in.
    Unauthenticated,
    /// The signed-in user has a different role.
    WrongRole { required: Role, actual: Role },
}

/// Outcome of [`authorize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny(DenyReason),
}

impl Access {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Access::Allow)
    }
}

/// Decide whether `session` may see a view requiring `required`.
///
/// `None` means any signed-in user is accepted.
pub fn authorize(session: Option<&Session>, required: Option<Role>) -> Access {
    let Some(session) = session else {
        return Access::Deny(DenyReason::Unauthenticated);
    };
    match required {
        Some(required) if required != session.role() => Access::Deny(DenyReason::WrongRole {
            required,
            actual: session.role(),
        }),
        _ => Access::Allow,
    }
}
