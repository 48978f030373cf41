//! Dashboard routes and navigation decisions.

use crate::access::{Access, DenyReason, authorize};
use crate::auth::{Role, Session};
use std::fmt;

/// A dashboard view addressed by path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/login`
    Login,
    /// `/register`
    Register,
    /// `/`
    StudentDashboard,
    /// `/teacher`
    TeacherDashboard,
    /// `/parent`
    ParentDashboard,
    /// `/canvas/:sectionId`
    Canvas { section_id: String },
}

impl Route {
    /// Parse a path. Trailing slashes and a query string are ignored.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Some(Route::StudentDashboard),
            ["login"] => Some(Route::Login),
            ["register"] => Some(Route::Register),
            ["teacher"] => Some(Route::TeacherDashboard),
            ["parent"] => Some(Route::ParentDashboard),
            ["canvas", section] => Some(Route::Canvas {
                section_id: (*section).to_string(),
            }),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::StudentDashboard => "/".to_string(),
            Route::TeacherDashboard => "/teacher".to_string(),
            Route::ParentDashboard => "/parent".to_string(),
            Route::Canvas { section_id } => format!("/canvas/{}", section_id),
        }
    }

    /// Whether the view needs a signed-in user.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login | Route::Register)
    }

    /// Role the view is restricted to, if any.
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Route::TeacherDashboard => Some(Role::Teacher),
            Route::ParentDashboard => Some(Role::Parent),
            _ => None,
        }
    }

    /// The dashboard a user of `role` lands on.
    pub fn home_for(role: Role) -> Self {
        match role {
            Role::Student => Route::StudentDashboard,
            Role::Teacher => Route::TeacherDashboard,
            Role::Parent => Route::ParentDashboard,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Result of navigating to a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
    NotFound,
}

/// Decide what to show for `path` given the current session.
pub fn resolve(path: &str, session: Option<&Session>) -> Navigation {
    let Some(route) = Route::parse(path) else {
        return Navigation::NotFound;
    };
    if !route.is_protected() {
        return Navigation::Render(route);
    }
    match authorize(session, route.required_role()) {
        Access::Allow => Navigation::Render(route),
        Access::Deny(DenyReason::Unauthenticated) => Navigation::Redirect(Route::Login),
        Access::Deny(DenyReason::WrongRole { actual, .. }) => {
            Navigation::Redirect(Route::home_for(actual))
        }
    }
}
