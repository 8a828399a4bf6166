//! Route table.
//!
//! Pure domain layer: no DOM, no `web_sys`. The frontend router maps these to views.

use crate::Role;
use std::fmt::Display;

const ADMIN_ONLY: &[Role] = &[Role::Admin];
const STUDENT_ONLY: &[Role] = &[Role::Student];

/// Every client-side route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// Public landing page
    #[default]
    Landing,
    RegisterStudent,
    Login,
    /// Admin area
    AdminDashboard,
    AdminAuditLogs(u64),
    /// Student area (`/student` is an index redirect to the dashboard)
    StudentDashboard,
    StudentApplications,
    StudentProfile,
    StudentApply,
    NotFound,
}

impl AppRoute {
    /// Parses a URL path. Trailing slashes are ignored.
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();

        match segments.as_slice() {
            [] | [""] => Self::Landing,
            ["register-student"] => Self::RegisterStudent,
            ["auth", "login"] => Self::Login,
            ["admin"] => Self::AdminDashboard,
            ["admin", "applications", id, "audit-logs"] => match id.parse() {
                Ok(id) => Self::AdminAuditLogs(id),
                Err(_) => Self::NotFound,
            },
            ["student"] | ["student", "dashboard"] => Self::StudentDashboard,
            ["student", "applications"] => Self::StudentApplications,
            ["student", "profile"] => Self::StudentProfile,
            ["student", "apply"] => Self::StudentApply,
            _ => Self::NotFound,
        }
    }

    /// Canonical URL path.
    pub fn to_path(&self) -> String {
        match self {
            Self::Landing => "/".to_string(),
            Self::RegisterStudent => "/register-student".to_string(),
            Self::Login => "/auth/login".to_string(),
            Self::AdminDashboard => "/admin".to_string(),
            Self::AdminAuditLogs(id) => format!("/admin/applications/{}/audit-logs", id),
            Self::StudentDashboard => "/student/dashboard".to_string(),
            Self::StudentApplications => "/student/applications".to_string(),
            Self::StudentProfile => "/student/profile".to_string(),
            Self::StudentApply => "/student/apply".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// Roles allowed to render this route; `None` means public.
    pub fn required_roles(&self) -> Option<&'static [Role]> {
        match self {
            Self::AdminDashboard | Self::AdminAuditLogs(_) => Some(ADMIN_ONLY),
            Self::StudentDashboard
            | Self::StudentApplications
            | Self::StudentProfile
            | Self::StudentApply => Some(STUDENT_ONLY),
            Self::Landing | Self::RegisterStudent | Self::Login | Self::NotFound => None,
        }
    }

    /// Routes a signed-in user is sent away from.
    pub fn guest_only(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// Where a role lands by default, if it has an area of its own.
    pub fn landing_for(role: Role) -> Option<Self> {
        match role {
            Role::Admin => Some(Self::AdminDashboard),
            Role::Student => Some(Self::StudentDashboard),
            Role::Committee => None,
        }
    }

    /// Generic destination when a role has no landing.
    pub fn fallback() -> Self {
        Self::Landing
    }

    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
