//! Route guard.
//!
//! A UI-level capability check over the in-memory session. It decides what to
//! render; the backend still enforces authorization on every call.

use crate::route::AppRoute;
use crate::{Role, User};

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    RedirectTo(AppRoute),
}

/// Decides whether `user` may see a page restricted to `required_roles`.
///
/// - restricted page, no user → login
/// - no restriction, or role in the set → allow
/// - role outside the set → that role's landing, or the generic landing
pub fn can_access(user: Option<&User>, required_roles: Option<&[Role]>) -> Access {
    match (user, required_roles) {
        (_, None) => Access::Allow,
        (None, Some(_)) => Access::RedirectTo(AppRoute::auth_failure_redirect()),
        (Some(user), Some(roles)) if roles.contains(&user.role) => Access::Allow,
        (Some(user), Some(_)) => Access::RedirectTo(role_landing(user.role)),
    }
}

/// The route that actually renders when `user` navigates to `target`.
pub fn resolve(target: AppRoute, user: Option<&User>) -> AppRoute {
    if let (Some(user), true) = (user, target.guest_only()) {
        return role_landing(user.role);
    }

    match can_access(user, target.required_roles()) {
        Access::Allow => target,
        Access::RedirectTo(route) => route,
    }
}

/// Canonical destination after a successful login.
pub fn post_login_destination(role: Role) -> AppRoute {
    role_landing(role)
}

fn role_landing(role: Role) -> AppRoute {
    AppRoute::landing_for(role).unwrap_or_else(AppRoute::fallback)
}
