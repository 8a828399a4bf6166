//! Authentication context.
//!
//! Wraps the shared session store in a signal so views react to login/logout.
//! The router receives only a derived user signal, keeping it decoupled from the store.

use crate::api::BursaryApi;
use crate::web::LocalStorage;
use bursary_shared::{ApiResult, SessionStore, User};
use leptos::prelude::*;

/// Reactive handle on the session store, shared through Context.
#[derive(Clone, Copy)]
pub struct AuthContext {
    store: RwSignal<SessionStore<LocalStorage>>,
}

impl AuthContext {
    /// Rehydrates the session from LocalStorage. Called once at startup.
    pub fn new() -> Self {
        let store = SessionStore::rehydrate(LocalStorage);
        if let Some(user) = store.current_user() {
            log::info!("restored session for {}", user.email);
        }
        Self {
            store: RwSignal::new(store),
        }
    }

    /// Current user signal (injected into the router).
    pub fn user_signal(&self) -> Signal<Option<User>> {
        let store = self.store;
        Signal::derive(move || store.with(|s| s.current_user().cloned()))
    }

    pub fn user(&self) -> Option<User> {
        self.store.with(|s| s.current_user().cloned())
    }

    pub fn logout(&self) {
        self.store.update(|s| s.logout());
        // No manual navigation: the router reacts to the session change.
    }
}

/// Fetches the auth context from Context.
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// Logs in against the backend and stores the session.
///
/// Fails when the session cannot be persisted; nothing is signed in then.
///
/// Redirecting away from the login page is done by the router once the
/// session signal changes.
pub async fn login(ctx: AuthContext, api: &BursaryApi, email: &str, password: &str) -> ApiResult<User> {
    let res = api.login(email, password).await?;
    let user = res.user.clone();
    // The store lives at the root; `None` only once the app is torn down.
    match ctx.store.try_update(|s| s.login(&res.token, res.user)) {
        Some(Err(e)) => Err(e),
        _ => Ok(user),
    }
}
