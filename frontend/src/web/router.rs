//! Router service.
//!
//! Wraps the `web_sys` History API; every `window.history` call lives here.
//! Navigation runs request -> guard -> history -> render. The guard itself is
//! the pure `bursary_shared::guard::resolve`, fed with an injected user signal.

use bursary_shared::guard;
use bursary_shared::{AppRoute, User};
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Used for redirects so the rejected URL does not stay in the back stack.
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Router service.
///
/// All route changes go through here and surface as a signal.
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    /// Signed-in user, injected so the router does not depend on the auth module.
    user: Signal<Option<User>>,
}

impl RouterService {
    fn new(user: Signal<Option<User>>) -> Self {
        let requested = AppRoute::from_path(&current_path());
        let initial = user.with_untracked(|u| guard::resolve(requested, u.as_ref()));
        if initial != requested {
            log::info!("[router] {} not allowed, starting at {}", requested, initial);
            replace_history_state(&initial.to_path());
        } else if requested == AppRoute::StudentDashboard {
            // `/student` is an index alias; show the canonical URL.
            replace_history_state(&initial.to_path());
        }

        let (current_route, set_route) = signal(initial);
        Self {
            current_route,
            set_route,
            user,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// Navigates to `target`, running it through the guard first.
    pub fn navigate_to_route(&self, target: AppRoute) {
        let resolved = self
            .user
            .with_untracked(|u| guard::resolve(target, u.as_ref()));

        if resolved != target {
            log::info!("[router] access to {} denied, redirecting to {}", target, resolved);
        }
        push_history_state(&resolved.to_path());
        self.set_route.set(resolved);
    }

    /// Back/forward buttons: the browser already moved, so redirects replace.
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let user = self.user;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target = AppRoute::from_path(&current_path());
            let resolved = user.with_untracked(|u| guard::resolve(target, u.as_ref()));
            if resolved != target {
                replace_history_state(&resolved.to_path());
            }
            set_route.set(resolved);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // The listener lives as long as the page.
        closure.forget();
    }

    /// Re-checks the current route whenever the session changes.
    ///
    /// Login leaves the login page for the role's area; logout leaves any
    /// restricted page for the login page.
    fn setup_session_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let user = self.user;

        Effect::new(move |_| {
            let route = current_route.get_untracked();
            let redirect = user.with(|u| guard::resolve(route, u.as_ref()));

            if route != redirect {
                log::info!("[router] session changed, leaving {} for {}", route, redirect);
                push_history_state(&redirect.to_path());
                set_route.set(redirect);
            }
        });
    }
}

fn provide_router(user: Signal<Option<User>>) -> RouterService {
    let router = RouterService::new(user);
    router.init_popstate_listener();
    router.setup_session_redirect();

    provide_context(router);
    router
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// Components
// ============================================================================

/// Provides the router context. Mount once at the root of the app.
#[component]
pub fn Router(user: Signal<Option<User>>, children: Children) -> impl IntoView {
    provide_router(user);

    children()
}

/// Renders whatever the current route maps to.
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// In-app link; intercepts the click and navigates through the guard.
#[component]
pub fn Link(
    to: AppRoute,
    #[prop(optional, into)] class: MaybeProp<String>,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate_to_route(to);
    };

    view! {
        <a href=to.to_path() class=move || class.get() on:click=on_click>
            {children()}
        </a>
    }
}
