//! Bursary portal frontend
//!
//! Context-driven layering:
//! - `bursary_shared`: domain types, route table, guard, API client
//! - `web`: browser bindings (fetch, LocalStorage, History, console)
//! - `auth`: reactive session
//! - `components`: pages and layouts

mod api;
mod auth;
mod components {
    pub mod admin {
        pub mod audit_logs;
        pub mod dashboard;
    }
    pub mod landing;
    pub mod layout;
    pub mod login;
    pub mod register;
    pub mod student {
        pub mod applications;
        pub mod apply;
        pub mod dashboard;
        pub mod profile;
    }
}

use crate::api::provide_api;
use crate::auth::AuthContext;
use crate::components::admin::audit_logs::AuditLogsPage;
use crate::components::admin::dashboard::AdminDashboardPage;
use crate::components::landing::LandingPage;
use crate::components::layout::{AdminLayout, StudentLayout};
use crate::components::login::LoginPage;
use crate::components::register::RegisterStudentPage;
use crate::components::student::applications::MyApplicationsPage;
use crate::components::student::apply::ApplyPage;
use crate::components::student::dashboard::StudentDashboardPage;
use crate::components::student::profile::ProfilePage;

use bursary_shared::AppRoute;
use leptos::prelude::*;

// Thin wrappers over browser APIs, used instead of the gloo-* crates.
pub mod web {
    mod console;
    mod http;
    pub mod router;
    mod storage;

    pub use console::ConsoleLogger;
    pub use http::FetchTransport;
    pub use storage::LocalStorage;
}

use web::router::{Router, RouterOutlet};

/// Maps a route to its page, wrapped in the area layout.
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Landing => view! { <LandingPage /> }.into_any(),
        AppRoute::RegisterStudent => view! { <RegisterStudentPage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::AdminDashboard => view! {
            <AdminLayout>
                <AdminDashboardPage />
            </AdminLayout>
        }
        .into_any(),
        AppRoute::AdminAuditLogs(id) => view! {
            <AdminLayout>
                <AuditLogsPage application_id=id />
            </AdminLayout>
        }
        .into_any(),
        AppRoute::StudentDashboard => view! {
            <StudentLayout>
                <StudentDashboardPage />
            </StudentLayout>
        }
        .into_any(),
        AppRoute::StudentApplications => view! {
            <StudentLayout>
                <MyApplicationsPage />
            </StudentLayout>
        }
        .into_any(),
        AppRoute::StudentProfile => view! {
            <StudentLayout>
                <ProfilePage />
            </StudentLayout>
        }
        .into_any(),
        AppRoute::StudentApply => view! {
            <StudentLayout>
                <ApplyPage />
            </StudentLayout>
        }
        .into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_api();

    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // The router only sees the user signal.
    let user = auth_ctx.user_signal();

    view! {
        <Router user=user>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
