//! Area layouts and small shared widgets.

use crate::auth::use_auth;
use crate::web::router::{Link, use_router};
use bursary_shared::{AppRoute, ApplicationStatus};
use leptos::prelude::*;

/// Inline feedback line: `(message, is_error)`.
pub type Notice = Option<(String, bool)>;

#[component]
pub fn NoticeBanner(notice: ReadSignal<Notice>) -> impl IntoView {
    move || {
        notice.get().map(|(msg, is_err)| {
            let class = if is_err {
                "alert alert-error text-sm py-2"
            } else {
                "alert alert-success text-sm py-2"
            };
            view! {
                <div role="alert" class=class>
                    <span>{msg}</span>
                </div>
            }
        })
    }
}

#[component]
pub fn StatusBadge(status: ApplicationStatus) -> impl IntoView {
    let class = match status {
        ApplicationStatus::Pending => "badge badge-warning",
        ApplicationStatus::Approved => "badge badge-success",
        ApplicationStatus::Rejected => "badge badge-error",
    };
    view! { <span class=class>{status.label()}</span> }
}

#[component]
pub fn Spinner() -> impl IntoView {
    view! {
        <div class="flex justify-center py-8">
            <span class="loading loading-spinner loading-md text-primary"></span>
        </div>
    }
}

/// Sidebar entry, highlighted while its route is current.
#[component]
fn NavItem(to: AppRoute, label: &'static str) -> impl IntoView {
    let router = use_router();
    let class = Signal::derive(move || {
        if router.current_route().get() == to {
            "active".to_string()
        } else {
            String::new()
        }
    });

    view! {
        <li>
            <Link to=to class=class>{label}</Link>
        </li>
    }
}

/// Sidebar shell shared by both areas.
#[component]
fn Shell(title: &'static str, nav: Children, children: Children) -> impl IntoView {
    let auth = use_auth();
    let email = move || auth.user().map(|u| u.email).unwrap_or_default();

    view! {
        <div class="min-h-screen bg-base-200 flex font-sans">
            <aside class="w-64 bg-base-100 shadow-xl hidden md:flex flex-col">
                <div class="h-16 flex items-center px-6 font-bold text-lg text-primary">{title}</div>
                <ul class="menu flex-1 px-3">{nav()}</ul>
                <div class="p-4">
                    <button on:click=move |_| auth.logout() class="btn btn-outline btn-error w-full">
                        "Sign Out"
                    </button>
                </div>
            </aside>

            <div class="flex-1 flex flex-col min-h-screen">
                <div class="navbar bg-base-100 shadow">
                    <div class="flex-1 px-4 font-semibold">"County Financial Gateway"</div>
                    <div class="flex-none gap-2 px-4">
                        <span class="badge badge-neutral">{email}</span>
                        <button on:click=move |_| auth.logout() class="btn btn-ghost btn-sm md:hidden">
                            "Sign Out"
                        </button>
                    </div>
                </div>
                <main class="flex-1 p-4 sm:p-8">
                    <div class="max-w-7xl mx-auto">{children()}</div>
                </main>
            </div>
        </div>
    }
}

#[component]
pub fn AdminLayout(children: Children) -> impl IntoView {
    view! {
        <Shell
            title="Admin Portal"
            nav=Box::new(|| view! { <NavItem to=AppRoute::AdminDashboard label="Dashboard" /> }.into_any())
        >
            {children()}
        </Shell>
    }
}

#[component]
pub fn StudentLayout(children: Children) -> impl IntoView {
    view! {
        <Shell
            title="CFG Portal"
            nav=Box::new(|| {
                view! {
                    <NavItem to=AppRoute::StudentDashboard label="Dashboard" />
                    <NavItem to=AppRoute::StudentApplications label="My Applications" />
                    <NavItem to=AppRoute::StudentApply label="New Application" />
                    <NavItem to=AppRoute::StudentProfile label="My Profile" />
                }
                .into_any()
            })
        >
            {children()}
        </Shell>
    }
}
