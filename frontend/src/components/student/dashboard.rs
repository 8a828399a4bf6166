use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::layout::{Spinner, StatusBadge};
use crate::web::router::Link;
use bursary_shared::{AppRoute, Application};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn StudentDashboardPage() -> impl IntoView {
    let api = use_api();
    let auth = use_auth();

    let (applications, set_applications) = signal(Vec::<Application>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    spawn_local(async move {
        match api.my_applications().await {
            Ok(data) => {
                set_applications.try_set(data);
            }
            Err(e) => {
                log::error!("loading applications failed: {}", e);
                set_error_msg.try_set(Some("Failed to load application data.".to_string()));
            }
        }
        set_loading.try_set(false);
    });

    // The backend lists newest first.
    let latest = move || applications.with(|apps| apps.first().cloned());
    let greeting = move || {
        format!(
            "Welcome back, {}",
            auth.user().map(|u| u.email).unwrap_or_default()
        )
    };

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-2xl font-bold">{greeting}</h1>
                <p class="text-base-content/60 mt-1">"Here is what is happening with your applications today."</p>
            </div>

            {move || {
                if loading.get() {
                    return view! { <Spinner /> }.into_any();
                }
                if let Some(msg) = error_msg.get() {
                    return view! { <div role="alert" class="alert alert-error">{msg}</div> }.into_any();
                }

                let latest_card = match latest() {
                    Some(app) => view! {
                        <div class="flex justify-between items-start">
                            <h3 class="card-title">
                                {format!(
                                    "{} Application",
                                    app.cycle_year.map(|y| y.to_string()).unwrap_or_else(|| "Current".to_string()),
                                )}
                            </h3>
                            <StatusBadge status=app.status />
                        </div>
                        <p class="text-sm text-base-content/60">"Status as of today"</p>
                    }
                    .into_any(),
                    None => view! {
                        <div class="flex justify-between items-start">
                            <h3 class="card-title">"No Active Application"</h3>
                            <span class="badge badge-ghost">"No Applications"</span>
                        </div>
                    }
                    .into_any(),
                };

                let recent = applications.with(|apps| {
                    apps.iter()
                        .take(3)
                        .map(|app| {
                            view! {
                                <li class="flex items-center gap-3">
                                    <span class="w-2 h-2 rounded-full bg-primary"></span>
                                    <div>
                                        <p class="text-sm font-medium">{format!("Application #{} submitted", app.id)}</p>
                                        <p class="text-xs text-base-content/50">
                                            {app.created_at.format("%Y-%m-%d").to_string()}
                                        </p>
                                    </div>
                                </li>
                            }
                        })
                        .collect_view()
                });
                let has_recent = applications.with(|apps| !apps.is_empty());

                view! {
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                        <div class="card bg-base-100 shadow">
                            <div class="card-body">
                                {latest_card}
                                <div class="card-actions mt-2">
                                    <Link to=AppRoute::StudentApplications class="link link-primary text-sm">
                                        "View Details →"
                                    </Link>
                                </div>
                            </div>
                        </div>
                        <div class="card bg-base-100 shadow">
                            <div class="card-body">
                                <h3 class="card-title">"New Application"</h3>
                                <p class="text-sm text-base-content/60">"Submit a funding request for the next cycle."</p>
                                <div class="card-actions mt-2">
                                    <Link to=AppRoute::StudentApply class="btn btn-primary btn-sm">"Apply"</Link>
                                </div>
                            </div>
                        </div>
                    </div>

                    <div class="card bg-base-100 shadow">
                        <div class="card-body">
                            <h2 class="card-title">"Recent Activity"</h2>
                            {if has_recent {
                                view! { <ul class="space-y-3">{recent}</ul> }.into_any()
                            } else {
                                view! { <p class="text-base-content/60">"No recent activity."</p> }.into_any()
                            }}
                        </div>
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}
