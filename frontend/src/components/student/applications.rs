use crate::api::use_api;
use crate::components::layout::{Spinner, StatusBadge};
use crate::web::router::Link;
use bursary_shared::{AppRoute, Application, format_amount};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
fn Detail(label: &'static str, children: Children) -> impl IntoView {
    view! {
        <div>
            <h4 class="text-sm font-medium text-base-content/60">{label}</h4>
            <div class="mt-1 text-sm">{children()}</div>
        </div>
    }
}

#[component]
fn ApplicationDetails(app: Application, on_close: Callback<()>) -> impl IntoView {
    let api = use_api();
    let documents = app
        .document_url
        .iter()
        .enumerate()
        .map(|(idx, url)| {
            view! {
                <li>
                    <a href=api.config().document_href(url) target="_blank" rel="noreferrer" class="link link-primary">
                        {format!("Document {}", idx + 1)}
                    </a>
                </li>
            }
        })
        .collect_view();

    view! {
        <div class="modal modal-open">
            <div class="modal-box">
                <h3 class="font-bold text-lg mb-4">"Application Details"</h3>
                <div class="grid grid-cols-2 gap-4">
                    <Detail label="Application ID">{format!("#{}", app.id)}</Detail>
                    <Detail label="Status"><StatusBadge status=app.status /></Detail>
                    <Detail label="Cycle Year">
                        {app.cycle_year.map(|y| y.to_string()).unwrap_or_else(|| "N/A".to_string())}
                    </Detail>
                    <Detail label="Date Submitted">{app.created_at.format("%Y-%m-%d %H:%M").to_string()}</Detail>
                    <Detail label="Amount Requested">{format_amount(app.amount_requested)}</Detail>
                    <Detail label="Amount Allocated">{format_amount(app.amount_allocated)}</Detail>
                </div>
                <div class="mt-4">
                    <h4 class="text-sm font-medium text-base-content/60">"Documents"</h4>
                    {if app.document_url.is_empty() {
                        view! { <p class="text-sm text-base-content/50">"No documents attached."</p> }.into_any()
                    } else {
                        view! { <ul class="list-disc list-inside text-sm">{documents}</ul> }.into_any()
                    }}
                </div>
                <div class="modal-action">
                    <button class="btn w-full" on:click=move |_| on_close.run(())>"Close"</button>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn MyApplicationsPage() -> impl IntoView {
    let api = use_api();

    let (applications, set_applications) = signal(Vec::<Application>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (selected, set_selected) = signal(Option::<Application>::None);

    spawn_local(async move {
        match api.my_applications().await {
            Ok(data) => {
                set_applications.try_set(data);
            }
            Err(e) => {
                log::error!("loading applications failed: {}", e);
                set_error_msg.try_set(Some(e.user_message()));
            }
        }
        set_loading.try_set(false);
    });

    let close = Callback::new(move |_: ()| set_selected.set(None));

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold">"My Applications"</h1>
                <Link to=AppRoute::StudentApply class="btn btn-primary btn-sm">"Start New Application"</Link>
            </div>

            {move || error_msg.get().map(|msg| view! { <div role="alert" class="alert alert-error">{msg}</div> })}

            <div class="card bg-base-100 shadow">
                <div class="overflow-x-auto">
                    <table class="table w-full">
                        <thead>
                            <tr>
                                <th>"Application ID"</th>
                                <th>"Year"</th>
                                <th>"Date Submitted"</th>
                                <th>"Status"</th>
                                <th>"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || loading.get()>
                                <tr><td colspan="5"><Spinner /></td></tr>
                            </Show>
                            <Show when=move || !loading.get() && applications.with(|a| a.is_empty())>
                                <tr>
                                    <td colspan="5" class="text-center text-base-content/50">"No applications found."</td>
                                </tr>
                            </Show>
                            <For
                                each=move || applications.get()
                                key=|app| app.id
                                children=move |app| {
                                    let row = app.clone();
                                    view! {
                                        <tr>
                                            <td class="font-medium">{format!("#{}", app.id)}</td>
                                            <td>{app.cycle_year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string())}</td>
                                            <td>{app.created_at.format("%Y-%m-%d").to_string()}</td>
                                            <td><StatusBadge status=app.status /></td>
                                            <td>
                                                <button
                                                    class="btn btn-link btn-sm"
                                                    on:click=move |_| set_selected.set(Some(row.clone()))
                                                >
                                                    "View Details"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>
            </div>

            {move || selected.get().map(|app| view! { <ApplicationDetails app=app on_close=close /> })}
        </div>
    }
}
