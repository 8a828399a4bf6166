use crate::api::use_api;
use crate::components::layout::Spinner;
use crate::web::router::Link;
use bursary_shared::{AppRoute, AuditLogEntry};
use leptos::prelude::*;
use leptos::task::spawn_local;

fn action_class(action: &str) -> &'static str {
    match action {
        "APPROVED" => "badge badge-success",
        "REJECTED" => "badge badge-error",
        "PENDING" => "badge badge-warning",
        _ => "badge badge-ghost",
    }
}

#[component]
fn ChangeValue(value: Option<serde_json::Value>) -> impl IntoView {
    let rows = AuditLogEntry::changes(value.as_ref());
    if rows.is_empty() {
        return view! { <span class="italic text-base-content/40">"-"</span> }.into_any();
    }

    view! {
        <div class="space-y-1">
            {rows
                .into_iter()
                .map(|(label, text)| {
                    view! {
                        <div class="text-sm flex gap-2">
                            <span class="text-xs uppercase text-base-content/50 w-32 shrink-0">{label}</span>
                            <span class="font-medium break-all">{text}</span>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
    .into_any()
}

/// Audit trail table, shared by the dashboard panel and the full page.
#[component]
pub fn AuditTrail(logs: Vec<AuditLogEntry>) -> impl IntoView {
    if logs.is_empty() {
        return view! {
            <div class="p-12 text-center text-base-content/50">
                <h3 class="text-lg font-medium">"No history found"</h3>
                <p>"There are no audit records for this application yet."</p>
            </div>
        }
        .into_any();
    }

    view! {
        <div class="overflow-x-auto">
            <table class="table w-full">
                <thead>
                    <tr>
                        <th>"Action"</th>
                        <th>"Administrator"</th>
                        <th>"Old Value"</th>
                        <th>"New Value"</th>
                        <th>"Timestamp"</th>
                    </tr>
                </thead>
                <tbody>
                    {logs
                        .into_iter()
                        .map(|entry| {
                            view! {
                                <tr>
                                    <td><span class=action_class(&entry.action)>{entry.action.clone()}</span></td>
                                    <td>{entry.admin_email.clone()}</td>
                                    <td><ChangeValue value=entry.old_value.clone() /></td>
                                    <td><ChangeValue value=entry.new_value.clone() /></td>
                                    <td class="whitespace-nowrap">
                                        {entry.created_at.format("%Y-%m-%d %H:%M").to_string()}
                                    </td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
    .into_any()
}

#[component]
pub fn AuditLogsPage(application_id: u64) -> impl IntoView {
    let api = use_api();
    let (logs, set_logs) = signal(Vec::<AuditLogEntry>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    spawn_local(async move {
        match api.audit_logs(application_id).await {
            Ok(res) => {
                set_logs.try_set(res.audit_logs);
            }
            Err(e) => {
                log::error!("loading audit logs for #{} failed: {}", application_id, e);
                set_error_msg.try_set(Some(e.user_message()));
            }
        }
        set_loading.try_set(false);
    });

    view! {
        <div class="space-y-6">
            <div>
                <Link to=AppRoute::AdminDashboard class="link link-hover text-sm">"← Back to Dashboard"</Link>
                <h1 class="text-3xl font-extrabold mt-2">"Audit Trail"</h1>
                <p class="text-sm text-base-content/60">
                    "Viewing history for Application "
                    <span class="font-mono badge badge-ghost">{format!("#{}", application_id)}</span>
                </p>
            </div>

            <div class="card bg-base-100 shadow-xl">
                {move || {
                    if loading.get() {
                        view! { <Spinner /> }.into_any()
                    } else if let Some(msg) = error_msg.get() {
                        view! { <div role="alert" class="alert alert-error m-4">{msg}</div> }.into_any()
                    } else {
                        view! { <AuditTrail logs=logs.get() /> }.into_any()
                    }
                }}
            </div>
        </div>
    }
}
