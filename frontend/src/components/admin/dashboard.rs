use crate::api::{RequestTracker, use_api};
use crate::components::admin::audit_logs::AuditTrail;
use crate::components::layout::{Notice, NoticeBanner, Spinner, StatusBadge};
use crate::web::router::Link;
use bursary_shared::{
    AppRoute, Application, ApplicationStatus, AuditLogEntry, InFlight, RegisterAdminRequest,
    format_amount, parse_allocated_amount,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Asks for the allocated amount. `None` when the admin cancels.
fn prompt_amount() -> Option<Result<f64, String>> {
    let input = web_sys::window()?
        .prompt_with_message("Enter allocated amount")
        .ok()??;
    Some(parse_allocated_amount(&input))
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let api = use_api();

    let (status_filter, set_status_filter) = signal(Some(ApplicationStatus::Pending));
    let (applications, set_applications) = signal(Vec::<Application>::new());
    let (loading, set_loading) = signal(true);
    let (notice, set_notice) = signal(Notice::None);
    let listing = RequestTracker::new();
    // Applications with a status update in flight.
    let (pending, set_pending) = signal(InFlight::<u64>::default());

    // Audit panel
    let (selected_app, set_selected_app) = signal(Option::<u64>::None);
    let (audit_logs, set_audit_logs) = signal(Vec::<AuditLogEntry>::new());
    let (loading_logs, set_loading_logs) = signal(false);
    let (logs_error, set_logs_error) = signal(Option::<String>::None);
    let log_requests = RequestTracker::new();

    let load_applications = {
        let api = api.clone();
        move |status: Option<ApplicationStatus>| {
            let Some(ticket) = listing.begin() else { return };
            let api = api.clone();
            set_loading.try_set(true);
            spawn_local(async move {
                let result = api.list_applications(status).await;
                if !listing.is_current(ticket) {
                    log::debug!("dropping stale listing for {:?}", status);
                    return;
                }
                match result {
                    Ok(list) => {
                        set_applications.try_set(list.data);
                    }
                    Err(e) => {
                        log::error!("loading applications failed: {}", e);
                        set_applications.try_set(Vec::new());
                        set_notice.try_set(Some((e.user_message(), true)));
                    }
                }
                set_loading.try_set(false);
            });
        }
    };

    // Reload whenever the filter changes.
    Effect::new({
        let load_applications = load_applications.clone();
        move |_| load_applications(status_filter.get())
    });

    let handle_status_change = {
        let api = api.clone();
        let load_applications = load_applications.clone();
        move |id: u64, status: ApplicationStatus| {
            if pending.with_untracked(|p| p.contains(&id)) {
                return;
            }
            let amount = match status {
                ApplicationStatus::Approved => match prompt_amount() {
                    None => return,
                    Some(Ok(amount)) => amount,
                    Some(Err(msg)) => {
                        set_notice.set(Some((msg, true)));
                        return;
                    }
                },
                _ => 0.0,
            };

            if set_pending.try_update(|p| p.start(id)) != Some(true) {
                return;
            }

            let api = api.clone();
            let load_applications = load_applications.clone();
            spawn_local(async move {
                let result = api.update_application_status(id, status, Some(amount)).await;
                set_pending.try_update(|p| p.finish(&id));
                match result {
                    Ok(_) => {
                        log::info!("application #{} set to {}", id, status);
                        set_notice.try_set(Some((
                            format!("Application #{} {}", id, status.label().to_lowercase()),
                            false,
                        )));
                        // Reload with whatever filter is shown now.
                        if let Some(filter) = status_filter.try_get_untracked() {
                            load_applications(filter);
                        }
                    }
                    Err(e) => {
                        log::error!("updating application #{} failed: {}", id, e);
                        set_notice.try_set(Some((e.user_message(), true)));
                    }
                }
            });
        }
    };

    let view_audit_logs = {
        let api = api.clone();
        move |id: u64| {
            let Some(ticket) = log_requests.begin() else { return };
            set_selected_app.set(Some(id));
            set_loading_logs.set(true);
            set_logs_error.set(None);

            let api = api.clone();
            spawn_local(async move {
                let result = api.audit_logs(id).await;
                // Another application was selected meanwhile.
                if !log_requests.is_current(ticket) {
                    return;
                }
                match result {
                    Ok(res) => {
                        set_audit_logs.try_set(res.audit_logs);
                    }
                    Err(e) => {
                        log::error!("loading audit logs for #{} failed: {}", id, e);
                        set_audit_logs.try_set(Vec::new());
                        set_logs_error.try_set(Some("Failed to load audit logs.".to_string()));
                    }
                }
                set_loading_logs.try_set(false);
            });
        }
    };

    let asset_api = api.clone();
    let document_links = move |app: &Application| {
        app.document_url
            .iter()
            .enumerate()
            .map(|(idx, url)| {
                view! {
                    <a
                        href=asset_api.config().document_href(url)
                        target="_blank"
                        rel="noreferrer"
                        class="link link-primary block"
                    >
                        {format!("Document {}", idx + 1)}
                    </a>
                }
            })
            .collect_view()
    };

    view! {
        <div class="space-y-8">
            <div class="flex flex-col md:flex-row md:items-center md:justify-between gap-4">
                <h1 class="text-2xl font-bold">"Admin Dashboard"</h1>
                <label class="flex items-center gap-2">
                    <span class="label-text">"Filter by status"</span>
                    <select
                        class="select select-bordered select-sm"
                        on:change=move |ev| {
                            set_status_filter.set(ApplicationStatus::parse(&event_target_value(&ev)))
                        }
                        prop:value=move || status_filter.get().map(|s| s.as_str()).unwrap_or_default()
                    >
                        <option value="">"All"</option>
                        {ApplicationStatus::ALL
                            .into_iter()
                            .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                            .collect_view()}
                    </select>
                </label>
            </div>

            <NoticeBanner notice=notice />

            <div class="card bg-base-100 shadow-xl">
                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"Name"</th>
                                <th>"Institution"</th>
                                <th>"Course"</th>
                                <th>"Year"</th>
                                <th>"Amount Requested"</th>
                                <th>"Allocated"</th>
                                <th>"Status"</th>
                                <th>"TAADA"</th>
                                <th>"Documents"</th>
                                <th>"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || loading.get()>
                                <tr><td colspan="10"><Spinner /></td></tr>
                            </Show>
                            <Show when=move || !loading.get() && applications.with(|a| a.is_empty())>
                                <tr>
                                    <td colspan="10" class="text-center py-8 text-base-content/50">
                                        "No applications found"
                                    </td>
                                </tr>
                            </Show>
                            <For
                                each=move || applications.get()
                                key=|app| (app.id, app.status)
                                children=move |app| {
                                    let id = app.id;
                                    let busy = move || pending.with(|p| p.contains(&id));
                                    let docs = document_links(&app);
                                    let on_approve = {
                                        let handle = handle_status_change.clone();
                                        move |_| handle(id, ApplicationStatus::Approved)
                                    };
                                    let on_reject = {
                                        let handle = handle_status_change.clone();
                                        move |_| handle(id, ApplicationStatus::Rejected)
                                    };
                                    let on_logs = {
                                        let view_logs = view_audit_logs.clone();
                                        move |_| view_logs(id)
                                    };
                                    view! {
                                        <tr>
                                            <td>
                                                <div class="font-bold">{app.full_name.clone()}</div>
                                                <div class="text-xs opacity-50">{app.national_id.clone()}</div>
                                            </td>
                                            <td>{app.institution.clone()}</td>
                                            <td>{app.course.clone()}</td>
                                            <td>{app.year_of_study.map(|y| y.to_string()).unwrap_or_default()}</td>
                                            <td>{format_amount(app.amount_requested)}</td>
                                            <td>{format_amount(app.amount_allocated)}</td>
                                            <td><StatusBadge status=app.status /></td>
                                            <td>{app.taada_flag.clone().unwrap_or_default()}</td>
                                            <td>{docs}</td>
                                            <td>
                                                <div class="flex flex-wrap gap-1">
                                                    <button class="btn btn-success btn-xs" disabled=busy on:click=on_approve>"Approve"</button>
                                                    <button class="btn btn-error btn-xs" disabled=busy on:click=on_reject>"Reject"</button>
                                                    <button class="btn btn-info btn-xs" on:click=on_logs>"Audit Logs"</button>
                                                </div>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>
            </div>

            {move || {
                selected_app.get().map(|id| {
                    view! {
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body">
                                <div class="flex items-center justify-between">
                                    <h2 class="card-title">{format!("Audit Logs for Application {}", id)}</h2>
                                    <Link to=AppRoute::AdminAuditLogs(id) class="link link-primary text-sm">
                                        "Open full trail"
                                    </Link>
                                </div>
                                {move || {
                                    if loading_logs.get() {
                                        view! { <Spinner /> }.into_any()
                                    } else if let Some(msg) = logs_error.get() {
                                        view! { <p class="text-error">{msg}</p> }.into_any()
                                    } else {
                                        view! { <AuditTrail logs=audit_logs.get() /> }.into_any()
                                    }
                                }}
                            </div>
                        </div>
                    }
                })
            }}

            <RegisterAdminForm />
        </div>
    }
}

#[component]
fn RegisterAdminForm() -> impl IntoView {
    let api = use_api();
    let (full_name, set_full_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (submitting, set_submitting) = signal(false);
    let (notice, set_notice) = signal(Notice::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let req = RegisterAdminRequest {
            email: email.get().trim().to_string(),
            password: password.get(),
            full_name: full_name.get(),
        };
        set_submitting.set(true);
        set_notice.set(None);

        let api = api.clone();
        spawn_local(async move {
            match api.register_admin(&req).await {
                Ok(_) => {
                    log::info!("registered admin {}", req.email);
                    set_notice.try_set(Some(("Admin registered successfully".to_string(), false)));
                    set_full_name.try_set(String::new());
                    set_email.try_set(String::new());
                    set_password.try_set(String::new());
                }
                Err(e) => {
                    log::error!("registering admin failed: {}", e);
                    set_notice.try_set(Some((e.user_message(), true)));
                }
            }
            set_submitting.try_set(false);
        });
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <form class="card-body space-y-2" on:submit=on_submit>
                <h2 class="card-title">"Register New Admin"</h2>
                <NoticeBanner notice=notice />
                <input
                    placeholder="Full Name"
                    class="input input-bordered w-full"
                    on:input=move |ev| set_full_name.set(event_target_value(&ev))
                    prop:value=full_name
                    required
                />
                <input
                    type="email"
                    placeholder="Email"
                    class="input input-bordered w-full"
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                    prop:value=email
                    required
                />
                <input
                    type="password"
                    placeholder="Password"
                    class="input input-bordered w-full"
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    prop:value=password
                    required
                />
                <button class="btn btn-success w-full" disabled=move || submitting.get()>
                    "Register Admin"
                </button>
            </form>
        </div>
    }
}
