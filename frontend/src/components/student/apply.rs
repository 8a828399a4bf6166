use crate::api::{RequestTracker, use_api};
use crate::components::layout::{Notice, NoticeBanner};
use crate::web::router::use_router;
use bursary_shared::protocol::CreateApplicationRequest;
use bursary_shared::request::FilePart;
use bursary_shared::{ApiError, AppRoute};
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen_futures::JsFuture;

const REQUIRED_DOCUMENTS: [&str; 5] = [
    "National ID / Birth Certificate",
    "Student ID Card",
    "Current Fee Structure",
    "Admission Letter",
    "Transcript / Report Form",
];

fn next_cycle_year() -> u32 {
    js_sys::Date::new_0().get_full_year() + 1
}

/// Reads every selected file into memory.
async fn read_files(files: Option<web_sys::FileList>) -> Result<Vec<FilePart>, ApiError> {
    let Some(files) = files else {
        return Ok(Vec::new());
    };

    let mut parts = Vec::with_capacity(files.length() as usize);
    for idx in 0..files.length() {
        let Some(file) = files.get(idx) else { continue };
        let buffer = JsFuture::from(file.array_buffer()).await.map_err(|e| {
            ApiError::request_build(format!("{:?}", e)).in_op_with("documents.read", file.name())
        })?;
        parts.push(FilePart {
            file_name: file.name(),
            content_type: file.type_(),
            bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
        });
    }
    Ok(parts)
}

#[component]
pub fn ApplyPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();
    let file_input = NodeRef::<html::Input>::new();

    let (cycle_year, set_cycle_year) = signal(next_cycle_year());
    let (amount, set_amount) = signal(String::new());
    let (loading, set_loading) = signal(false);
    let (notice, set_notice) = signal(Notice::None);
    let submissions = RequestTracker::new();

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(ticket) = submissions.begin() else { return };
        set_loading.set(true);
        set_notice.set(None);

        let files = file_input.get().and_then(|input| input.files());
        let cycle_year = cycle_year.get();
        let amount_requested = amount.get().trim().to_string();
        let api = api.clone();
        spawn_local(async move {
            let result = async {
                let documents = read_files(files).await?;
                let req = CreateApplicationRequest {
                    cycle_year,
                    amount_requested,
                    documents,
                };
                api.create_application(&req).await
            }
            .await;

            // The student may have left the page while the upload ran.
            if !submissions.is_current(ticket) {
                log::debug!("application for {} finished after leaving the page", cycle_year);
                return;
            }
            set_loading.set(false);
            match result {
                Ok(_) => {
                    log::info!("application for {} submitted", cycle_year);
                    router.navigate_to_route(AppRoute::StudentApplications);
                }
                Err(e) => {
                    log::error!("submitting application failed: {}", e);
                    set_notice.set(Some((e.user_message(), true)));
                }
            }
        });
    };

    view! {
        <div class="max-w-xl mx-auto space-y-6">
            <div class="text-center">
                <h2 class="text-3xl font-extrabold">"Apply for Funding"</h2>
                <p class="text-base-content/60">
                    {move || format!("Submit your application for the {} cycle", cycle_year.get())}
                </p>
            </div>

            <div class="card bg-base-100 shadow">
                <form class="card-body space-y-4" on:submit=on_submit>
                    <NoticeBanner notice=notice />

                    <label class="form-control w-full">
                        <div class="label"><span class="label-text">"Cycle Year"</span></div>
                        <input
                            type="number"
                            class="input input-bordered w-full"
                            on:input=move |ev| {
                                if let Ok(v) = event_target_value(&ev).parse() {
                                    set_cycle_year.set(v);
                                }
                            }
                            prop:value=move || cycle_year.get().to_string()
                            required
                        />
                    </label>

                    <label class="form-control w-full">
                        <div class="label"><span class="label-text">"Amount Requested (KES)"</span></div>
                        <input
                            type="number"
                            min="1"
                            placeholder="Enter amount"
                            class="input input-bordered w-full"
                            on:input=move |ev| set_amount.set(event_target_value(&ev))
                            prop:value=amount
                            required
                        />
                    </label>

                    <div>
                        <div class="label"><span class="label-text">"Required Documents"</span></div>
                        <div class="alert alert-info text-xs flex-col items-start">
                            <p class="font-medium">"Please ensure you upload:"</p>
                            <ul class="list-disc list-inside">
                                {REQUIRED_DOCUMENTS.iter().map(|d| view! { <li>{*d}</li> }).collect_view()}
                            </ul>
                        </div>
                        <input
                            node_ref=file_input
                            type="file"
                            multiple
                            accept=".pdf,.doc,.docx,.jpg,.jpeg,.png"
                            class="file-input file-input-bordered w-full mt-2"
                        />
                    </div>

                    <button type="submit" class="btn btn-primary w-full" disabled=move || loading.get()>
                        {move || if loading.get() { "Submitting..." } else { "Submit Application" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
