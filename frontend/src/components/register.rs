use crate::api::{RequestTracker, use_api};
use crate::components::layout::{Notice, NoticeBanner};
use crate::web::router::{Link, use_router};
use bursary_shared::{AppRoute, RegisterStudentRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
fn TextField(
    label: &'static str,
    #[prop(default = "text")] kind: &'static str,
    value: ReadSignal<String>,
    set_value: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <label class="form-control w-full">
            <div class="label">
                <span class="label-text">{label}</span>
            </div>
            <input
                type=kind
                placeholder=label
                on:input=move |ev| set_value.set(event_target_value(&ev))
                prop:value=value
                class="input input-bordered w-full"
                required
            />
        </label>
    }
}

#[component]
pub fn RegisterStudentPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (full_name, set_full_name) = signal(String::new());
    let (national_id, set_national_id) = signal(String::new());
    let (institution, set_institution) = signal(String::new());
    let (course, set_course) = signal(String::new());
    let (year_of_study, set_year_of_study) = signal(1u32);
    let (loading, set_loading) = signal(false);
    let (notice, set_notice) = signal(Notice::None);
    let submissions = RequestTracker::new();

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(ticket) = submissions.begin() else { return };
        set_loading.set(true);
        set_notice.set(None);

        let req = RegisterStudentRequest {
            email: email.get().trim().to_string(),
            password: password.get(),
            full_name: full_name.get(),
            national_id: national_id.get(),
            institution: institution.get(),
            course: course.get(),
            year_of_study: year_of_study.get(),
        };
        let api = api.clone();
        spawn_local(async move {
            let result = api.register_student(&req).await;
            if !submissions.is_current(ticket) {
                return;
            }
            set_loading.set(false);
            match result {
                Ok(_) => {
                    log::info!("registered student {}", req.email);
                    router.navigate_to_route(AppRoute::Login);
                }
                Err(e) => {
                    log::warn!("registration failed: {}", e);
                    set_notice.set(Some((e.user_message(), true)));
                }
            }
        });
    };

    view! {
        <div class="min-h-screen bg-base-200 flex items-center justify-center p-4">
            <div class="card w-full max-w-md shadow-2xl bg-base-100">
                <form class="card-body space-y-2" on:submit=on_submit>
                    <h1 class="card-title text-2xl">"Student Registration"</h1>
                    <NoticeBanner notice=notice />

                    <TextField label="Email" kind="email" value=email set_value=set_email />
                    <TextField label="Password" kind="password" value=password set_value=set_password />
                    <TextField label="Full Name" value=full_name set_value=set_full_name />
                    <TextField label="National ID" value=national_id set_value=set_national_id />
                    <TextField label="Institution" value=institution set_value=set_institution />
                    <TextField label="Course" value=course set_value=set_course />
                    <label class="form-control w-full">
                        <div class="label">
                            <span class="label-text">"Year of Study"</span>
                        </div>
                        <input
                            type="number"
                            min="1"
                            max="6"
                            on:input=move |ev| {
                                if let Ok(v) = event_target_value(&ev).parse() {
                                    set_year_of_study.set(v);
                                }
                            }
                            prop:value=move || year_of_study.get().to_string()
                            class="input input-bordered w-full"
                            required
                        />
                    </label>

                    <button type="submit" class="btn btn-primary w-full mt-4" disabled=move || loading.get()>
                        {move || if loading.get() { "Registering..." } else { "Register" }}
                    </button>
                    <p class="text-sm text-center">
                        "Already registered? "
                        <Link to=AppRoute::Login class="link link-primary">"Sign in"</Link>
                    </p>
                </form>
            </div>
        </div>
    }
}
