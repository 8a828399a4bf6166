use crate::api::use_api;
use crate::components::layout::{Notice, NoticeBanner, Spinner};
use bursary_shared::{StudentProfile, UpdateProfileRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let api = use_api();

    let (loading, set_loading) = signal(true);
    let (saving, set_saving) = signal(false);
    let (loaded, set_loaded) = signal(false);
    let (notice, set_notice) = signal(Notice::None);

    let (full_name, set_full_name) = signal(String::new());
    let (national_id, set_national_id) = signal(String::new());
    let (institution, set_institution) = signal(String::new());
    let (course, set_course) = signal(String::new());
    let (year_of_study, set_year_of_study) = signal(1u32);

    let fill = move |p: StudentProfile| {
        set_full_name.try_set(p.full_name);
        set_national_id.try_set(p.national_id);
        set_institution.try_set(p.institution);
        set_course.try_set(p.course);
        set_year_of_study.try_set(p.year_of_study.unwrap_or(1));
    };

    {
        let api = api.clone();
        spawn_local(async move {
            match api.get_profile().await {
                Ok(profile) => {
                    fill(profile);
                    set_loaded.try_set(true);
                }
                Err(e) => {
                    log::error!("loading profile failed: {}", e);
                    set_notice.try_set(Some(("Failed to load profile.".to_string(), true)));
                }
            }
            set_loading.try_set(false);
        });
    }

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let req = UpdateProfileRequest {
            full_name: full_name.get(),
            institution: institution.get(),
            course: course.get(),
            year_of_study: year_of_study.get(),
        };
        set_saving.set(true);
        set_notice.set(None);

        let api = api.clone();
        spawn_local(async move {
            match api.update_profile(&req).await {
                Ok(updated) => {
                    fill(updated.student);
                    set_notice.try_set(Some(("Profile updated successfully!".to_string(), false)));
                }
                Err(e) => {
                    log::error!("updating profile failed: {}", e);
                    set_notice.try_set(Some((e.user_message(), true)));
                }
            }
            set_saving.try_set(false);
        });
    };

    let text_input = move |label: &'static str, value: ReadSignal<String>, set: WriteSignal<String>| {
        view! {
            <label class="form-control w-full">
                <div class="label"><span class="label-text">{label}</span></div>
                <input
                    class="input input-bordered w-full"
                    on:input=move |ev| set.set(event_target_value(&ev))
                    prop:value=value
                    required
                />
            </label>
        }
    };

    view! {
        <div class="card bg-base-100 shadow max-w-3xl">
            <div class="card-body">
                <h1 class="text-2xl font-bold mb-4">"My Profile"</h1>
                <NoticeBanner notice=notice />

                {move || {
                    if loading.get() {
                        view! { <Spinner /> }.into_any()
                    } else if !loaded.get() {
                        view! { <p class="text-error text-center">"Profile data not available."</p> }.into_any()
                    } else {
                        view! {
                            <form class="space-y-4" on:submit=on_submit.clone()>
                                {text_input("Full Name", full_name, set_full_name)}
                                <label class="form-control w-full">
                                    <div class="label"><span class="label-text">"National ID (Read Only)"</span></div>
                                    <input class="input input-bordered w-full" prop:value=national_id disabled />
                                </label>
                                {text_input("Institution", institution, set_institution)}
                                {text_input("Course", course, set_course)}
                                <label class="form-control w-full">
                                    <div class="label"><span class="label-text">"Year of Study"</span></div>
                                    <input
                                        type="number"
                                        min="1"
                                        max="6"
                                        class="input input-bordered w-full"
                                        on:input=move |ev| {
                                            if let Ok(v) = event_target_value(&ev).parse() {
                                                set_year_of_study.set(v);
                                            }
                                        }
                                        prop:value=move || year_of_study.get().to_string()
                                        required
                                    />
                                </label>
                                <div class="flex justify-end">
                                    <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                                        {move || if saving.get() {
                                            view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                                        } else {
                                            "Save Changes".into_any()
                                        }}
                                    </button>
                                </div>
                            </form>
                        }
                        .into_any()
                    }
                }}
            </div>
        </div>
    }
}
