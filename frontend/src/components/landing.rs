use crate::web::router::Link;
use bursary_shared::AppRoute;
use leptos::prelude::*;

const STEPS: [(&str, &str); 3] = [
    ("Create Account", "Register quickly as a student to access the portal."),
    ("Submit Application", "Upload documents and fill in your details securely."),
    ("Get Funded", "Track status and receive funds directly upon approval."),
];

#[component]
pub fn LandingPage() -> impl IntoView {
    let year = js_sys::Date::new_0().get_full_year();

    view! {
        <div class="min-h-screen bg-base-200 flex flex-col font-sans">
            <div class="navbar bg-base-100 shadow-sm px-4">
                <div class="flex-1">
                    <Link to=AppRoute::Landing class="btn btn-ghost text-xl text-primary">
                        "County Financial Gateway"
                    </Link>
                </div>
                <div class="flex-none gap-2">
                    <Link to=AppRoute::Login class="btn btn-ghost">"Sign In"</Link>
                    <Link to=AppRoute::RegisterStudent class="btn btn-primary">
                        "Get Started"
                    </Link>
                </div>
            </div>

            <div class="hero flex-grow bg-base-100">
                <div class="hero-content text-center md:text-left flex-col">
                    <div class="badge badge-primary badge-outline">"Education for Everyone"</div>
                    <h1 class="text-4xl md:text-6xl font-extrabold">
                        "Build Your Future With " <span class="text-primary">"Financial Freedom"</span>
                    </h1>
                    <p class="text-lg text-base-content/70 max-w-lg">
                        "Access bursaries and scholarships designed to help you succeed. "
                        "Streamlined applications for students, powerful management for administrators."
                    </p>
                    <div class="flex flex-col sm:flex-row gap-4">
                        // Guests are sent to the login page by the router.
                        <Link to=AppRoute::StudentApply class="btn btn-accent btn-lg">
                            "Apply Now"
                        </Link>
                        <Link to=AppRoute::Login class="btn btn-outline btn-lg">
                            "Admin Portal"
                        </Link>
                    </div>
                </div>
            </div>

            <div class="py-20">
                <div class="max-w-7xl mx-auto px-4">
                    <div class="text-center mb-16">
                        <h2 class="text-3xl font-bold">"How It Works"</h2>
                        <p class="mt-4 text-base-content/70">"Simple steps to get your education funded."</p>
                    </div>
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-8">
                        {STEPS
                            .iter()
                            .map(|(title, desc)| {
                                view! {
                                    <div class="card bg-base-100 shadow-sm">
                                        <div class="card-body">
                                            <h3 class="card-title">{*title}</h3>
                                            <p class="text-base-content/70">{*desc}</p>
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>
            </div>

            <footer class="footer footer-center p-8 bg-base-100 text-base-content/60">
                <p>{format!("© {} County Financial Gateway. All rights reserved.", year)}</p>
            </footer>
        </div>
    }
}
