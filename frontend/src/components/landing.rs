use ems_shared::Session;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::auth::AuthMode;
use crate::components::widgets::Loading;
use crate::landing::{LandingState, probe_session};
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};

const FEATURES: [(&str, &str, &str); 3] = [
    ("📋", "Task Management", "Create, assign and track tasks with priorities and statuses."),
    ("⏱️", "Time Tracking", "Log hours against tasks and review where the time goes."),
    ("📁", "Projects", "Group related work into projects and follow their progress."),
];

#[component]
pub fn LandingPage() -> impl IntoView {
    let session = use_session();
    let api = use_api();
    let router = use_router();

    let state = RwSignal::new(LandingState::Checking);

    spawn_local(async move {
        let api = api.get_value();
        let store = session.store();
        let next = probe_session(&api, store.as_ref()).await;

        match &next {
            LandingState::Authenticated(user) => {
                if let Some(token) = session.token() {
                    session.mark_verified(Session {
                        token,
                        user: user.clone(),
                    });
                }
            }
            _ => session.refresh_from_store(),
        }
        state.try_set(next);
    });

    let settled = move || state.with(LandingState::is_settled);
    let is_authenticated = move || state.with(|s| matches!(s, LandingState::Authenticated(_)));
    let on_cta = move |_| router.navigate_to(state.with_untracked(|s| s.cta_route()));

    view! {
        <Show
            when=settled
            fallback=|| view! {
                <div class="min-h-screen bg-base-200 flex items-center justify-center">
                    <Loading label="Loading..." />
                </div>
            }
        >
            <div class="min-h-screen bg-base-200">
                <div class="navbar bg-base-100 shadow">
                    <div class="flex-1">
                        <span class="btn btn-ghost text-xl">"🏢 EMS"</span>
                    </div>
                    <div class="flex-none gap-2">
                        <Show
                            when=is_authenticated
                            fallback=|| view! {
                                <Link to=AppRoute::Auth(Some(AuthMode::Login)) class="btn btn-ghost">
                                    "Sign In"
                                </Link>
                                <Link to=AppRoute::Auth(Some(AuthMode::Register)) class="btn btn-primary">
                                    "Get Started"
                                </Link>
                            }
                        >
                            <Link to=AppRoute::Employee class="btn btn-primary">
                                "Go to Dashboard"
                            </Link>
                        </Show>
                    </div>
                </div>

                <div class="hero py-20">
                    <div class="hero-content text-center">
                        <div class="max-w-2xl space-y-6">
                            <h1 class="text-5xl font-bold">"Employee Management System"</h1>
                            <p class="text-lg text-base-content/70">
                                "Manage tasks, track time and keep projects on schedule in one place."
                            </p>
                            <button class="btn btn-primary btn-lg" on:click=on_cta>
                                "Get Started"
                            </button>
                        </div>
                    </div>
                </div>

                <div class="grid gap-6 md:grid-cols-3 max-w-5xl mx-auto px-4 pb-16">
                    {FEATURES
                        .iter()
                        .map(|(icon, title, text)| view! {
                            <div class="card bg-base-100 shadow">
                                <div class="card-body">
                                    <div class="text-4xl">{*icon}</div>
                                    <h3 class="card-title">{*title}</h3>
                                    <p class="text-base-content/70">{*text}</p>
                                </div>
                            </div>
                        })
                        .collect_view()}
                </div>
            </div>
        </Show>
    }
}
