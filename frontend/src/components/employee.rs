use ems_shared::Session;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::dashboard::DashboardSummaryView;
use crate::components::projects::ProjectsView;
use crate::components::tasks::TasksView;
use crate::components::time_tracking::TimeTrackingView;
use crate::components::widgets::Loading;
use crate::session::use_session;
use crate::shell::{GateOutcome, Tab, verify_session};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 员工面板
///
/// 挂载时先做 profile probe，通过后才渲染头部和标签页。
#[component]
pub fn EmployeePage() -> impl IntoView {
    let session = use_session();
    let api = use_api();
    let router = use_router();

    let verified = RwSignal::new(Option::<Session>::None);
    let tab = RwSignal::new(Tab::default());

    spawn_local(async move {
        let api = api.get_value();
        let store = session.store();
        match verify_session(&api, store.as_ref()).await {
            GateOutcome::Ready(s) => {
                session.mark_verified(s.clone());
                verified.try_set(Some(s));
            }
            GateOutcome::Redirect(route) => {
                session.refresh_from_store();
                router.navigate_to(route);
            }
        }
    });

    let on_logout = move |_| {
        router.navigate_to(AppRoute::Landing);
        session.clear();
    };

    view! {
        <Show
            when=move || verified.with(|v| v.is_some())
            fallback=|| view! {
                <div class="min-h-screen flex items-center justify-center bg-base-200">
                    <Loading label="Loading..." />
                </div>
            }
        >
            {move || {
                let Some(current) = verified.get() else {
                    return ().into_any();
                };
                let user = current.user.clone();

                view! {
                    <div class="min-h-screen bg-base-200">
                        <div class="navbar bg-base-100 shadow">
                            <div class="flex-1 gap-2">
                                <span class="text-xl font-bold px-2">"🏢 EMS"</span>
                                <span class="hidden md:inline">"Welcome, " {user.name.clone()}</span>
                                <span class="badge badge-neutral">
                                    {user.role.icon()} " " {user.role.as_str()}
                                </span>
                            </div>
                            <div class="flex-none gap-2">
                                <button class="btn btn-ghost" on:click=move |_| router.navigate_to(AppRoute::Landing)>
                                    "🏠 Home"
                                </button>
                                <button class="btn btn-outline btn-error" on:click=on_logout>
                                    "Logout"
                                </button>
                            </div>
                        </div>

                        <div class="flex flex-col md:flex-row gap-6 max-w-7xl mx-auto p-4 md:p-8">
                            <ul class="menu bg-base-100 rounded-box shadow md:w-56 shrink-0">
                                {Tab::ALL
                                    .into_iter()
                                    .map(|t| view! {
                                        <li>
                                            <a
                                                id=format!("tab-{}", t.id())
                                                class=move || if tab.get() == t { "menu-active" } else { "" }
                                                on:click=move |_| tab.set(t)
                                            >
                                                {t.icon()} " " {t.label()}
                                            </a>
                                        </li>
                                    })
                                    .collect_view()}
                            </ul>

                            <div class="flex-1 min-w-0">
                                {move || {
                                    let current = current.clone();
                                    match tab.get() {
                                        Tab::Dashboard => view! { <DashboardSummaryView session=current /> }.into_any(),
                                        Tab::Tasks => view! { <TasksView session=current /> }.into_any(),
                                        Tab::Projects => view! { <ProjectsView session=current /> }.into_any(),
                                        Tab::Time => view! { <TimeTrackingView session=current /> }.into_any(),
                                    }
                                }}
                            </div>
                        </div>
                    </div>
                }
                .into_any()
            }}
        </Show>
    }
}
