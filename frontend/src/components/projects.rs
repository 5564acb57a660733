use ems_shared::{Project, Session, Task};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::widgets::{Loading, NoticeToast, TaskCard};
use crate::error::ApiError;
use crate::projects::{ProjectDraft, reload_projects};
use crate::session::ViewToken;
use crate::summary::projects_empty_message;
use crate::web::timer::NoticeTimer;

#[component]
pub fn ProjectsView(session: Session) -> impl IntoView {
    let api = use_api();
    let notice = NoticeTimer::new();
    let role = session.user.role;
    let token = ViewToken::new(session.token);

    let projects = RwSignal::new(Option::<Result<Vec<Project>, ApiError>>::None);
    let selected = RwSignal::new(Option::<i64>::None);
    let project_tasks = RwSignal::new(Option::<Vec<Task>>::None);

    let reload = move || {
        spawn_local(async move {
            let api = api.get_value();
            if let Some(result) = reload_projects(&api, token).await {
                projects.try_set(Some(result));
            }
        });
    };
    reload();

    let select = move |project_id: i64| {
        let Some(token) = token.get() else {
            return;
        };
        selected.set(Some(project_id));
        project_tasks.set(None);
        spawn_local(async move {
            let api = api.get_value();
            match api.project_tasks(&token, project_id).await {
                Ok(tasks) => {
                    // 期间可能已切换到其他项目
                    if selected.try_get_untracked() == Some(Some(project_id)) {
                        project_tasks.try_set(Some(tasks));
                    }
                }
                Err(e) => {
                    notice.error(e.user_message("Failed to load project tasks"));
                    project_tasks.try_set(Some(Vec::new()));
                }
            }
        });
    };

    view! {
        <div class="space-y-6">
            <NoticeToast timer=notice />

            <Show when=move || role.is_manager()>
                <CreateProjectForm notice=notice on_created=reload token=token />
            </Show>

            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h3 class="card-title">"Projects"</h3>
                    {move || match projects.get() {
                        None => view! { <Loading /> }.into_any(),
                        Some(Err(e)) => view! {
                            <div class="alert alert-error">{e.user_message("Failed to load projects")}</div>
                        }
                        .into_any(),
                        Some(Ok(list)) if list.is_empty() => view! {
                            <p class="text-base-content/60">{projects_empty_message(role)}</p>
                        }
                        .into_any(),
                        Some(Ok(list)) => view! {
                            <div class="grid gap-4 md:grid-cols-2">
                                {list
                                    .into_iter()
                                    .map(|p| {
                                        let id = p.project_id;
                                        view! {
                                            <button
                                                class=move || if selected.get() == Some(id) {
                                                    "text-left border-2 border-primary rounded-box p-4"
                                                } else {
                                                    "text-left border border-base-300 rounded-box p-4 hover:border-primary"
                                                }
                                                on:click=move |_| select(id)
                                            >
                                                <h4 class="font-semibold">{p.name}</h4>
                                                <p class="text-sm text-base-content/70">{p.description}</p>
                                            </button>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        }
                        .into_any(),
                    }}
                </div>
            </div>

            <Show when=move || selected.get().is_some()>
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h3 class="card-title">"Project Tasks"</h3>
                        {move || match project_tasks.get() {
                            None => view! { <Loading /> }.into_any(),
                            Some(tasks) if tasks.is_empty() => view! {
                                <p class="text-base-content/60">"No tasks in this project yet."</p>
                            }
                            .into_any(),
                            Some(tasks) => tasks
                                .into_iter()
                                .map(|task| view! { <TaskCard task=task /> })
                                .collect_view()
                                .into_any(),
                        }}
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn CreateProjectForm<F>(notice: NoticeTimer, on_created: F, token: ViewToken) -> impl IntoView
where
    F: Fn() + Copy + Send + Sync + 'static,
{
    let api = use_api();
    let draft = RwSignal::new(ProjectDraft::default());
    let submitting = RwSignal::new(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let req = match draft.with_untracked(|d| d.validate()) {
            Ok(req) => req,
            Err(message) => {
                notice.error(message);
                return;
            }
        };
        let Some(token) = token.get() else {
            return;
        };
        submitting.set(true);

        spawn_local(async move {
            let api = api.get_value();
            match api.create_project(&token, &req).await {
                Ok(_) => {
                    notice.success("Project created successfully");
                    draft.try_set(ProjectDraft::default());
                    on_created();
                }
                Err(e) => notice.error(e.user_message("Failed to create project")),
            }
            submitting.try_set(false);
        });
    };

    view! {
        <div class="card bg-base-100 shadow">
            <form class="card-body" on:submit=on_submit>
                <h3 class="card-title">"Create New Project"</h3>
                <input
                    type="text"
                    class="input input-bordered"
                    placeholder="Project name"
                    required
                    prop:value=move || draft.with(|d| d.name.clone())
                    on:input=move |ev| draft.update(|d| d.name = event_target_value(&ev))
                />
                <textarea
                    class="textarea textarea-bordered"
                    placeholder="Description"
                    prop:value=move || draft.with(|d| d.description.clone())
                    on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                ></textarea>
                <div class="card-actions justify-end">
                    <button class="btn btn-primary" disabled=move || submitting.get()>
                        "Create Project"
                    </button>
                </div>
            </form>
        </div>
    }
}
