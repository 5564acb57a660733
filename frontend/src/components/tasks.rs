use ems_shared::date::format_date;
use ems_shared::{Priority, Project, Session, Task, TaskStatus, TimeLog};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::widgets::{Loading, NoticeToast, TaskCard};
use crate::error::ApiError;
use crate::session::ViewToken;
use crate::summary::tasks_empty_message;
use crate::tasks::{TaskBoard, TaskDraft, load_task_logs, parse_optional_id, reload_board};
use crate::web::timer::NoticeTimer;

#[component]
pub fn TasksView(session: Session) -> impl IntoView {
    let api = use_api();
    let notice = NoticeTimer::new();
    let is_manager = session.user.role.is_manager();
    let token = ViewToken::new(session.token);

    let board = RwSignal::new(Option::<TaskBoard>::None);

    let reload = move || {
        spawn_local(async move {
            let api = api.get_value();
            if let Some(next) = reload_board(&api, token, is_manager).await {
                board.try_set(Some(next));
            }
        });
    };
    reload();

    let update_status = move |task_id: i64, status: String| {
        let Some(token) = token.get() else {
            return;
        };
        spawn_local(async move {
            let api = api.get_value();
            match api.update_task_status(&token, task_id, &status).await {
                Ok(_) => {
                    notice.success("Task status updated successfully");
                    reload();
                }
                Err(e) => notice.error(e.user_message("Failed to update task status")),
            }
        });
    };

    let assign_project = move |task_id: i64, project_id: Option<i64>| {
        let Some(token) = token.get() else {
            return;
        };
        spawn_local(async move {
            let api = api.get_value();
            match api.assign_task_project(&token, task_id, project_id).await {
                Ok(_) => {
                    notice.success("Task project updated");
                    reload();
                }
                Err(e) => notice.error(e.user_message("Failed to update task project")),
            }
        });
    };

    view! {
        <div class="space-y-6">
            <NoticeToast timer=notice />

            <Show when=move || is_manager>
                <CreateTaskForm board=board notice=notice on_created=reload token=token />
            </Show>

            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h3 class="card-title">"All Tasks"</h3>
                    {move || match board.get() {
                        None => view! { <Loading /> }.into_any(),
                        Some(b) if b.error.is_some() => view! {
                            <div class="alert alert-error">
                                {b.error.as_ref().map(|e| e.user_message("Failed to load tasks"))}
                            </div>
                        }
                        .into_any(),
                        Some(b) if b.tasks.is_empty() => view! {
                            <p class="text-base-content/60">{tasks_empty_message()}</p>
                        }
                        .into_any(),
                        Some(b) => b
                            .tasks
                            .clone()
                            .into_iter()
                            .map(|task| {
                                let meta = task_meta(&b, &task);
                                view! {
                                    <TaskRow
                                        task=task
                                        meta=meta
                                        projects=is_manager.then(|| b.projects.clone())
                                        on_status=update_status
                                        on_project=assign_project
                                        token=token
                                    />
                                }
                            })
                            .collect_view()
                            .into_any(),
                    }}
                </div>
            </div>
        </div>
    }
}

/// 经理视角下的负责人与项目名
fn task_meta(board: &TaskBoard, task: &Task) -> Option<String> {
    let assignee = board.employee_name(task.assigned_to)?;
    Some(match board.project_name(task.project_id) {
        Some(project) => format!("Assigned to {} · {}", assignee, project),
        None => format!("Assigned to {}", assignee),
    })
}

#[component]
fn TaskRow<S, P>(
    task: Task,
    meta: Option<String>,
    projects: Option<Vec<Project>>,
    on_status: S,
    on_project: P,
    token: ViewToken,
) -> impl IntoView
where
    S: Fn(i64, String) + Copy + Send + Sync + 'static,
    P: Fn(i64, Option<i64>) + Copy + Send + Sync + 'static,
{
    let task_id = task.task_id;
    let current_status = task.status_kind().label();
    let current_project = task.project_id.map(|id| id.to_string()).unwrap_or_default();

    let api = use_api();
    let show_logs = RwSignal::new(false);
    let logs = RwSignal::new(Option::<Result<Vec<TimeLog>, ApiError>>::None);

    let toggle_logs = move |_| {
        let open = !show_logs.get_untracked();
        show_logs.set(open);
        // 每次展开都重新获取
        if open {
            logs.set(None);
            spawn_local(async move {
                let api = api.get_value();
                if let Some(result) = load_task_logs(&api, token, task_id).await {
                    logs.try_set(Some(result));
                }
            });
        }
    };

    view! {
        <TaskCard task=task>
            {meta.map(|m| view! { <p class="text-xs text-base-content/60">{m}</p> })}
            <div class="flex flex-wrap gap-2 mt-2">
                <select
                    class="select select-bordered select-sm"
                    prop:value=current_status
                    on:change=move |ev| on_status(task_id, event_target_value(&ev))
                >
                    {TaskStatus::SELECTABLE
                        .into_iter()
                        .map(|s| view! { <option value=s.label()>{s.label()}</option> })
                        .collect_view()}
                </select>
                {projects.map(|projects| view! {
                    <select
                        class="select select-bordered select-sm"
                        prop:value=current_project.clone()
                        on:change=move |ev| on_project(task_id, parse_optional_id(&event_target_value(&ev)))
                    >
                        <option value="">"No project"</option>
                        {projects
                            .into_iter()
                            .map(|p| view! { <option value=p.project_id.to_string()>{p.name}</option> })
                            .collect_view()}
                    </select>
                })}
                <button type="button" class="btn btn-ghost btn-sm" on:click=toggle_logs>
                    {move || if show_logs.get() { "Hide Time Logs" } else { "Time Logs" }}
                </button>
            </div>
            <Show when=move || show_logs.get()>
                <TaskLogList logs=logs />
            </Show>
        </TaskCard>
    }
}

#[component]
fn TaskLogList(logs: RwSignal<Option<Result<Vec<TimeLog>, ApiError>>>) -> impl IntoView {
    move || match logs.get() {
        None => view! { <Loading /> }.into_any(),
        Some(Err(e)) => view! {
            <p class="text-sm text-error">{e.user_message("Failed to load time logs")}</p>
        }
        .into_any(),
        Some(Ok(list)) if list.is_empty() => view! {
            <p class="text-sm text-base-content/60">"No time logged for this task yet."</p>
        }
        .into_any(),
        Some(Ok(list)) => view! {
            <ul class="text-sm divide-y divide-base-300">
                {list
                    .into_iter()
                    .map(|log| view! {
                        <li class="flex justify-between gap-2 py-1">
                            <span>{format!("{}h", log.hours)}</span>
                            <span class="flex-1 text-base-content/70">{log.description}</span>
                            <span class="text-base-content/60">{format_date(&log.logged_at)}</span>
                        </li>
                    })
                    .collect_view()}
            </ul>
        }
        .into_any(),
    }
}

#[component]
fn CreateTaskForm<F>(
    board: RwSignal<Option<TaskBoard>>,
    notice: NoticeTimer,
    on_created: F,
    token: ViewToken,
) -> impl IntoView
where
    F: Fn() + Copy + Send + Sync + 'static,
{
    let api = use_api();
    let draft = RwSignal::new(TaskDraft::default());
    let submitting = RwSignal::new(false);

    let employees = move || {
        board.with(|b| b.as_ref().map(|b| b.employees.clone()).unwrap_or_default())
    };
    let projects = move || {
        board.with(|b| b.as_ref().map(|b| b.projects.clone()).unwrap_or_default())
    };

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
            match api.create_task(&token, &req).await {
                Ok(_) => {
                    notice.success("Task created successfully");
                    draft.try_set(TaskDraft::default());
                    on_created();
                }
                Err(e) => notice.error(e.user_message("Failed to create task")),
            }
            submitting.try_set(false);
        });
    };

    view! {
        <div class="card bg-base-100 shadow">
            <form class="card-body" on:submit=on_submit>
                <h3 class="card-title">"Create New Task"</h3>
                <div class="grid gap-4 md:grid-cols-2">
                    <input
                        type="text"
                        class="input input-bordered"
                        placeholder="Task title"
                        required
                        prop:value=move || draft.with(|d| d.title.clone())
                        on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
                    />
                    <select
                        class="select select-bordered"
                        required
                        prop:value=move || draft.with(|d| d.assigned_to.map(|id| id.to_string()).unwrap_or_default())
                        on:change=move |ev| draft.update(|d| d.assigned_to = parse_optional_id(&event_target_value(&ev)))
                    >
                        <option value="">"Assign to..."</option>
                        {move || employees()
                            .into_iter()
                            .map(|e| view! { <option value=e.employee_id.to_string()>{e.name}</option> })
                            .collect_view()}
                    </select>
                    <select
                        class="select select-bordered"
                        prop:value=move || draft.with(|d| d.priority.label())
                        on:change=move |ev| draft.update(|d| d.priority = Priority::parse_or_medium(&event_target_value(&ev)))
                    >
                        {Priority::ALL
                            .into_iter()
                            .map(|p| view! { <option value=p.label()>{p.label()}</option> })
                            .collect_view()}
                    </select>
                    <select
                        class="select select-bordered"
                        prop:value=move || draft.with(|d| d.project_id.map(|id| id.to_string()).unwrap_or_default())
                        on:change=move |ev| draft.update(|d| d.project_id = parse_optional_id(&event_target_value(&ev)))
                    >
                        <option value="">"No project"</option>
                        {move || projects()
                            .into_iter()
                            .map(|p| view! { <option value=p.project_id.to_string()>{p.name}</option> })
                            .collect_view()}
                    </select>
                </div>
                <textarea
                    class="textarea textarea-bordered"
                    placeholder="Description"
                    prop:value=move || draft.with(|d| d.description.clone())
                    on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                ></textarea>
                <div class="card-actions justify-end">
                    <button class="btn btn-primary" disabled=move || submitting.get()>
                        "Create Task"
                    </button>
                </div>
            </form>
        </div>
    }
}
