use ems_shared::Session;
use ems_shared::date::format_date;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::widgets::{Loading, NoticeToast};
use crate::session::ViewToken;
use crate::tasks::parse_optional_id;
use crate::time_tracking::{TimeLogDraft, TimeOverview, reload_overview, total_hours};
use crate::web::timer::NoticeTimer;

#[component]
pub fn TimeTrackingView(session: Session) -> impl IntoView {
    let api = use_api();
    let notice = NoticeTimer::new();
    let employee_id = session.user.employee_id;
    let token = ViewToken::new(session.token);

    let overview = RwSignal::new(Option::<TimeOverview>::None);
    let draft = RwSignal::new(TimeLogDraft::default());
    let submitting = RwSignal::new(false);

    let reload = move || {
        spawn_local(async move {
            let api = api.get_value();
            if let Some(next) = reload_overview(&api, token, employee_id).await {
                overview.try_set(Some(next));
            }
        });
    };
    reload();

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
            match api.log_time(&token, &req).await {
                Ok(_) => {
                    notice.success("Time logged successfully");
                    draft.try_set(TimeLogDraft::default());
                    reload();
                }
                Err(e) => notice.error(e.user_message("Failed to log time")),
            }
            submitting.try_set(false);
        });
    };

    let tasks = move || overview.with(|o| o.as_ref().map(|o| o.tasks.clone()).unwrap_or_default());

    view! {
        <div class="space-y-6">
            <NoticeToast timer=notice />

            <div class="card bg-base-100 shadow">
                <form class="card-body" on:submit=on_submit>
                    <h3 class="card-title">"Log Time"</h3>
                    <div class="grid gap-4 md:grid-cols-2">
                        <select
                            class="select select-bordered"
                            required
                            prop:value=move || draft.with(|d| d.task_id.map(|id| id.to_string()).unwrap_or_default())
                            on:change=move |ev| draft.update(|d| d.task_id = parse_optional_id(&event_target_value(&ev)))
                        >
                            <option value="">"Select a task..."</option>
                            {move || tasks()
                                .into_iter()
                                .map(|t| view! { <option value=t.task_id.to_string()>{t.title}</option> })
                                .collect_view()}
                        </select>
                        <input
                            type="number"
                            class="input input-bordered"
                            placeholder="Hours"
                            min="0"
                            step="0.25"
                            required
                            prop:value=move || draft.with(|d| d.hours.clone())
                            on:input=move |ev| draft.update(|d| d.hours = event_target_value(&ev))
                        />
                    </div>
                    <textarea
                        class="textarea textarea-bordered"
                        placeholder="What did you work on?"
                        prop:value=move || draft.with(|d| d.description.clone())
                        on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                    ></textarea>
                    <div class="card-actions justify-end">
                        <button class="btn btn-primary" disabled=move || submitting.get()>
                            "Log Time"
                        </button>
                    </div>
                </form>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    {move || match overview.get() {
                        None => view! { <Loading /> }.into_any(),
                        Some(o) => {
                            let total = total_hours(&o.logs);
                            view! {
                                <div class="flex items-center justify-between">
                                    <h3 class="card-title">"My Time Logs"</h3>
                                    <span class="badge badge-primary badge-lg">{format!("Total: {}h", total)}</span>
                                </div>
                                {if o.logs.is_empty() {
                                    view! { <p class="text-base-content/60">"No time logged yet."</p> }.into_any()
                                } else {
                                    view! {
                                        <table class="table table-zebra w-full">
                                            <thead>
                                                <tr>
                                                    <th>"Task"</th>
                                                    <th>"Hours"</th>
                                                    <th>"Description"</th>
                                                    <th>"Date"</th>
                                                </tr>
                                            </thead>
                                            <tbody>
                                                {o.logs
                                                    .into_iter()
                                                    .map(|log| view! {
                                                        <tr>
                                                            <td>{log.task_title.unwrap_or_else(|| "-".to_string())}</td>
                                                            <td>{format!("{}h", log.hours)}</td>
                                                            <td>{log.description}</td>
                                                            <td>{format_date(&log.logged_at)}</td>
                                                        </tr>
                                                    })
                                                    .collect_view()}
                                            </tbody>
                                        </table>
                                    }
                                    .into_any()
                                }}
                            }
                            .into_any()
                        }
                    }}
                </div>
            </div>
        </div>
    }
}
