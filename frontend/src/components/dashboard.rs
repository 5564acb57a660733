use ems_shared::{Role, Session};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::widgets::{Loading, StatCard, TaskCard};
use crate::summary::{
    DashboardSummary, SummaryState, load_summary_abortable, projects_empty_message,
    tasks_empty_message,
};

/// 仪表盘概览
///
/// 卸载时取消未完成的请求。
#[component]
pub fn DashboardSummaryView(session: Session) -> impl IntoView {
    let api = use_api();
    let state = RwSignal::new(SummaryState::Loading);

    let (load, handle) = load_summary_abortable(api.get_value(), session.token.clone());
    on_cleanup(move || handle.abort());
    spawn_local(async move {
        match load.await {
            Ok(summary) => {
                state.try_set(SummaryState::Ready(summary));
            }
            Err(_) => log_info!("[Summary] load aborted"),
        }
    });

    let role = session.user.role;

    move || match state.get() {
        SummaryState::Loading => view! { <Loading label="Loading dashboard..." /> }.into_any(),
        SummaryState::Ready(summary) => view! { <SummaryContent summary=summary role=role /> }.into_any(),
    }
}

#[component]
fn SummaryContent(summary: DashboardSummary, role: Role) -> impl IntoView {
    let stats = summary.stats_or_default();
    let breakdown = stats.priority_breakdown.clone();
    let performance = summary.stats.clone();

    view! {
        <div class="space-y-6">
            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                <StatCard icon="📋" title="Total Tasks" value=stats.total_tasks.to_string() accent="text-primary" />
                <StatCard icon="✅" title="Completed" value=stats.completed_tasks.to_string() accent="text-success" />
                <StatCard icon="⏳" title="Pending" value=stats.pending_tasks.to_string() accent="text-warning" />
                <StatCard icon="⏱️" title="Hours Logged" value=format!("{}h", stats.total_hours) accent="text-secondary" />
            </div>

            <div class="grid gap-6 lg:grid-cols-2">
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h3 class="card-title">"Recent Tasks"</h3>
                        {if summary.recent_tasks.is_empty() {
                            view! { <p class="text-base-content/60">{tasks_empty_message()}</p> }.into_any()
                        } else {
                            summary
                                .recent_tasks
                                .into_iter()
                                .map(|task| view! { <TaskCard task=task /> })
                                .collect_view()
                                .into_any()
                        }}
                    </div>
                </div>

                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h3 class="card-title">"Projects"</h3>
                        {if summary.projects.is_empty() {
                            view! { <p class="text-base-content/60">{projects_empty_message(role)}</p> }.into_any()
                        } else {
                            summary
                                .projects
                                .into_iter()
                                .map(|p| view! {
                                    <div class="border border-base-300 rounded-box p-3">
                                        <h4 class="font-semibold">{p.name}</h4>
                                        <p class="text-sm text-base-content/70">{p.description}</p>
                                    </div>
                                })
                                .collect_view()
                                .into_any()
                        }}
                    </div>
                </div>
            </div>

            {performance.map(|stats| {
                let width = stats.completion_width();
                view! {
                    <div class="card bg-base-100 shadow">
                        <div class="card-body">
                            <h3 class="card-title">"Performance Summary"</h3>
                            <div class="flex justify-between text-sm">
                                <span>"Completion Rate"</span>
                                <span>{format!("{}%", stats.completion_rate)}</span>
                            </div>
                            <progress class="progress progress-success w-full" value=width.to_string() max="100"></progress>
                            <div class="grid grid-cols-3 gap-4 mt-4 text-center">
                                <div>
                                    <span class="badge badge-high">"High"</span>
                                    <div class="text-2xl font-bold">{breakdown.high}</div>
                                </div>
                                <div>
                                    <span class="badge badge-medium">"Medium"</span>
                                    <div class="text-2xl font-bold">{breakdown.medium}</div>
                                </div>
                                <div>
                                    <span class="badge badge-low">"Low"</span>
                                    <div class="text-2xl font-bold">{breakdown.low}</div>
                                </div>
                            </div>
                        </div>
                    </div>
                }
            })}
        </div>
    }
}
