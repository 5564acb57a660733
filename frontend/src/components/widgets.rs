//! 通用小组件

use ems_shared::date::format_date;
use ems_shared::Task;
use ems_shared::badge::{priority_badge_class, status_badge_class};
use leptos::prelude::*;

use crate::web::timer::NoticeTimer;

/// 居中加载指示
#[component]
pub fn Loading(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-12 gap-2 text-base-content/60">
            <span class="loading loading-spinner loading-md"></span>
            {label}
        </div>
    }
}

/// 右上角提示条，3 秒后自动消失
#[component]
pub fn NoticeToast(timer: NoticeTimer) -> impl IntoView {
    let notice = timer.notice();

    view! {
        <Show when=move || notice.with(|n| n.is_some())>
            <div class="toast toast-top toast-end z-50">
                <div class=move || {
                    if notice.with(|n| n.as_ref().is_some_and(|n| n.is_error)) {
                        "alert alert-error shadow-lg"
                    } else {
                        "alert alert-success shadow-lg"
                    }
                }>
                    <span>{move || notice.with(|n| n.as_ref().map(|n| n.message.clone()))}</span>
                    <button class="btn btn-ghost btn-xs" on:click=move |_| timer.dismiss()>"✕"</button>
                </div>
            </div>
        </Show>
    }
}

/// 统计卡片
#[component]
pub fn StatCard(
    icon: &'static str,
    title: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(optional)] accent: &'static str,
) -> impl IntoView {
    view! {
        <div class="stat">
            <div class="stat-figure text-3xl">{icon}</div>
            <div class="stat-title">{title}</div>
            <div class=format!("stat-value {}", accent)>{move || value.get()}</div>
        </div>
    }
}

/// 任务卡片
///
/// `children` 用于附加操作区，例如状态选择器。
#[component]
pub fn TaskCard(task: Task, #[prop(optional)] children: Option<Children>) -> impl IntoView {
    let hours = (task.total_hours > 0.0).then(|| format!("{}h logged", task.total_hours));
    let created = format_date(&task.created_at);

    view! {
        <div class="card bg-base-100 border border-base-300 shadow-sm">
            <div class="card-body p-4 gap-2">
                <div class="flex items-start justify-between gap-2">
                    <h4 class="font-semibold">{task.title.clone()}</h4>
                    <div class="flex gap-1">
                        <span class=status_badge_class(&task.status)>{task.status.clone()}</span>
                        <span class=priority_badge_class(&task.priority)>{task.priority.clone()}</span>
                    </div>
                </div>
                {(!task.description.is_empty()).then(|| view! {
                    <p class="text-sm text-base-content/70">{task.description.clone()}</p>
                })}
                <div class="flex justify-between text-xs text-base-content/60">
                    <span>"Created: " {created}</span>
                    {hours.map(|h| view! { <span>{h}</span> })}
                </div>
                {children.map(|c| c())}
            </div>
        </div>
    }
}
