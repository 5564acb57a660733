//! 仪表盘概览数据加载
//!
//! 三个相互独立的请求（stats / tasks / projects）并发执行并汇合。
//! 任一请求失败只记录日志并写入 `failures`，视图照常进入 Ready。

use std::future::Future;

use ems_shared::{DashboardStats, Project, RECENT_TASK_LIMIT, Role, Task};
use futures::future::{AbortHandle, Abortable, Aborted};

use crate::api::EmsApi;
use crate::error::ApiError;
use crate::request::HttpClient;

const NO_TASKS_MESSAGE: &str = "No tasks found. Start by creating your first task!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummarySource {
    Stats,
    Tasks,
    Projects,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchFailure {
    pub source: SummarySource,
    pub error: ApiError,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardSummary {
    /// 加载失败时为 None，卡片按 0 展示，绩效区块隐藏
    pub stats: Option<DashboardStats>,
    /// 服务端顺序下的前 `RECENT_TASK_LIMIT` 个任务
    pub recent_tasks: Vec<Task>,
    pub projects: Vec<Project>,
    pub failures: Vec<FetchFailure>,
}

impl DashboardSummary {
    pub fn from_results(
        stats: Result<DashboardStats, ApiError>,
        tasks: Result<Vec<Task>, ApiError>,
        projects: Result<Vec<Project>, ApiError>,
    ) -> Self {
        let mut summary = DashboardSummary::default();

        match stats {
            Ok(stats) => summary.stats = Some(stats),
            Err(error) => summary.record(SummarySource::Stats, error),
        }
        match tasks {
            Ok(tasks) => summary.recent_tasks = recent_tasks(tasks),
            Err(error) => summary.record(SummarySource::Tasks, error),
        }
        match projects {
            Ok(projects) => summary.projects = projects,
            Err(error) => summary.record(SummarySource::Projects, error),
        }

        summary
    }

    fn record(&mut self, source: SummarySource, error: ApiError) {
        log_error!("[Summary] error fetching {:?}: {}", source, error);
        self.failures.push(FetchFailure { source, error });
    }

    /// 卡片数据，缺失时全部为 0
    pub fn stats_or_default(&self) -> DashboardStats {
        self.stats.clone().unwrap_or_default()
    }
}

/// 视图状态机：Loading → Ready
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SummaryState {
    #[default]
    Loading,
    Ready(DashboardSummary),
}

pub fn recent_tasks(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.truncate(RECENT_TASK_LIMIT);
    tasks
}

pub fn tasks_empty_message() -> &'static str {
    NO_TASKS_MESSAGE
}

/// 项目列表为空时的提示，经理与员工不同
pub fn projects_empty_message(role: Role) -> &'static str {
    match role {
        Role::Manager => "No projects yet. Create your first project!",
        Role::Employee => "No projects available yet.",
    }
}

/// 并发加载三份数据
pub async fn load_summary<C: HttpClient>(api: &EmsApi<C>, token: &str) -> DashboardSummary {
    let (stats, tasks, projects) = futures::join!(
        api.dashboard_stats(token),
        api.tasks(token),
        api.projects(token)
    );
    DashboardSummary::from_results(stats, tasks, projects)
}

/// 可取消的加载
///
/// 视图卸载时调用 `AbortHandle::abort`，未完成的请求结果被丢弃。
pub fn load_summary_abortable<C: HttpClient>(
    api: EmsApi<C>,
    token: String,
) -> (
    impl Future<Output = Result<DashboardSummary, Aborted>>,
    AbortHandle,
) {
    let (handle, registration) = AbortHandle::new_pair();
    let fut = Abortable::new(
        async move { load_summary(&api, &token).await },
        registration,
    );
    (fut, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::{mock_api, url};
    use crate::request::MockHttpClient;
    use ems_shared::protocol::HttpMethod;
    use serde_json::{Value, json};

    fn task_json(id: i64) -> Value {
        json!({
            "task_id": id,
            "title": format!("Task {}", id),
            "description": "",
            "status": "Pending",
            "priority": "Medium",
            "created_at": "2024-05-01T10:00:00",
            "total_hours": 0
        })
    }

    fn tasks_json(n: i64) -> Value {
        Value::Array((1..=n).map(task_json).collect())
    }

    fn stats_json() -> Value {
        json!({
            "total_tasks": 12,
            "completed_tasks": 3,
            "pending_tasks": 9,
            "total_hours": 7.5,
            "completion_rate": 25.0,
            "priority_breakdown": { "high": 1, "medium": 10, "low": 1 }
        })
    }

    fn projects_json() -> Value {
        json!([
            { "project_id": 1, "name": "Apollo", "description": "Moon", "created_at": "2024-01-01T00:00:00" },
            { "project_id": 2, "name": "Gemini", "description": "Orbit", "created_at": "2024-02-01T00:00:00" }
        ])
    }

    fn mock_all(client: &MockHttpClient, task_count: i64) {
        client.mock_response(HttpMethod::Get, &url("/api/dashboard/stats"), 200, stats_json());
        client.mock_response(HttpMethod::Get, &url("/api/tasks"), 200, tasks_json(task_count));
        client.mock_response(HttpMethod::Get, &url("/api/projects"), 200, projects_json());
    }

    #[tokio::test]
    async fn recent_tasks_never_exceed_limit() {
        for (returned, shown) in [(0, 0), (3, 3), (5, 5), (12, 5)] {
            let api = mock_api();
            mock_all(api.client(), returned);

            let summary = load_summary(&api, "tok").await;

            assert_eq!(summary.recent_tasks.len(), shown, "server returned {}", returned);
            // 保持服务端顺序
            let ids: Vec<_> = summary.recent_tasks.iter().map(|t| t.task_id).collect();
            assert_eq!(ids, (1..=shown as i64).collect::<Vec<_>>());
        }
    }

    #[tokio::test]
    async fn all_three_requests_are_authenticated() {
        let api = mock_api();
        mock_all(api.client(), 1);

        let summary = load_summary(&api, "tok").await;
        assert!(summary.failures.is_empty());

        let requests = api.client().requests.borrow();
        assert_eq!(requests.len(), 3);
        assert!(requests.iter().all(|r| r.header("Authorization") == Some("Bearer tok")));
    }

    #[tokio::test]
    async fn stats_failure_keeps_other_datasets() {
        let api = mock_api();
        mock_all(api.client(), 2);
        api.client()
            .mock_network_error(HttpMethod::Get, &url("/api/dashboard/stats"));

        let summary = load_summary(&api, "tok").await;

        assert!(summary.stats.is_none());
        assert_eq!(summary.stats_or_default(), DashboardStats::default());
        assert_eq!(summary.recent_tasks.len(), 2);
        assert_eq!(summary.projects.len(), 2);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].source, SummarySource::Stats);
    }

    #[tokio::test]
    async fn tasks_failure_keeps_other_datasets() {
        let api = mock_api();
        mock_all(api.client(), 2);
        api.client().mock_response(
            HttpMethod::Get,
            &url("/api/tasks"),
            500,
            json!({ "detail": "boom" }),
        );

        let summary = load_summary(&api, "tok").await;

        assert!(summary.recent_tasks.is_empty());
        assert_eq!(summary.stats.as_ref().map(|s| s.total_tasks), Some(12));
        assert_eq!(summary.projects.len(), 2);
        assert_eq!(summary.failures[0].source, SummarySource::Tasks);
    }

    #[tokio::test]
    async fn projects_failure_keeps_other_datasets() {
        let api = mock_api();
        mock_all(api.client(), 4);
        api.client()
            .mock_raw(HttpMethod::Get, &url("/api/projects"), 200, "{ broken");

        let summary = load_summary(&api, "tok").await;

        assert!(summary.projects.is_empty());
        assert_eq!(summary.recent_tasks.len(), 4);
        assert!(summary.stats.is_some());
        assert!(matches!(summary.failures[0].error, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn stats_are_trusted_verbatim() {
        let api = mock_api();
        mock_all(api.client(), 0);

        let summary = load_summary(&api, "tok").await;
        let stats = summary.stats.unwrap();

        // 客户端不重新计算：任务列表为空，统计仍为服务端给出的值
        assert_eq!(stats.total_tasks, 12);
        assert_eq!(stats.completion_rate, 25.0);
        assert_eq!(stats.priority_breakdown.medium, 10);
    }

    #[tokio::test]
    async fn aborted_load_yields_no_summary() {
        let api = mock_api();
        mock_all(api.client(), 3);

        let (load, handle) = load_summary_abortable(api, "tok".to_string());
        handle.abort();

        assert_eq!(load.await, Err(Aborted));
    }

    #[tokio::test]
    async fn unaborted_load_completes() {
        let api = mock_api();
        mock_all(api.client(), 3);

        let (load, _handle) = load_summary_abortable(api, "tok".to_string());
        let summary = load.await.unwrap();
        assert_eq!(summary.recent_tasks.len(), 3);
    }

    #[test]
    fn project_empty_state_depends_on_role() {
        let manager = projects_empty_message(Role::Manager);
        let employee = projects_empty_message(Role::Employee);
        assert_ne!(manager, employee);
        assert!(manager.contains("Create your first project"));
        assert_eq!(employee, "No projects available yet.");
    }
}
