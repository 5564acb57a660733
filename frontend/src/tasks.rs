//! 任务管理
//!
//! 经理可以创建任务、调整项目归属；所有人都可以更新自己任务的状态。

use ems_shared::protocol::CreateTaskRequest;
use ems_shared::{Employee, Priority, Project, Task, TimeLog};

use crate::api::EmsApi;
use crate::error::ApiError;
use crate::request::HttpClient;
use crate::session::ViewToken;

/// 经理创建任务的表单
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub assigned_to: Option<i64>,
    pub priority: Priority,
    pub project_id: Option<i64>,
}

impl TaskDraft {
    pub fn validate(&self) -> Result<CreateTaskRequest, &'static str> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Title is required");
        }
        let Some(assigned_to) = self.assigned_to else {
            return Err("Please choose an assignee");
        };

        Ok(CreateTaskRequest {
            title: title.to_string(),
            description: self.description.trim().to_string(),
            assigned_to,
            priority: self.priority.label().to_string(),
            project_id: self.project_id,
        })
    }
}

/// `<select>` 值到可选 id 的转换，空字符串表示未选择
pub fn parse_optional_id(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

/// 任务页所需数据
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskBoard {
    pub tasks: Vec<Task>,
    /// 仅经理加载
    pub employees: Vec<Employee>,
    pub projects: Vec<Project>,
    pub error: Option<ApiError>,
}

impl TaskBoard {
    pub fn employee_name(&self, employee_id: Option<i64>) -> Option<&str> {
        let id = employee_id?;
        self.employees
            .iter()
            .find(|e| e.employee_id == id)
            .map(|e| e.name.as_str())
    }

    pub fn project_name(&self, project_id: Option<i64>) -> Option<&str> {
        let id = project_id?;
        self.projects
            .iter()
            .find(|p| p.project_id == id)
            .map(|p| p.name.as_str())
    }
}

/// 加载任务列表；经理额外加载员工与项目用于下拉框
///
/// 任务列表失败时记录在 `error`，下拉框数据失败只记录日志。
pub async fn load_board<C: HttpClient>(api: &EmsApi<C>, token: &str, is_manager: bool) -> TaskBoard {
    let mut board = TaskBoard::default();

    if is_manager {
        let (tasks, employees, projects) =
            futures::join!(api.tasks(token), api.employees(token), api.projects(token));
        match tasks {
            Ok(tasks) => board.tasks = tasks,
            Err(e) => board.error = Some(e),
        }
        board.employees = employees.unwrap_or_else(|e| {
            log_warn!("[Tasks] failed to load employees: {}", e);
            Vec::new()
        });
        board.projects = projects.unwrap_or_else(|e| {
            log_warn!("[Tasks] failed to load projects: {}", e);
            Vec::new()
        });
    } else {
        match api.tasks(token).await {
            Ok(tasks) => board.tasks = tasks,
            Err(e) => board.error = Some(e),
        }
    }

    if let Some(e) = &board.error {
        log_error!("[Tasks] failed to load tasks: {}", e);
    }
    board
}

/// 视图内的重新加载；视图已卸载时不发请求，返回 None
pub async fn reload_board<C: HttpClient>(
    api: &EmsApi<C>,
    token: ViewToken,
    is_manager: bool,
) -> Option<TaskBoard> {
    let Some(token) = token.get() else {
        log_warn!("[Tasks] view closed, skipping reload");
        return None;
    };
    Some(load_board(api, &token, is_manager).await)
}

/// 单个任务的工时明细
pub async fn load_task_logs<C: HttpClient>(
    api: &EmsApi<C>,
    token: ViewToken,
    task_id: i64,
) -> Option<Result<Vec<TimeLog>, ApiError>> {
    let token = token.get()?;
    let logs = api.task_time_logs(&token, task_id).await;
    if let Err(e) = &logs {
        log_error!("[Tasks] failed to load time logs of task {}: {}", task_id, e);
    }
    Some(logs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::{employee_json, mock_api, url};
    use ems_shared::protocol::HttpMethod;
    use serde_json::json;

    #[test]
    fn draft_requires_title_and_assignee() {
        let mut draft = TaskDraft::default();
        assert_eq!(draft.validate(), Err("Title is required"));

        draft.title = "   ".to_string();
        assert_eq!(draft.validate(), Err("Title is required"));

        draft.title = "Ship it".to_string();
        assert_eq!(draft.validate(), Err("Please choose an assignee"));

        draft.assigned_to = Some(4);
        draft.priority = Priority::High;
        let req = draft.validate().unwrap();
        assert_eq!(req.title, "Ship it");
        assert_eq!(req.assigned_to, 4);
        assert_eq!(req.priority, "High");
        assert_eq!(req.project_id, None);
    }

    #[test]
    fn optional_id_parsing() {
        assert_eq!(parse_optional_id("12"), Some(12));
        assert_eq!(parse_optional_id(""), None);
        assert_eq!(parse_optional_id("none"), None);
    }

    #[tokio::test]
    async fn employee_board_only_loads_tasks() {
        let api = mock_api();
        api.client()
            .mock_response(HttpMethod::Get, &url("/api/tasks"), 200, json!([]));

        let board = load_board(&api, "tok", false).await;

        assert!(board.error.is_none());
        assert_eq!(api.client().request_count(), 1);
    }

    #[tokio::test]
    async fn manager_board_tolerates_lookup_failure() {
        let api = mock_api();
        api.client().mock_response(
            HttpMethod::Get,
            &url("/api/tasks"),
            200,
            json!([{
                "task_id": 1, "title": "A", "status": "Pending", "priority": "Low",
                "assigned_to": 2, "project_id": 7
            }]),
        );
        api.client().mock_response(
            HttpMethod::Get,
            &url("/api/employees"),
            200,
            json!([employee_json(2, "Employee")]),
        );
        api.client().mock_response(
            HttpMethod::Get,
            &url("/api/projects"),
            403,
            json!({ "detail": "Access denied" }),
        );

        let board = load_board(&api, "tok", true).await;

        assert!(board.error.is_none());
        assert_eq!(board.tasks.len(), 1);
        assert_eq!(board.employee_name(board.tasks[0].assigned_to), Some("Grace Hopper"));
        assert_eq!(board.project_name(board.tasks[0].project_id), None);
    }

    #[tokio::test]
    async fn reload_after_view_closed_sends_nothing() {
        let api = mock_api();
        api.client()
            .mock_response(HttpMethod::Get, &url("/api/tasks"), 200, json!([]));

        let owner = leptos::reactive::owner::Owner::new();
        let token = owner.with(|| ViewToken::new("tok".to_string()));

        assert!(reload_board(&api, token, false).await.is_some());
        assert_eq!(api.client().request_count(), 1);

        owner.cleanup();
        assert!(reload_board(&api, token, true).await.is_none());
        assert!(load_task_logs(&api, token, 1).await.is_none());
        assert_eq!(api.client().request_count(), 1);
    }

    #[tokio::test]
    async fn task_logs_are_loaded_per_task() {
        let api = mock_api();
        api.client().mock_response(
            HttpMethod::Get,
            &url("/api/tasks/5/time-logs"),
            200,
            json!([{ "employee_id": 2, "hours": 1.5, "description": "setup", "logged_at": "2024-05-01T09:00:00" }]),
        );
        let owner = leptos::reactive::owner::Owner::new();
        let token = owner.with(|| ViewToken::new("tok".to_string()));

        let logs = load_task_logs(&api, token, 5).await.unwrap().unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].hours, 1.5);
        assert_eq!(
            api.client().last_request().unwrap().header("Authorization"),
            Some("Bearer tok")
        );
    }

    #[tokio::test]
    async fn task_failure_is_reported() {
        let api = mock_api();
        api.client()
            .mock_network_error(HttpMethod::Get, &url("/api/tasks"));

        let board = load_board(&api, "tok", false).await;
        assert!(matches!(board.error, Some(ApiError::Network(_))));
    }
}
