//! 工时记录

use ems_shared::protocol::CreateTimeLogRequest;
use ems_shared::{Task, TimeLog};

use crate::api::EmsApi;
use crate::error::ApiError;
use crate::request::HttpClient;
use crate::session::ViewToken;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeLogDraft {
    pub task_id: Option<i64>,
    /// 原始输入，提交前解析
    pub hours: String,
    pub description: String,
}

impl TimeLogDraft {
    pub fn validate(&self) -> Result<CreateTimeLogRequest, &'static str> {
        let Some(task_id) = self.task_id else {
            return Err("Please select a task");
        };
        let hours: f64 = self
            .hours
            .trim()
            .parse()
            .map_err(|_| "Hours must be a number")?;
        if !hours.is_finite() || hours <= 0.0 {
            return Err("Hours must be greater than 0");
        }

        Ok(CreateTimeLogRequest {
            task_id,
            hours,
            description: self.description.trim().to_string(),
        })
    }
}

/// 所有记录的总工时，保留两位小数
pub fn total_hours(logs: &[TimeLog]) -> f64 {
    let sum: f64 = logs.iter().map(|l| l.hours).sum();
    (sum * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeOverview {
    pub tasks: Vec<Task>,
    pub logs: Vec<TimeLog>,
    pub failures: Vec<ApiError>,
}

/// 并发加载任务与本人的工时记录
pub async fn load_overview<C: HttpClient>(
    api: &EmsApi<C>,
    token: &str,
    employee_id: i64,
) -> TimeOverview {
    let (tasks, logs) = futures::join!(api.tasks(token), api.employee_time_logs(token, employee_id));

    let mut overview = TimeOverview::default();
    match tasks {
        Ok(tasks) => overview.tasks = tasks,
        Err(e) => {
            log_error!("[Time] failed to load tasks: {}", e);
            overview.failures.push(e);
        }
    }
    match logs {
        Ok(logs) => overview.logs = logs,
        Err(e) => {
            log_error!("[Time] failed to load time logs: {}", e);
            overview.failures.push(e);
        }
    }
    overview
}

/// 视图内的重新加载；视图已卸载时不发请求，返回 None
pub async fn reload_overview<C: HttpClient>(
    api: &EmsApi<C>,
    token: ViewToken,
    employee_id: i64,
) -> Option<TimeOverview> {
    let Some(token) = token.get() else {
        log_warn!("[Time] view closed, skipping reload");
        return None;
    };
    Some(load_overview(api, &token, employee_id).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::{mock_api, url};
    use ems_shared::protocol::HttpMethod;
    use serde_json::json;

    fn log(hours: f64) -> TimeLog {
        TimeLog {
            employee_id: 1,
            hours,
            description: String::new(),
            logged_at: String::new(),
            task_id: Some(1),
            task_title: None,
        }
    }

    #[test]
    fn hours_must_be_positive_number() {
        let mut draft = TimeLogDraft {
            task_id: Some(3),
            hours: "abc".to_string(),
            description: String::new(),
        };
        assert_eq!(draft.validate(), Err("Hours must be a number"));

        draft.hours = "0".to_string();
        assert_eq!(draft.validate(), Err("Hours must be greater than 0"));

        draft.hours = "-2".to_string();
        assert_eq!(draft.validate(), Err("Hours must be greater than 0"));

        draft.hours = "NaN".to_string();
        assert_eq!(draft.validate(), Err("Hours must be greater than 0"));

        draft.hours = " 1.25 ".to_string();
        assert_eq!(draft.validate().unwrap().hours, 1.25);
    }

    #[test]
    fn task_is_required() {
        let draft = TimeLogDraft {
            task_id: None,
            hours: "2".to_string(),
            description: String::new(),
        };
        assert_eq!(draft.validate(), Err("Please select a task"));
    }

    #[test]
    fn total_is_rounded() {
        assert_eq!(total_hours(&[]), 0.0);
        assert_eq!(total_hours(&[log(0.1), log(0.2)]), 0.3);
        assert_eq!(total_hours(&[log(1.5), log(2.0), log(0.25)]), 3.75);
    }

    #[tokio::test]
    async fn overview_loads_own_logs() {
        let api = mock_api();
        api.client()
            .mock_response(HttpMethod::Get, &url("/api/tasks"), 200, json!([]));
        api.client().mock_response(
            HttpMethod::Get,
            &url("/api/employees/8/time-logs"),
            200,
            json!([{ "employee_id": 8, "hours": 2.5, "description": "review",
                     "logged_at": "2024-05-01T10:00:00", "task_id": 4, "task_title": "Audit" }]),
        );

        let overview = load_overview(&api, "tok", 8).await;

        assert!(overview.failures.is_empty());
        assert_eq!(overview.logs.len(), 1);
        assert_eq!(overview.logs[0].task_title.as_deref(), Some("Audit"));
        assert_eq!(total_hours(&overview.logs), 2.5);
    }

    #[tokio::test]
    async fn forbidden_logs_are_reported() {
        let api = mock_api();
        api.client()
            .mock_response(HttpMethod::Get, &url("/api/tasks"), 200, json!([]));
        api.client().mock_response(
            HttpMethod::Get,
            &url("/api/employees/8/time-logs"),
            403,
            json!({ "detail": "Access denied" }),
        );

        let overview = load_overview(&api, "tok", 8).await;
        assert_eq!(overview.failures.len(), 1);
        assert_eq!(overview.failures[0].status(), Some(403));
    }

    #[tokio::test]
    async fn reload_after_view_closed_sends_nothing() {
        let api = mock_api();
        let owner = leptos::reactive::owner::Owner::new();
        let token = owner.with(|| ViewToken::new("tok".to_string()));
        owner.cleanup();

        assert!(reload_overview(&api, token, 8).await.is_none());
        assert_eq!(api.client().request_count(), 0);
    }

    #[tokio::test]
    async fn logging_time_posts_to_task() {
        let api = mock_api();
        api.client().mock_response(
            HttpMethod::Post,
            &url("/api/tasks/4/time-log"),
            200,
            json!({ "message": "Time log added successfully" }),
        );

        let req = TimeLogDraft {
            task_id: Some(4),
            hours: "3".to_string(),
            description: "pairing".to_string(),
        }
        .validate()
        .unwrap();
        let res = api.log_time("tok", &req).await.unwrap();
        assert_eq!(res.message, "Time log added successfully");
    }
}
