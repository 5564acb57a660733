use serde::{Deserialize, Serialize};

pub mod badge;
pub mod date;
pub mod protocol;

pub use badge::{Priority, TaskStatus};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const STORAGE_TOKEN_KEY: &str = "token";
pub const STORAGE_USER_KEY: &str = "user";
pub const HEADER_AUTHORIZATION: &str = "Authorization";

/// 仪表盘 "Recent Tasks" 最多展示的任务数
pub const RECENT_TASK_LIMIT: usize = 5;

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Role {
    #[default]
    Employee,
    Manager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "Employee",
            Role::Manager => "Manager",
        }
    }

    /// 解析表单 `<select>` 的值，未知值回退为 Employee
    pub fn from_form_value(value: &str) -> Self {
        if value == "Manager" {
            Role::Manager
        } else {
            Role::Employee
        }
    }

    pub fn is_manager(&self) -> bool {
        matches!(self, Role::Manager)
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Role::Employee => "👨‍💻",
            Role::Manager => "👨‍💼",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeLog {
    pub employee_id: i64,
    pub hours: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub logged_at: String,
    // 仅 `/employees/{id}/time-logs` 返回
    #[serde(default)]
    pub task_id: Option<i64>,
    #[serde(default)]
    pub task_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub task_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: String,
    pub priority: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub total_hours: f64,
    #[serde(default)]
    pub assigned_to: Option<i64>,
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub time_logs: Vec<TimeLog>,
}

impl Task {
    pub fn status_kind(&self) -> TaskStatus {
        TaskStatus::parse(&self.status)
    }

    pub fn priority_kind(&self) -> Priority {
        Priority::parse_or_medium(&self.priority)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub project_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub created_by: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PriorityBreakdown {
    pub high: u64,
    pub medium: u64,
    pub low: u64,
}

/// 统计数据完全信任服务端，客户端不做任何聚合。
/// 缺失的数值字段一律视为 0。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DashboardStats {
    pub total_tasks: u64,
    pub completed_tasks: u64,
    pub pending_tasks: u64,
    pub in_progress_tasks: u64,
    pub total_hours: f64,
    pub completion_rate: f64,
    pub priority_breakdown: PriorityBreakdown,
}

impl DashboardStats {
    /// 进度条宽度，限制在 0..=100
    pub fn completion_width(&self) -> f64 {
        self.completion_rate.clamp(0.0, 100.0)
    }
}

// =========================================================
// 会话 (Session)
// =========================================================

/// 客户端持有的认证凭据：令牌 + 用户资料快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: Employee,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub employee_id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<LoginResponse> for Session {
    fn from(res: LoginResponse) -> Self {
        Session {
            token: res.token,
            user: Employee {
                employee_id: res.employee_id,
                name: res.name,
                email: res.email,
                role: res.role,
                created_at: None,
            },
        }
    }
}

/// 非 2xx 响应体
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

/// 写操作的通用确认响应
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MessageResponse {
    pub message: String,
    pub task_id: Option<i64>,
    pub project_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stats_missing_fields_default_to_zero() {
        let stats: DashboardStats = serde_json::from_value(json!({ "total_tasks": 4 })).unwrap();
        assert_eq!(stats.total_tasks, 4);
        assert_eq!(stats.completed_tasks, 0);
        assert_eq!(stats.completion_rate, 0.0);
        assert_eq!(stats.priority_breakdown, PriorityBreakdown::default());

        let empty: DashboardStats = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty, DashboardStats::default());
    }

    #[test]
    fn partial_priority_breakdown() {
        let stats: DashboardStats =
            serde_json::from_value(json!({ "priority_breakdown": { "high": 2 } })).unwrap();
        assert_eq!(stats.priority_breakdown.high, 2);
        assert_eq!(stats.priority_breakdown.low, 0);
    }

    #[test]
    fn completion_width_is_clamped() {
        let mut stats = DashboardStats::default();
        stats.completion_rate = 140.0;
        assert_eq!(stats.completion_width(), 100.0);
        stats.completion_rate = -3.0;
        assert_eq!(stats.completion_width(), 0.0);
    }

    #[test]
    fn login_response_becomes_session() {
        let res: LoginResponse = serde_json::from_value(json!({
            "token": "abc",
            "employee_id": 7,
            "name": "Ada",
            "email": "ada@example.com",
            "role": "Manager"
        }))
        .unwrap();

        let session = Session::from(res);
        assert_eq!(session.token, "abc");
        assert_eq!(session.user.employee_id, 7);
        assert_eq!(session.user.role, Role::Manager);
        assert_eq!(session.user.created_at, None);
    }

    #[test]
    fn task_defaults_optional_fields() {
        let task: Task = serde_json::from_value(json!({
            "task_id": 1,
            "title": "Write report",
            "status": "In Progress",
            "priority": "High"
        }))
        .unwrap();
        assert_eq!(task.total_hours, 0.0);
        assert!(task.time_logs.is_empty());
        assert_eq!(task.status_kind(), TaskStatus::InProgress);
        assert_eq!(task.priority_kind(), Priority::High);
    }

    #[test]
    fn role_form_value_falls_back_to_employee() {
        assert_eq!(Role::from_form_value("Manager"), Role::Manager);
        assert_eq!(Role::from_form_value("Employee"), Role::Employee);
        assert_eq!(Role::from_form_value("admin"), Role::Employee);
    }

    #[test]
    fn error_body_without_detail() {
        let body: ErrorBody = serde_json::from_value(json!({ "error": "x" })).unwrap();
        assert!(body.detail.is_none());
    }
}
