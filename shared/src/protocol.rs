use crate::{DashboardStats, Employee, LoginResponse, MessageResponse, Project, Role, Task, TimeLog};
use serde::{Serialize, de::DeserializeOwned, de::IgnoredAny};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// GET/DELETE 不携带请求体
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// Path parameters are `#[serde(skip)]` fields so that the serialized request
/// is exactly the JSON body the backend expects.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the bearer token must be attached.
    const AUTH: bool = true;
    /// The URL path, relative to the API base.
    fn path(&self) -> String;
}

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTH: bool = false;
    fn path(&self) -> String {
        "/api/auth/login".to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
}

impl ApiRequest for RegisterRequest {
    // 注册响应只看状态码
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTH: bool = false;
    fn path(&self) -> String {
        "/api/auth/register".to_string()
    }
}

// =========================================================
// Employees
// =========================================================

/// Profile probe: "who am I"
#[derive(Debug, Clone, Serialize)]
pub struct CurrentEmployeeRequest;

impl ApiRequest for CurrentEmployeeRequest {
    type Response = Employee;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/api/employees/me".to_string()
    }
}

/// Manager only
#[derive(Debug, Clone, Serialize)]
pub struct ListEmployeesRequest;

impl ApiRequest for ListEmployeesRequest {
    type Response = Vec<Employee>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/api/employees".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EmployeeTimeLogsRequest {
    #[serde(skip)]
    pub employee_id: i64,
}

impl ApiRequest for EmployeeTimeLogsRequest {
    type Response = Vec<TimeLog>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/api/employees/{}/time-logs", self.employee_id)
    }
}

// =========================================================
// Dashboard
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStatsRequest;

impl ApiRequest for DashboardStatsRequest {
    type Response = DashboardStats;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/api/dashboard/stats".to_string()
    }
}

// =========================================================
// Tasks
// =========================================================

/// Managers receive every task, employees only their own.
#[derive(Debug, Clone, Serialize)]
pub struct ListTasksRequest;

impl ApiRequest for ListTasksRequest {
    type Response = Vec<Task>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/api/tasks".to_string()
    }
}

/// Manager only
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: String,
    pub assigned_to: i64,
    pub priority: String,
    pub project_id: Option<i64>,
}

impl ApiRequest for CreateTaskRequest {
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/api/tasks".to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateTaskStatusRequest {
    #[serde(skip)]
    pub task_id: i64,
    pub status: String,
}

impl ApiRequest for UpdateTaskStatusRequest {
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Put;
    fn path(&self) -> String {
        format!("/api/tasks/{}/status", self.task_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTimeLogRequest {
    #[serde(skip)]
    pub task_id: i64,
    pub hours: f64,
    pub description: String,
}

impl ApiRequest for CreateTimeLogRequest {
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        format!("/api/tasks/{}/time-log", self.task_id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskTimeLogsRequest {
    #[serde(skip)]
    pub task_id: i64,
}

impl ApiRequest for TaskTimeLogsRequest {
    type Response = Vec<TimeLog>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/api/tasks/{}/time-logs", self.task_id)
    }
}

/// Manager only. `project_id: None` detaches the task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignTaskProjectRequest {
    #[serde(skip)]
    pub task_id: i64,
    pub project_id: Option<i64>,
}

impl ApiRequest for AssignTaskProjectRequest {
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Put;
    fn path(&self) -> String {
        format!("/api/tasks/{}/project", self.task_id)
    }
}

// =========================================================
// Projects
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct ListProjectsRequest;

impl ApiRequest for ListProjectsRequest {
    type Response = Vec<Project>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/api/projects".to_string()
    }
}

/// Manager only
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: String,
}

impl ApiRequest for CreateProjectRequest {
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/api/projects".to_string()
    }
}

/// Employees only see their own tasks in the project.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectTasksRequest {
    #[serde(skip)]
    pub project_id: i64,
}

impl ApiRequest for ProjectTasksRequest {
    type Response = Vec<Task>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/api/projects/{}/tasks", self.project_id)
    }
}
