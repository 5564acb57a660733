use ems_shared::protocol::{
    ApiRequest, AssignTaskProjectRequest, CreateProjectRequest, CreateTaskRequest,
    CreateTimeLogRequest, CurrentEmployeeRequest, DashboardStatsRequest, EmployeeTimeLogsRequest,
    ListEmployeesRequest, ListProjectsRequest, ListTasksRequest, LoginRequest, ProjectTasksRequest,
    RegisterRequest, TaskTimeLogsRequest, UpdateTaskStatusRequest,
};
use ems_shared::{
    DashboardStats, Employee, ErrorBody, HEADER_AUTHORIZATION, MessageResponse, Project, Session,
    Task, TimeLog,
};
use leptos::prelude::*;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::request::{HttpClient, HttpRequest, HttpResponse};
use crate::web::FetchHttpClient;

/// 后端 REST API 客户端
///
/// 所有页面共用同一个实例；受保护接口统一附加 `Authorization: Bearer <token>`。
#[derive(Clone, Debug)]
pub struct EmsApi<C> {
    config: AppConfig,
    client: C,
}

impl<C: HttpClient> EmsApi<C> {
    pub fn new(config: AppConfig, client: C) -> Self {
        Self { config, client }
    }

    #[cfg(test)]
    pub fn client(&self) -> &C {
        &self.client
    }

    fn build<R: ApiRequest>(&self, req: &R, token: Option<&str>) -> Result<HttpRequest, ApiError> {
        let mut http = HttpRequest::new(&self.config.url(&req.path()), R::METHOD);

        if R::AUTH {
            if let Some(token) = token {
                http = http.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
            }
        }

        if R::METHOD.has_body() {
            let body = serde_json::to_string(req).map_err(|e| ApiError::Encode(e.to_string()))?;
            http = http
                .with_header("Content-Type", "application/json")
                .with_body(body);
        }

        Ok(http)
    }

    /// 发送请求并检查状态码，非 2xx 转为 `ApiError::Status`
    async fn dispatch<R: ApiRequest>(
        &self,
        req: &R,
        token: Option<&str>,
    ) -> Result<HttpResponse, ApiError> {
        let http = self.build(req, token)?;
        let res = self.client.send(http).await?;

        if !res.is_success() {
            let detail = serde_json::from_str::<ErrorBody>(&res.body)
                .ok()
                .and_then(|b| b.detail);
            return Err(ApiError::Status {
                status: res.status,
                detail,
            });
        }

        Ok(res)
    }

    /// 通用调用入口
    pub async fn execute<R: ApiRequest>(
        &self,
        req: &R,
        token: Option<&str>,
    ) -> Result<R::Response, ApiError> {
        self.dispatch(req, token).await?.json()
    }

    // =========================================================
    // Auth
    // =========================================================

    pub async fn login(&self, req: &LoginRequest) -> Result<Session, ApiError> {
        self.execute(req, None).await.map(Session::from)
    }

    /// 响应体不做解析，只看状态码
    pub async fn register(&self, req: &RegisterRequest) -> Result<(), ApiError> {
        self.dispatch(req, None).await.map(|_| ())
    }

    // =========================================================
    // Employees
    // =========================================================

    /// Profile probe
    pub async fn current_employee(&self, token: &str) -> Result<Employee, ApiError> {
        self.execute(&CurrentEmployeeRequest, Some(token)).await
    }

    pub async fn employees(&self, token: &str) -> Result<Vec<Employee>, ApiError> {
        self.execute(&ListEmployeesRequest, Some(token)).await
    }

    pub async fn employee_time_logs(
        &self,
        token: &str,
        employee_id: i64,
    ) -> Result<Vec<TimeLog>, ApiError> {
        self.execute(&EmployeeTimeLogsRequest { employee_id }, Some(token))
            .await
    }

    // =========================================================
    // Dashboard / Tasks / Projects
    // =========================================================

    pub async fn dashboard_stats(&self, token: &str) -> Result<DashboardStats, ApiError> {
        self.execute(&DashboardStatsRequest, Some(token)).await
    }

    pub async fn tasks(&self, token: &str) -> Result<Vec<Task>, ApiError> {
        self.execute(&ListTasksRequest, Some(token)).await
    }

    pub async fn create_task(
        &self,
        token: &str,
        req: &CreateTaskRequest,
    ) -> Result<MessageResponse, ApiError> {
        self.execute(req, Some(token)).await
    }

    pub async fn update_task_status(
        &self,
        token: &str,
        task_id: i64,
        status: &str,
    ) -> Result<MessageResponse, ApiError> {
        let req = UpdateTaskStatusRequest {
            task_id,
            status: status.to_string(),
        };
        self.execute(&req, Some(token)).await
    }

    pub async fn assign_task_project(
        &self,
        token: &str,
        task_id: i64,
        project_id: Option<i64>,
    ) -> Result<MessageResponse, ApiError> {
        let req = AssignTaskProjectRequest {
            task_id,
            project_id,
        };
        self.execute(&req, Some(token)).await
    }

    pub async fn log_time(
        &self,
        token: &str,
        req: &CreateTimeLogRequest,
    ) -> Result<MessageResponse, ApiError> {
        self.execute(req, Some(token)).await
    }

    pub async fn task_time_logs(&self, token: &str, task_id: i64) -> Result<Vec<TimeLog>, ApiError> {
        self.execute(&TaskTimeLogsRequest { task_id }, Some(token))
            .await
    }

    pub async fn projects(&self, token: &str) -> Result<Vec<Project>, ApiError> {
        self.execute(&ListProjectsRequest, Some(token)).await
    }

    pub async fn create_project(
        &self,
        token: &str,
        req: &CreateProjectRequest,
    ) -> Result<MessageResponse, ApiError> {
        self.execute(req, Some(token)).await
    }

    pub async fn project_tasks(&self, token: &str, project_id: i64) -> Result<Vec<Task>, ApiError> {
        self.execute(&ProjectTasksRequest { project_id }, Some(token))
            .await
    }
}

// =========================================================
// Context
// =========================================================

/// 浏览器环境下的 API 客户端
pub type AppApi = EmsApi<FetchHttpClient>;

/// 提供 API 客户端到 Context
pub fn provide_api(api: AppApi) {
    provide_context(StoredValue::new(api));
}

/// 从 Context 获取 API 客户端
pub fn use_api() -> StoredValue<AppApi> {
    use_context::<StoredValue<AppApi>>().expect("AppApi should be provided")
}
