//! 项目管理

use ems_shared::Project;
use ems_shared::protocol::CreateProjectRequest;

use crate::api::EmsApi;
use crate::error::ApiError;
use crate::request::HttpClient;
use crate::session::ViewToken;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
}

impl ProjectDraft {
    pub fn validate(&self) -> Result<CreateProjectRequest, &'static str> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Project name is required");
        }
        Ok(CreateProjectRequest {
            name: name.to_string(),
            description: self.description.trim().to_string(),
        })
    }
}

/// 视图内的重新加载；视图已卸载时不发请求，返回 None
pub async fn reload_projects<C: HttpClient>(
    api: &EmsApi<C>,
    token: ViewToken,
) -> Option<Result<Vec<Project>, ApiError>> {
    let Some(token) = token.get() else {
        log_warn!("[Projects] view closed, skipping reload");
        return None;
    };
    let projects = api.projects(&token).await;
    if let Err(e) = &projects {
        log_error!("[Projects] failed to load projects: {}", e);
    }
    Some(projects)
}
