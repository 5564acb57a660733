//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其守卫属性。

use std::fmt::Display;

use crate::auth::AuthMode;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 首页 (公开)
    #[default]
    Landing,
    /// 登录/注册页，可带 `?mode=` 指定初始模式
    Auth(Option<AuthMode>),
    /// 员工面板 (需要认证)
    Employee,
    /// 页面未找到
    NotFound,
}

/// 从 `?a=1&b=2` 形式的查询串中取出参数值
pub fn query_param<'a>(search: &'a str, key: &str) -> Option<&'a str> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

impl AppRoute {
    /// 将 URL path + query 解析为路由枚举
    pub fn from_location(path: &str, search: &str) -> Self {
        match path.trim_end_matches('/') {
            "" => Self::Landing,
            "/auth" => Self::Auth(query_param(search, "mode").and_then(AuthMode::from_query)),
            "/employee" => Self::Employee,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL
    pub fn to_path(&self) -> String {
        match self {
            Self::Landing => "/".to_string(),
            Self::Auth(None) => "/auth".to_string(),
            Self::Auth(Some(mode)) => format!("/auth?mode={}", mode.as_str()),
            Self::Employee => "/employee".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Employee)
    }

    /// 已认证用户是否应该离开此路由（认证页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Auth(None)
    }

    /// 认证成功时的重定向目标（从认证页）
    pub fn auth_success_redirect() -> Self {
        Self::Employee
    }

    /// 应用守卫，返回实际应当展示的路由
    pub fn resolve(self, is_authenticated: bool) -> Self {
        if self.requires_auth() && !is_authenticated {
            Self::auth_failure_redirect()
        } else if self.should_redirect_when_authenticated() && is_authenticated {
            Self::auth_success_redirect()
        } else {
            self
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
