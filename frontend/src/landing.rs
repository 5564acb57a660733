//! 首页会话探测

use ems_shared::{Employee, Session};

use crate::api::EmsApi;
use crate::request::HttpClient;
use crate::session::SessionStore;
use crate::web::route::AppRoute;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LandingState {
    #[default]
    Checking,
    Anonymous,
    Authenticated(Employee),
}

impl LandingState {
    /// 会话检查是否已结束；结束前页面只显示加载指示
    pub fn is_settled(&self) -> bool {
        !matches!(self, LandingState::Checking)
    }

    /// 主按钮的目标：已认证去仪表盘，否则去认证页
    pub fn cta_route(&self) -> AppRoute {
        match self {
            LandingState::Authenticated(_) => AppRoute::Employee,
            _ => AppRoute::Auth(None),
        }
    }
}

/// 存在令牌时探测 profile；失败则静默清除会话
pub async fn probe_session<C: HttpClient>(api: &EmsApi<C>, store: &dyn SessionStore) -> LandingState {
    let Some(token) = store.token() else {
        return LandingState::Anonymous;
    };

    match api.current_employee(&token).await {
        Ok(user) => {
            store.set(&Session {
                token,
                user: user.clone(),
            });
            LandingState::Authenticated(user)
        }
        Err(e) => {
            if e.is_unauthorized() {
                log_info!("[Landing] stored token rejected, clearing session");
            } else {
                log_warn!("[Landing] profile check failed ({}), clearing session", e);
            }
            store.clear();
            LandingState::Anonymous
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::{employee_json, mock_api, url};
    use crate::session::MemorySessionStore;
    use crate::session::tests::user;
    use ems_shared::protocol::HttpMethod;
    use serde_json::json;

    #[test]
    fn page_waits_until_check_settles() {
        assert!(!LandingState::default().is_settled());
        assert!(LandingState::Anonymous.is_settled());
        assert!(LandingState::Authenticated(user()).is_settled());
    }

    #[tokio::test]
    async fn no_token_skips_probe() {
        let api = mock_api();
        let store = MemorySessionStore::new();

        let state = probe_session(&api, &store).await;

        assert_eq!(state, LandingState::Anonymous);
        assert_eq!(api.client().request_count(), 0);
        assert_eq!(state.cta_route(), AppRoute::Auth(None));
    }

    #[tokio::test]
    async fn valid_token_is_authenticated() {
        let api = mock_api();
        api.client()
            .mock_response(HttpMethod::Get, &url("/api/employees/me"), 200, employee_json(1, "Manager"));
        let store = MemorySessionStore::with_token("tok", user());

        let state = probe_session(&api, &store).await;

        let LandingState::Authenticated(profile) = &state else {
            panic!("expected authenticated, got {:?}", state);
        };
        assert_eq!(profile.name, "Grace Hopper");
        // 缓存的资料被刷新
        assert_eq!(store.snapshot().unwrap().user.name, "Grace Hopper");
        assert_eq!(state.cta_route(), AppRoute::Employee);
    }

    #[tokio::test]
    async fn rejected_token_is_cleared_silently() {
        let api = mock_api();
        api.client().mock_response(
            HttpMethod::Get,
            &url("/api/employees/me"),
            401,
            json!({ "detail": "Invalid authentication credentials" }),
        );
        let store = MemorySessionStore::with_token("stale", user());

        let state = probe_session(&api, &store).await;

        assert_eq!(state, LandingState::Anonymous);
        assert!(store.token().is_none());
    }
}
