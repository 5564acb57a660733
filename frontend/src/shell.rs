//! 员工面板外壳：会话守卫与标签页

use ems_shared::Session;

use crate::api::EmsApi;
use crate::request::HttpClient;
use crate::session::SessionStore;
use crate::web::route::AppRoute;

/// 守卫结果
#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    Redirect(AppRoute),
    Ready(Session),
}

/// 校验会话
///
/// 无令牌直接重定向；profile probe 失败（含非 2xx）清除会话后重定向。
pub async fn verify_session<C: HttpClient>(api: &EmsApi<C>, store: &dyn SessionStore) -> GateOutcome {
    let Some(token) = store.token() else {
        return GateOutcome::Redirect(AppRoute::auth_failure_redirect());
    };

    match api.current_employee(&token).await {
        Ok(user) => {
            let session = Session { token, user };
            store.set(&session);
            GateOutcome::Ready(session)
        }
        Err(e) => {
            if e.is_unauthorized() {
                log_info!("[Shell] token rejected by server, clearing session");
            } else {
                log_warn!("[Shell] profile probe failed: {}", e);
            }
            store.clear();
            GateOutcome::Redirect(AppRoute::auth_failure_redirect())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Dashboard,
    Tasks,
    Projects,
    Time,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Dashboard, Tab::Tasks, Tab::Projects, Tab::Time];

    pub fn id(&self) -> &'static str {
        match self {
            Tab::Dashboard => "dashboard",
            Tab::Tasks => "tasks",
            Tab::Projects => "projects",
            Tab::Time => "time",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Tasks => "Tasks",
            Tab::Projects => "Projects",
            Tab::Time => "Time Tracking",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Tab::Dashboard => "📊",
            Tab::Tasks => "📋",
            Tab::Projects => "📁",
            Tab::Time => "⏱️",
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

    #[tokio::test]
    async fn missing_token_redirects_without_request() {
        let api = mock_api();
        let store = MemorySessionStore::new();

        let outcome = verify_session(&api, &store).await;

        assert_eq!(outcome, GateOutcome::Redirect(AppRoute::Auth(None)));
        assert_eq!(api.client().request_count(), 0);
    }

    #[tokio::test]
    async fn unauthorized_probe_clears_and_redirects() {
        let api = mock_api();
        api.client().mock_response(
            HttpMethod::Get,
            &url("/api/employees/me"),
            401,
            json!({ "detail": "Invalid authentication credentials" }),
        );
        let store = MemorySessionStore::with_token("expired", user());

        let outcome = verify_session(&api, &store).await;

        assert_eq!(outcome, GateOutcome::Redirect(AppRoute::Auth(None)));
        assert!(store.snapshot().is_none());
    }

    #[tokio::test]
    async fn network_failure_also_redirects() {
        let api = mock_api();
        api.client()
            .mock_network_error(HttpMethod::Get, &url("/api/employees/me"));
        let store = MemorySessionStore::with_token("tok", user());

        let outcome = verify_session(&api, &store).await;

        assert_eq!(outcome, GateOutcome::Redirect(AppRoute::Auth(None)));
        assert!(store.token().is_none());
    }

    #[tokio::test]
    async fn valid_probe_yields_profile() {
        let api = mock_api();
        api.client()
            .mock_response(HttpMethod::Get, &url("/api/employees/me"), 200, employee_json(9, "Employee"));
        let store = MemorySessionStore::with_token("tok", user());

        let outcome = verify_session(&api, &store).await;

        let GateOutcome::Ready(session) = outcome else {
            panic!("expected ready");
        };
        assert_eq!(session.token, "tok");
        assert_eq!(session.user.employee_id, 9);
        assert_eq!(store.snapshot().unwrap().user.employee_id, 9);

        let sent = api.client().last_request().unwrap();
        assert_eq!(sent.header("Authorization"), Some("Bearer tok"));
    }

    #[test]
    fn dashboard_is_default_tab() {
        assert_eq!(Tab::default(), Tab::Dashboard);
        let ids: Vec<_> = Tab::ALL.iter().map(|t| t.id()).collect();
        assert_eq!(ids, ["dashboard", "tasks", "projects", "time"]);
    }
}
