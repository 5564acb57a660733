//! EMS 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `session`: 会话状态管理
//! - `api`: 后端 REST 客户端
//! - `components`: UI 组件层
//!
//! 业务流程（认证、会话守卫、数据加载）与组件分离，可在宿主机上测试。

#[macro_use]
mod log;

mod api;
mod auth;
mod config;
mod error;
mod landing;
mod projects;
mod request;
mod session;
mod shell;
mod summary;
mod tasks;
mod time_tracking;

mod components {
    pub mod auth;
    pub mod dashboard;
    pub mod employee;
    pub mod landing;
    pub mod projects;
    pub mod tasks;
    pub mod time_tracking;
    pub mod widgets;
}

// 浏览器适配层：fetch / LocalStorage / 定时器 / History API
pub(crate) mod web {
    mod http;
    pub mod route;
    pub mod router;
    mod storage;
    pub mod timer;

    pub use http::FetchHttpClient;
    pub use storage::LocalSessionStore;
}

use std::sync::Arc;

use leptos::prelude::*;

use crate::api::{EmsApi, provide_api};
use crate::components::auth::AuthPage;
use crate::components::employee::EmployeePage;
use crate::components::landing::LandingPage;
use crate::config::AppConfig;
use crate::session::provide_session;
use crate::web::route::AppRoute;
use crate::web::router::{Link, Router, RouterOutlet};
use crate::web::{FetchHttpClient, LocalSessionStore};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Landing => view! { <LandingPage /> }.into_any(),
        AppRoute::Auth(mode) => view! { <AuthPage initial_mode=mode /> }.into_any(),
        AppRoute::Employee => view! { <EmployeePage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center space-y-4">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl">"Page not found"</p>
                    <Link to=AppRoute::Landing class="btn btn-primary">"Back to Home"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 会话上下文（从 LocalStorage 读取令牌）
    let session = provide_session(Arc::new(LocalSessionStore));

    // 2. API 客户端
    let config = AppConfig::from_env();
    log_info!("[App] API base: {:?}", config.api_base());
    provide_api(EmsApi::new(config, FetchHttpClient));

    // 3. 令牌信号注入路由服务
    let has_token = session.has_token_signal();

    view! {
        <Router is_authenticated=has_token>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
