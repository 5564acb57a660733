//! 认证表单
//!
//! 登录/注册两种模式共用一个表单状态。提交流程与组件解耦，
//! 组件只负责把 `AuthOutcome` 应用到表单并导航。

use ems_shared::Role;
use ems_shared::Session;
use ems_shared::protocol::{LoginRequest, RegisterRequest};

use crate::api::EmsApi;
use crate::request::HttpClient;
use crate::session::SessionStore;

const AUTH_FAILED_MESSAGE: &str = "Authentication failed";
const REGISTER_SUCCESS_MESSAGE: &str = "Registration successful! Please login.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    /// 解析 `?mode=` 查询参数，只接受 login / register
    pub fn from_query(value: &str) -> Option<Self> {
        match value {
            "login" => Some(AuthMode::Login),
            "register" => Some(AuthMode::Register),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::Login => "login",
            AuthMode::Register => "register",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AuthMode::Login => "Welcome Back",
            AuthMode::Register => "Create Account",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            AuthMode::Login => "Sign in to your employee account",
            AuthMode::Register => "Join the employee management system",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            AuthMode::Login => "Sign In",
            AuthMode::Register => "Create Account",
        }
    }

    pub fn busy_label(&self) -> &'static str {
        match self {
            AuthMode::Login => "Signing In...",
            AuthMode::Register => "Creating Account...",
        }
    }

    pub fn switch_prompt(&self) -> &'static str {
        match self {
            AuthMode::Login => "Don't have an account?",
            AuthMode::Register => "Already have an account?",
        }
    }

    pub fn switch_action(&self) -> &'static str {
        match self {
            AuthMode::Login => "Sign up",
            AuthMode::Register => "Sign in",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Email,
    Password,
    Name,
    Role,
}

/// 提交时发送的请求
#[derive(Debug, Clone, PartialEq)]
pub enum AuthRequest {
    Login(LoginRequest),
    Register(RegisterRequest),
}

/// 一次提交的结果
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    /// 会话已写入存储，应导航到仪表盘
    LoggedIn(Session),
    Registered,
    Failed(String),
}

/// 表单状态
///
/// 任一时刻 `error` 与 `success` 至多一个为 Some。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
    pub error: Option<String>,
    pub success: Option<String>,
    pub submitting: bool,
}

impl AuthForm {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    fn clear_messages(&mut self) {
        self.error = None;
        self.success = None;
    }

    pub fn input(&mut self, field: AuthField, value: String) {
        match field {
            AuthField::Email => self.email = value,
            AuthField::Password => self.password = value,
            AuthField::Name => self.name = value,
            AuthField::Role => self.role = Role::from_form_value(&value),
        }
        self.clear_messages();
    }

    /// 切换模式会完全重置表单（包括邮箱）
    pub fn toggle_mode(&mut self) {
        *self = AuthForm::new(self.mode.toggled());
    }

    pub fn begin_submit(&mut self) {
        self.submitting = true;
        self.clear_messages();
    }

    pub fn finish(&mut self, outcome: &AuthOutcome) {
        self.submitting = false;
        match outcome {
            AuthOutcome::LoggedIn(_) => {}
            AuthOutcome::Registered => {
                // 注册成功后切到登录模式，只保留邮箱
                let email = std::mem::take(&mut self.email);
                *self = AuthForm::new(AuthMode::Login);
                self.email = email;
                self.success = Some(REGISTER_SUCCESS_MESSAGE.to_string());
            }
            AuthOutcome::Failed(message) => {
                self.success = None;
                self.error = Some(message.clone());
            }
        }
    }

    pub fn request(&self) -> AuthRequest {
        match self.mode {
            AuthMode::Login => AuthRequest::Login(LoginRequest {
                email: self.email.clone(),
                password: self.password.clone(),
            }),
            AuthMode::Register => AuthRequest::Register(RegisterRequest {
                email: self.email.clone(),
                password: self.password.clone(),
                name: self.name.clone(),
                role: self.role,
            }),
        }
    }
}

/// 提交表单
///
/// 登录成功时写入会话存储；其他任何结果都不触碰存储。
pub async fn submit<C: HttpClient>(
    api: &EmsApi<C>,
    store: &dyn SessionStore,
    form: &AuthForm,
) -> AuthOutcome {
    match form.request() {
        AuthRequest::Login(req) => match api.login(&req).await {
            Ok(session) => {
                store.set(&session);
                log_info!("[Auth] signed in as employee {}", session.user.employee_id);
                AuthOutcome::LoggedIn(session)
            }
            Err(e) => {
                log_warn!("[Auth] login failed: {}", e);
                AuthOutcome::Failed(e.user_message(AUTH_FAILED_MESSAGE))
            }
        },
        AuthRequest::Register(req) => match api.register(&req).await {
            Ok(()) => AuthOutcome::Registered,
            Err(e) => {
                log_warn!("[Auth] registration failed: {}", e);
                AuthOutcome::Failed(e.user_message(AUTH_FAILED_MESSAGE))
            }
        },
    }
}
