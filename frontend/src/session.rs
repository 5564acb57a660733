//! 会话模块
//!
//! 管理认证令牌与用户资料快照，与路由系统解耦。
//! 路由服务通过注入的 `has_token` 信号来执行守卫。

use std::sync::Arc;

use ems_shared::Session;
use leptos::prelude::*;

#[cfg(test)]
use ems_shared::Employee;
#[cfg(test)]
use std::sync::Mutex;

// =========================================================
// 存储抽象
// =========================================================

/// 会话持久化接口
///
/// 浏览器中由 LocalStorage 实现，测试中使用内存实现。
/// 不做过期跟踪，令牌是否有效只能通过受保护请求得知。
pub trait SessionStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn set(&self, session: &Session);
    fn clear(&self);
}

/// 内存会话存储
#[cfg(test)]
#[derive(Default)]
pub struct MemorySessionStore {
    inner: Mutex<Option<Session>>,
}

#[cfg(test)]
impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str, user: Employee) -> Self {
        let store = Self::new();
        store.set(&Session {
            token: token.to_string(),
            user,
        });
        store
    }

    pub fn snapshot(&self) -> Option<Session> {
        self.inner.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<String> {
        self.inner.lock().unwrap().as_ref().map(|s| s.token.clone())
    }

    fn set(&self, session: &Session) {
        *self.inner.lock().unwrap() = Some(session.clone());
    }

    fn clear(&self) {
        *self.inner.lock().unwrap() = None;
    }
}

// =========================================================
// 会话状态
// =========================================================

/// 会话生命周期
///
/// `Undetermined` 表示尚未读取存储，与"确认无会话"的 `Absent` 区分。
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Undetermined,
    /// 确认没有令牌
    Absent,
    /// 有令牌，但尚未经服务端确认
    Unverified { token: String },
    /// Profile probe 成功
    Verified(Session),
}

impl SessionState {
    /// 从存储读取当前状态（不访问网络）
    pub fn from_store(store: &dyn SessionStore) -> Self {
        match store.token() {
            Some(token) => SessionState::Unverified { token },
            None => SessionState::Absent,
        }
    }

    /// 客户端把令牌存在视为已认证
    pub fn has_token(&self) -> bool {
        matches!(
            self,
            SessionState::Unverified { .. } | SessionState::Verified(_)
        )
    }
}

// =========================================================
// Context
// =========================================================

/// 会话上下文
///
/// 包含存储句柄与状态信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct SessionContext {
    store: StoredValue<Arc<dyn SessionStore>>,
    state: RwSignal<SessionState>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store: StoredValue::new(store),
            state: RwSignal::new(SessionState::Undetermined),
        }
    }

    pub fn store(&self) -> Arc<dyn SessionStore> {
        self.store.get_value()
    }

    pub fn token(&self) -> Option<String> {
        self.store.with_value(|s| s.token())
    }

    /// 令牌是否存在（用于路由服务注入）
    pub fn has_token_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.has_token()))
    }

    /// 重新读取存储，用于存储被外部修改之后
    pub fn refresh_from_store(&self) {
        let next = self.store.with_value(|s| SessionState::from_store(s.as_ref()));
        self.state.set(next);
    }

    /// Profile probe 成功后调用
    pub fn mark_verified(&self, session: Session) {
        self.state.set(SessionState::Verified(session));
    }

    /// 注销并清除状态
    ///
    /// 导航由路由服务的认证状态监听自动处理。
    pub fn clear(&self) {
        self.store.with_value(|s| s.clear());
        self.state.set(SessionState::Absent);
    }
}

/// 视图持有的令牌
///
/// 随视图的 Owner 一起释放；视图卸载后 `get` 返回 None，
/// 迟到的请求完成回调据此放弃后续加载。
#[derive(Clone, Copy)]
pub struct ViewToken(StoredValue<String>);

impl ViewToken {
    pub fn new(token: String) -> Self {
        Self(StoredValue::new(token))
    }

    pub fn get(&self) -> Option<String> {
        self.0.try_get_value()
    }
}

/// 初始化会话上下文并提供到 Context
pub fn provide_session(store: Arc<dyn SessionStore>) -> SessionContext {
    let ctx = SessionContext::new(store);
    ctx.refresh_from_store();
    provide_context(ctx);
    ctx
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use ems_shared::Role;

    pub(crate) fn user() -> Employee {
        Employee {
            employee_id: 1,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role: Role::Employee,
            created_at: None,
        }
    }

    #[test]
    fn empty_store_is_absent() {
        let store = MemorySessionStore::new();
        let state = SessionState::from_store(&store);
        assert_eq!(state, SessionState::Absent);
        assert!(!state.has_token());
    }

    #[test]
    fn token_without_probe_is_unverified() {
        let store = MemorySessionStore::with_token("abc", user());
        let state = SessionState::from_store(&store);
        assert_eq!(
            state,
            SessionState::Unverified {
                token: "abc".to_string()
            }
        );
        assert!(state.has_token());
    }

    #[test]
    fn undetermined_is_not_absent() {
        let state = SessionState::default();
        assert_eq!(state, SessionState::Undetermined);
        assert_ne!(state, SessionState::Absent);
        assert!(!state.has_token());
    }

    #[test]
    fn view_token_is_gone_after_owner_cleanup() {
        let owner = leptos::reactive::owner::Owner::new();
        let token = owner.with(|| ViewToken::new("abc".to_string()));
        assert_eq!(token.get().as_deref(), Some("abc"));

        owner.cleanup();
        assert_eq!(token.get(), None);
    }

    #[test]
    fn clear_removes_token_and_user() {
        let store = MemorySessionStore::with_token("abc", user());
        assert_eq!(store.snapshot().map(|s| s.user.employee_id), Some(1));
        store.clear();
        assert!(store.token().is_none());
        assert!(store.snapshot().is_none());
    }
}
