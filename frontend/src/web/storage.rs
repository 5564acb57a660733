//! LocalStorage 会话存储
//!
//! 令牌以原始字符串保存在 `token` 键，用户资料以 JSON 保存在 `user` 键。

use ems_shared::{STORAGE_TOKEN_KEY, STORAGE_USER_KEY, Session};
use gloo_storage::{LocalStorage, Storage};

use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSessionStore;

impl SessionStore for LocalSessionStore {
    fn token(&self) -> Option<String> {
        // 令牌不是 JSON，直接读取原始字符串
        LocalStorage::raw()
            .get_item(STORAGE_TOKEN_KEY)
            .ok()
            .flatten()
            .filter(|t| !t.is_empty())
    }

    fn set(&self, session: &Session) {
        if LocalStorage::raw()
            .set_item(STORAGE_TOKEN_KEY, &session.token)
            .is_err()
        {
            log_error!("[Storage] failed to persist token");
        }
        if let Err(e) = LocalStorage::set(STORAGE_USER_KEY, &session.user) {
            log_error!("[Storage] failed to persist user: {}", e);
        }
    }

    fn clear(&self) {
        LocalStorage::delete(STORAGE_TOKEN_KEY);
        LocalStorage::delete(STORAGE_USER_KEY);
    }
}
