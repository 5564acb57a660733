//! 定时器封装
//!
//! `Timeout` 在 drop 时自动取消，保存在 `StoredValue` 中即可随组件释放。

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// 提示条自动消失的时间
pub const NOTICE_DISMISS_MS: u32 = 3_000;

/// 一个会自动消失的提示条
///
/// 新消息会替换旧消息并重新计时。
#[derive(Clone, Copy)]
pub struct NoticeTimer {
    notice: RwSignal<Option<Notice>>,
    timeout: StoredValue<Option<Timeout>, LocalStorage>,
}

/// 提示内容
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub is_error: bool,
}

impl NoticeTimer {
    pub fn new() -> Self {
        Self {
            notice: RwSignal::new(None),
            timeout: StoredValue::new_local(None),
        }
    }

    pub fn notice(&self) -> Signal<Option<Notice>> {
        self.notice.into()
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message.into(), false);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message.into(), true);
    }

    fn show(&self, message: String, is_error: bool) {
        let notice = self.notice;
        notice.set(Some(Notice { message, is_error }));

        let timeout = Timeout::new(NOTICE_DISMISS_MS, move || {
            // 组件可能已卸载
            notice.try_set(None);
        });
        // 替换旧定时器，旧定时器 drop 即取消
        self.timeout.set_value(Some(timeout));
    }

    pub fn dismiss(&self) {
        self.timeout.set_value(None);
        self.notice.set(None);
    }
}
