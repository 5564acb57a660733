//! 徽章分类
//!
//! 将服务端返回的 `status` / `priority` 原始字符串映射为枚举，
//! 映射是全函数：任何输入都有确定的徽章样式。

/// 任务状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    /// 无法识别的状态，按 Pending 样式展示
    Unknown,
}

impl TaskStatus {
    /// 可供用户选择的状态（不含 Unknown）
    pub const SELECTABLE: [TaskStatus; 3] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    /// 大小写不敏感解析
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "pending" => TaskStatus::Pending,
            "in progress" => TaskStatus::InProgress,
            "completed" => TaskStatus::Completed,
            _ => TaskStatus::Unknown,
        }
    }

    /// 服务端使用的规范写法
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending | TaskStatus::Unknown => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            TaskStatus::Completed => "badge badge-completed",
            TaskStatus::InProgress => "badge badge-progress",
            TaskStatus::Pending | TaskStatus::Unknown => "badge badge-pending",
        }
    }
}

/// 任务优先级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// 大小写不敏感解析，无法识别返回 None
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }

    /// 展示用解析：未知优先级按 Medium 处理
    pub fn parse_or_medium(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_default()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            Priority::Low => "badge badge-low",
            Priority::Medium => "badge badge-medium",
            Priority::High => "badge badge-high",
        }
    }
}

/// 状态字符串 → 徽章 class
pub fn status_badge_class(raw: &str) -> &'static str {
    TaskStatus::parse(raw).badge_class()
}

/// 优先级字符串 → 徽章 class
pub fn priority_badge_class(raw: &str) -> &'static str {
    Priority::parse_or_medium(raw).badge_class()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_case_insensitive() {
        for raw in ["Completed", "completed", "COMPLETED", "  Completed "] {
            assert_eq!(TaskStatus::parse(raw), TaskStatus::Completed);
            assert_eq!(status_badge_class(raw), "badge badge-completed");
        }
        assert_eq!(status_badge_class("IN PROGRESS"), "badge badge-progress");
        assert_eq!(status_badge_class("pending"), "badge badge-pending");
    }

    #[test]
    fn unknown_status_uses_pending_badge() {
        assert_eq!(TaskStatus::parse("archived"), TaskStatus::Unknown);
        assert_eq!(status_badge_class("archived"), "badge badge-pending");
        assert_eq!(status_badge_class(""), "badge badge-pending");
    }

    #[test]
    fn priority_is_case_insensitive() {
        assert_eq!(priority_badge_class("HIGH"), "badge badge-high");
        assert_eq!(priority_badge_class("high"), "badge badge-high");
        assert_eq!(priority_badge_class("Low"), "badge badge-low");
        assert_eq!(priority_badge_class("medium"), "badge badge-medium");
    }

    #[test]
    fn unknown_priority_uses_medium_badge() {
        assert_eq!(Priority::parse("urgent"), None);
        assert_eq!(priority_badge_class("urgent"), "badge badge-medium");
    }

    #[test]
    fn unknown_status_label_is_submittable() {
        assert_eq!(TaskStatus::Unknown.label(), "Pending");
        assert_eq!(TaskStatus::parse(TaskStatus::InProgress.label()), TaskStatus::InProgress);
    }
}
