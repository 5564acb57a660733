//! API 错误类型

/// 网络层失败时展示给用户的固定文案
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// 请求未到达服务端（fetch 失败）
    #[error("network error: {0}")]
    Network(String),

    /// 服务端返回非 2xx，`detail` 取自响应体
    #[error("request failed with status {status}")]
    Status { status: u16, detail: Option<String> },

    /// 响应体不是期望的 JSON
    #[error("invalid response body: {0}")]
    Decode(String),

    /// 请求体序列化失败
    #[error("failed to encode request: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    /// 面向用户的提示：优先使用服务端 `detail`，网络错误使用固定文案，
    /// 其余情况使用调用方给出的兜底文案。
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                detail: Some(detail),
                ..
            } if !detail.is_empty() => detail.clone(),
            ApiError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
            _ => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_wins_over_fallback() {
        let err = ApiError::Status {
            status: 401,
            detail: Some("Invalid credentials".to_string()),
        };
        assert_eq!(err.user_message("Authentication failed"), "Invalid credentials");
        assert!(err.is_unauthorized());
    }

    #[test]
    fn missing_or_empty_detail_uses_fallback() {
        let err = ApiError::Status {
            status: 500,
            detail: None,
        };
        assert_eq!(err.user_message("Authentication failed"), "Authentication failed");

        let empty = ApiError::Status {
            status: 400,
            detail: Some(String::new()),
        };
        assert_eq!(empty.user_message("Authentication failed"), "Authentication failed");
    }

    #[test]
    fn network_error_has_fixed_copy() {
        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.user_message("whatever"), NETWORK_ERROR_MESSAGE);
        assert_eq!(err.status(), None);
    }
}
