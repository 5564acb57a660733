//! 运行时配置
//!
//! API 基地址在编译期通过 `EMS_API_BASE` 注入，缺省为同源（空字符串），
//! 即直接请求 `/api/...`。

/// 缺省 API 基地址：同源
const DEFAULT_API_BASE: &str = "";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    api_base: String,
}

impl AppConfig {
    /// 读取编译期环境变量，未设置时使用缺省值
    pub fn from_env() -> Self {
        Self::with_base(option_env!("EMS_API_BASE").unwrap_or(DEFAULT_API_BASE))
    }

    pub fn with_base(base: &str) -> Self {
        let api_base = base.trim().trim_end_matches('/').to_string();
        Self { api_base }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// 拼接完整 URL
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.api_base, path)
        } else {
            format!("{}/{}", self.api_base, path)
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::with_base(DEFAULT_API_BASE)
    }
}
