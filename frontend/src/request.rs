use ems_shared::protocol::HttpMethod;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    #[cfg(test)]
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// HTTP 客户端特性 (Trait)
/// (?Send) 是因为浏览器环境下 fetch 的 Future 不是 Send 的
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    /// 只有请求未到达服务端时才返回错误；非 2xx 由调用方处理
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, ApiError>;
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
enum MockReply {
    Respond(u16, String),
    NetworkError,
}

#[cfg(test)]
pub struct MockHttpClient {
    // (Method, URL) -> 回复
    replies: RefCell<HashMap<(String, String), MockReply>>,
    // 记录发出的请求
    pub requests: RefCell<Vec<HttpRequest>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            replies: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn key(method: HttpMethod, url: &str) -> (String, String) {
        (method.as_str().to_string(), url.to_string())
    }

    pub fn mock_response(&self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) {
        self.replies
            .borrow_mut()
            .insert(Self::key(method, url), MockReply::Respond(status, body.to_string()));
    }

    pub fn mock_raw(&self, method: HttpMethod, url: &str, status: u16, body: &str) {
        self.replies
            .borrow_mut()
            .insert(Self::key(method, url), MockReply::Respond(status, body.to_string()));
    }

    pub fn mock_network_error(&self, method: HttpMethod, url: &str) {
        self.replies
            .borrow_mut()
            .insert(Self::key(method, url), MockReply::NetworkError);
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.borrow_mut().push(req.clone());

        let replies = self.replies.borrow();
        match replies.get(&Self::key(req.method, &req.url)) {
            Some(MockReply::Respond(status, body)) => Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            }),
            Some(MockReply::NetworkError) => Err(ApiError::Network("mock: connection refused".to_string())),
            None => Ok(HttpResponse {
                status: 404,
                body: r#"{"detail":"Not Found"}"#.to_string(),
            }),
        }
    }
}
