//! 浏览器 HTTP 客户端
//!
//! 基于 `gloo-net` 的 fetch 封装，实现 `HttpClient` 特性。

use async_trait::async_trait;
use ems_shared::protocol::HttpMethod;
use gloo_net::http::{Request, RequestBuilder};

use crate::error::ApiError;
use crate::request::{HttpClient, HttpRequest, HttpResponse};

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

impl FetchHttpClient {
    fn builder(req: &HttpRequest) -> RequestBuilder {
        let builder = match req.method {
            HttpMethod::Get => Request::get(&req.url),
            HttpMethod::Post => Request::post(&req.url),
            HttpMethod::Put => Request::put(&req.url),
            HttpMethod::Delete => Request::delete(&req.url),
        };

        req.headers
            .iter()
            .fold(builder, |b, (key, value)| b.header(key, value))
    }
}

#[async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let builder = Self::builder(&req);

        let response = match req.body {
            Some(body) => builder
                .body(body)
                .map_err(|e| ApiError::Encode(e.to_string()))?
                .send()
                .await,
            None => builder.send().await,
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        // 读取失败时按空响应体处理，由调用方根据状态码决定
        let body = response.text().await.unwrap_or_default();

        Ok(HttpResponse { status, body })
    }
}
