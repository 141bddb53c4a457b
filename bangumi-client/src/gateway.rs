//! reqwest 实现的 API 网关

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bangumi_core::traits::{ApiGateway, CredentialProvider};
use bangumi_core::{CoreError, CoreResult};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};

use crate::http_client::HttpUtils;

/// 网关配置
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// API 根地址，如 `https://api.bgm.tv`
    pub base_url: String,
    /// bangumi 要求每个客户端带上可识别的 User-Agent
    pub user_agent: String,
    /// 单个请求的超时
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.bgm.tv".to_string(),
            user_agent: concat!("bangumi-tui/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

/// 基于 reqwest 的网关
///
/// 所有请求共用一个连接池，并向凭证提供者取同一个令牌。
pub struct HttpGateway {
    client: Client,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl HttpGateway {
    /// 创建网关
    pub fn new(config: &GatewayConfig, credentials: Arc<dyn CredentialProvider>) -> CoreResult<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(|e| CoreError::NetworkError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// 拼接完整 URL
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    async fn headers(&self, with_body: bool) -> CoreResult<HeaderMap> {
        let token = self.credentials.get_valid_token().await?;
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| CoreError::CredentialError(format!("Invalid access token: {e}")))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if with_body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        Ok(headers)
    }

    async fn send(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> CoreResult<Vec<u8>> {
        let headers = self.headers(body.is_some()).await?;
        let mut builder = self
            .client
            .request(method.clone(), self.url(path))
            .headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        HttpUtils::execute_request(builder, method.as_str(), path).await
    }
}

#[async_trait]
impl ApiGateway for HttpGateway {
    async fn get(&self, path: &str) -> CoreResult<Vec<u8>> {
        self.send(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: Vec<u8>) -> CoreResult<Vec<u8>> {
        self.send(Method::POST, path, Some(body)).await
    }

    async fn patch(&self, path: &str, body: Vec<u8>) -> CoreResult<Vec<u8>> {
        self.send(Method::PATCH, path, Some(body)).await
    }

    async fn put(&self, path: &str, body: Vec<u8>) -> CoreResult<Vec<u8>> {
        self.send(Method::PUT, path, Some(body)).await
    }
}
