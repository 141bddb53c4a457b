//! 测试辅助模块
//!
//! 提供记录调用的 mock 网关和便捷的 JSON 构造方法。

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::traits::ApiGateway;

// ===== MockGateway =====

/// 一次被记录的调用
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub body: Vec<u8>,
}

struct Route {
    prefix: String,
    outcome: CoreResult<String>,
}

/// 按路径前缀（最长匹配）返回预设响应的网关
pub struct MockGateway {
    routes: Mutex<Vec<Route>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            routes: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn respond_prefix(&self, prefix: &str, body: &str) {
        self.add_route(prefix, Ok(body.to_string()));
    }

    pub fn fail_prefix(&self, prefix: &str, error: CoreError) {
        self.add_route(prefix, Err(error));
    }

    fn add_route(&self, prefix: &str, outcome: CoreResult<String>) {
        let mut routes = self.routes.lock().unwrap();
        routes.retain(|r| r.prefix != prefix);
        routes.push(Route {
            prefix: prefix.to_string(),
            outcome,
        });
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_with_method(&self, method: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == method)
            .collect()
    }

    async fn dispatch(&self, method: &'static str, path: &str, body: Vec<u8>) -> CoreResult<Vec<u8>> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            body,
        });

        let matched = {
            let routes = self.routes.lock().unwrap();
            routes
                .iter()
                .filter(|r| path.starts_with(&r.prefix))
                .max_by_key(|r| r.prefix.len())
                .map(|r| r.outcome.clone())
        };

        let Some(outcome) = matched else {
            return Err(CoreError::ApiError {
                status: 404,
                message: format!("no mock route for {method} {path}"),
            });
        };

        outcome.map(String::into_bytes)
    }
}

#[async_trait]
impl ApiGateway for MockGateway {
    async fn get(&self, path: &str) -> CoreResult<Vec<u8>> {
        self.dispatch("GET", path, Vec::new()).await
    }

    async fn post(&self, path: &str, body: Vec<u8>) -> CoreResult<Vec<u8>> {
        self.dispatch("POST", path, body).await
    }

    async fn patch(&self, path: &str, body: Vec<u8>) -> CoreResult<Vec<u8>> {
        self.dispatch("PATCH", path, body).await
    }

    async fn put(&self, path: &str, body: Vec<u8>) -> CoreResult<Vec<u8>> {
        self.dispatch("PUT", path, body).await
    }
}

// ===== 工厂方法 =====

pub fn test_context(gateway: &Arc<MockGateway>) -> Arc<ServiceContext> {
    Arc::new(ServiceContext::new(gateway.clone()))
}

/// 用户章节记录
pub fn episodes_json(ids: &[u32]) -> String {
    let data: Vec<String> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| {
            format!(
                r#"{{"episode": {{"id": {id}, "type": 0, "name": "E{}", "sort": {}}}, "type": 0}}"#,
                i + 1,
                i + 1
            )
        })
        .collect();
    format!(
        r#"{{"total": {}, "limit": 100, "offset": 0, "data": [{}]}}"#,
        ids.len(),
        data.join(",")
    )
}
