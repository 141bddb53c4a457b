//! 共享测试工具和辅助函数

#![allow(dead_code, clippy::unwrap_used)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bangumi_core::error::{CoreError, CoreResult};
use bangumi_core::services::{CollectionService, ServiceContext};
use bangumi_core::traits::ApiGateway;

/// 按查询串中的 offset / limit 切片返回收藏列表的网关
///
/// 条目 id 为 `1..=total`，顺序稳定。
pub struct PagedCollectionGateway {
    total: u32,
    requests: Mutex<Vec<String>>,
    fail_next: AtomicUsize,
}

impl PagedCollectionGateway {
    pub fn new(total: u32) -> Self {
        Self {
            total,
            requests: Mutex::new(Vec::new()),
            fail_next: AtomicUsize::new(0),
        }
    }

    /// 接下来的 n 次请求返回网络错误
    pub fn fail_next(&self, n: usize) {
        self.fail_next.store(n, Ordering::SeqCst);
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn page(&self, path: &str) -> String {
        let offset = query_param(path, "offset");
        let limit = query_param(path, "limit");
        let end = (offset + limit).min(self.total);
        let data: Vec<String> = (offset..end)
            .map(|i| {
                let id = i + 1;
                format!(
                    r#"{{"subject_id": {id}, "type": 3, "subject": {{"id": {id}, "name": "S{id}"}}}}"#
                )
            })
            .collect();
        format!(
            r#"{{"total": {}, "limit": {limit}, "offset": {offset}, "data": [{}]}}"#,
            self.total,
            data.join(",")
        )
    }
}

fn query_param(path: &str, key: &str) -> u32 {
    path.split(['?', '&'])
        .find_map(|kv| kv.strip_prefix(&format!("{key}=")))
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

#[async_trait]
impl ApiGateway for PagedCollectionGateway {
    async fn get(&self, path: &str) -> CoreResult<Vec<u8>> {
        self.requests.lock().unwrap().push(path.to_string());
        if self
            .fail_next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(CoreError::NetworkError("connection reset".to_string()));
        }
        Ok(self.page(path).into_bytes())
    }

    async fn post(&self, path: &str, _body: Vec<u8>) -> CoreResult<Vec<u8>> {
        Err(CoreError::ApiError {
            status: 405,
            message: format!("unexpected POST {path}"),
        })
    }

    async fn patch(&self, path: &str, _body: Vec<u8>) -> CoreResult<Vec<u8>> {
        Err(CoreError::ApiError {
            status: 405,
            message: format!("unexpected PATCH {path}"),
        })
    }

    async fn put(&self, path: &str, _body: Vec<u8>) -> CoreResult<Vec<u8>> {
        Err(CoreError::ApiError {
            status: 405,
            message: format!("unexpected PUT {path}"),
        })
    }
}

pub fn collection_service(gateway: &Arc<PagedCollectionGateway>) -> CollectionService {
    CollectionService::new(Arc::new(ServiceContext::new(gateway.clone())))
}
