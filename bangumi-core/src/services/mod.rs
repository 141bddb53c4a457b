//! 服务层
//!
//! 每个服务是对一类远端资源的薄封装：拼路径、编码请求体、解码响应。

mod calendar_service;
mod collection_service;
mod search_service;
mod subject_service;
mod user_service;

pub use calendar_service::CalendarService;
pub use collection_service::{CollectionService, ProgressSync};
pub use search_service::SearchService;
pub use subject_service::SubjectService;
pub use user_service::UserService;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::traits::ApiGateway;

/// 服务上下文 - 持有所有依赖
///
/// 平台层需要创建此上下文，并注入平台特定的网关实现。
pub struct ServiceContext {
    /// API 网关
    pub gateway: Arc<dyn ApiGateway>,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(gateway: Arc<dyn ApiGateway>) -> Self {
        Self { gateway }
    }

    /// GET 并解码 JSON
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> CoreResult<T> {
        let bytes = self.gateway.get(path).await?;
        decode(&bytes, path)
    }

    /// POST JSON 请求体，返回原始响应
    pub(crate) async fn post_json<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> CoreResult<Vec<u8>> {
        let body = serde_json::to_vec(body)?;
        self.gateway.post(path, body).await
    }

    /// PATCH JSON 请求体
    pub(crate) async fn patch_json<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> CoreResult<Vec<u8>> {
        let body = serde_json::to_vec(body)?;
        self.gateway.patch(path, body).await
    }
}

/// 解码 JSON 响应，失败时记录路径
pub(crate) fn decode<T: DeserializeOwned>(bytes: &[u8], path: &str) -> CoreResult<T> {
    serde_json::from_slice(bytes).map_err(|e| {
        log::error!("JSON parse failed for {path}: {e}");
        CoreError::SerializationError(format!("{path}: {e}"))
    })
}

/// 校验分页参数
pub(crate) fn check_limit(limit: u32) -> CoreResult<()> {
    if limit == 0 {
        return Err(CoreError::ValidationError(
            "limit must be greater than 0".to_string(),
        ));
    }
    Ok(())
}
