//! API 网关抽象 Trait

use async_trait::async_trait;

use crate::error::CoreResult;

/// 远端 REST 接口网关
///
/// 以不透明的路径（含查询串，如 `/v0/subjects/1`）寻址，只区分成功与失败，
/// 成功时返回原始响应体。
///
/// 平台实现:
/// - TUI: `HttpGateway` (reqwest)
/// - 测试: `MockGateway`（记录调用）
#[async_trait]
pub trait ApiGateway: Send + Sync {
    /// GET 请求
    async fn get(&self, path: &str) -> CoreResult<Vec<u8>>;

    /// POST 请求（整体写入）
    ///
    /// # Arguments
    /// * `path` - 请求路径
    /// * `body` - JSON 请求体
    async fn post(&self, path: &str, body: Vec<u8>) -> CoreResult<Vec<u8>>;

    /// PATCH 请求（多 id 批量更新）
    async fn patch(&self, path: &str, body: Vec<u8>) -> CoreResult<Vec<u8>>;

    /// PUT 请求
    async fn put(&self, path: &str, body: Vec<u8>) -> CoreResult<Vec<u8>>;
}
