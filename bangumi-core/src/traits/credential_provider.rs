//! 凭证提供者抽象 Trait

use async_trait::async_trait;

use crate::error::CoreResult;

/// 访问令牌提供者
///
/// 所有并发请求共享同一个令牌。实现必须可以被并发调用；
/// 读取或刷新令牌需要在实现内部做单飞（single-flight）保护。
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// 获取当前有效的 Bearer 令牌
    async fn get_valid_token(&self) -> CoreResult<String>;
}
