//! bangumi 终端客户端的核心逻辑
//!
//! - `types`: 远端数据记录
//! - `traits`: 网关与凭证的平台抽象
//! - `services`: 各类资源的薄封装
//! - `session`: 分页列表、并发加载、编辑会话

pub mod error;
pub mod services;
pub mod session;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::ServiceContext;
pub use traits::{ApiGateway, CredentialProvider};
