//! 平台抽象 Trait 定义
//!
//! 核心层只依赖这些 trait，HTTP 客户端与凭证存储由平台层注入。

mod api_gateway;
mod credential_provider;

pub use api_gateway::ApiGateway;
pub use credential_provider::CredentialProvider;
