//! bangumi API 的平台实现
//!
//! - [`HttpGateway`]: 基于 reqwest 的 `ApiGateway`
//! - [`LocalCredentialProvider`]: 系统钥匙串 / 本地文件中的访问令牌

mod credential;
mod gateway;
mod http_client;
mod log_sanitizer;

pub use credential::{default_credential_path, LocalCredentialProvider, StoredCredential};
pub use gateway::{GatewayConfig, HttpGateway};
pub use http_client::HttpUtils;
