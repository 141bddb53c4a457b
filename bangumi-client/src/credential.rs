//! 访问令牌提供者
//!
//! 依次尝试系统钥匙串与本地凭证文件，读到的令牌缓存在内存中。
//! 并发请求共享一次读取：缓存锁在加载期间保持占用。

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bangumi_core::traits::CredentialProvider;
use bangumi_core::{CoreError, CoreResult};
use keyring::Entry;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;

const SERVICE_NAME: &str = "bangumi-tui";
const CREDENTIAL_KEY: &str = "credential";

/// 默认凭证文件位置：`<config_dir>/bangumi-tui/credential.json`
pub fn default_credential_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(SERVICE_NAME)
        .join("credential.json")
}

/// OAuth 授权后保存的凭证
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredCredential {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub user_id: u32,
    #[serde(default)]
    pub scope: Option<String>,
}

impl StoredCredential {
    /// 解析凭证 JSON；令牌为空视为无效
    pub fn parse(json: &str) -> CoreResult<Self> {
        let credential: Self = serde_json::from_str(json)
            .map_err(|e| CoreError::CredentialError(format!("Failed to deserialize: {e}")))?;
        if credential.access_token.trim().is_empty() {
            return Err(CoreError::CredentialError(
                "access_token is empty".to_string(),
            ));
        }
        Ok(credential)
    }
}

/// 本地凭证提供者
pub struct LocalCredentialProvider {
    /// 凭证文件路径
    path: PathBuf,
    /// 是否查询系统钥匙串
    use_keyring: bool,
    /// 已读取的令牌
    cache: Mutex<Option<String>>,
}

impl LocalCredentialProvider {
    /// 钥匙串优先，默认凭证文件兜底
    pub fn new() -> Self {
        Self {
            path: default_credential_path(),
            use_keyring: true,
            cache: Mutex::new(None),
        }
    }

    /// 只从指定文件读取
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            use_keyring: false,
            cache: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 清空缓存，下次请求重新读取
    pub async fn invalidate(&self) {
        *self.cache.lock().await = None;
    }

    /// 删除钥匙串条目与凭证文件，返回是否删除了任何东西
    pub async fn clear(&self) -> CoreResult<bool> {
        let mut removed = false;
        if self.use_keyring {
            removed |= tokio::task::spawn_blocking(Self::delete_keyring_sync)
                .await
                .map_err(|e| CoreError::CredentialError(format!("Keychain task failed: {e}")))??;
        }
        if self.path.exists() {
            fs::remove_file(&self.path)
                .await
                .map_err(|e| CoreError::StorageError(format!("{}: {e}", self.path.display())))?;
            log::info!("Removed credential file {}", self.path.display());
            removed = true;
        }
        self.invalidate().await;
        Ok(removed)
    }

    fn delete_keyring_sync() -> CoreResult<bool> {
        let entry = Entry::new(SERVICE_NAME, CREDENTIAL_KEY)
            .map_err(|e| CoreError::CredentialError(format!("Failed to create entry: {e}")))?;
        match entry.delete_credential() {
            Ok(()) => {
                log::info!("Removed credential from keychain");
                Ok(true)
            }
            Err(keyring::Error::NoEntry) => Ok(false),
            Err(e) => Err(CoreError::CredentialError(format!("Failed to delete: {e}"))),
        }
    }

    fn read_keyring_sync() -> CoreResult<Option<String>> {
        let entry = Entry::new(SERVICE_NAME, CREDENTIAL_KEY)
            .map_err(|e| CoreError::CredentialError(format!("Failed to create entry: {e}")))?;
        match entry.get_password() {
            Ok(json) => Ok(Some(json)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(CoreError::CredentialError(format!("Failed to load: {e}"))),
        }
    }

    async fn load_from_keyring(&self) -> Option<StoredCredential> {
        if !self.use_keyring {
            return None;
        }
        let raw = tokio::task::spawn_blocking(Self::read_keyring_sync).await;
        match raw {
            Ok(Ok(Some(json))) => match StoredCredential::parse(&json) {
                Ok(credential) => Some(credential),
                Err(e) => {
                    log::warn!("Ignoring keychain credential: {e}");
                    None
                }
            },
            Ok(Ok(None)) => None,
            Ok(Err(e)) => {
                log::warn!("Keychain unavailable: {e}");
                None
            }
            Err(e) => {
                log::warn!("Keychain task failed: {e}");
                None
            }
        }
    }

    async fn load_from_file(&self) -> CoreResult<StoredCredential> {
        if !self.path.exists() {
            return Err(CoreError::CredentialError(format!(
                "No credential found, expected {}",
                self.path.display()
            )));
        }
        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| CoreError::StorageError(format!("{}: {e}", self.path.display())))?;
        StoredCredential::parse(&content)
    }

    async fn load(&self) -> CoreResult<StoredCredential> {
        if let Some(credential) = self.load_from_keyring().await {
            log::debug!("Loaded credential from keychain");
            return Ok(credential);
        }
        let credential = self.load_from_file().await?;
        log::debug!("Loaded credential from {}", self.path.display());
        Ok(credential)
    }
}

impl Default for LocalCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialProvider for LocalCredentialProvider {
    async fn get_valid_token(&self) -> CoreResult<String> {
        let mut cache = self.cache.lock().await;
        if let Some(token) = cache.as_ref() {
            return Ok(token.clone());
        }

        let credential = self.load().await?;
        log::info!("Credential loaded for user {}", credential.user_id);
        *cache = Some(credential.access_token.clone());
        Ok(credential.access_token)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn write_credential(dir: &tempfile::TempDir, json: &str) -> PathBuf {
        let path = dir.path().join("credential.json");
        std::fs::write(&path, json).unwrap();
        path
    }

    #[tokio::test]
    async fn test_reads_token_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_credential(
            &dir,
            r#"{"access_token": "abc", "expires_in": 604800, "token_type": "Bearer", "user_id": 7}"#,
        );
        let provider = LocalCredentialProvider::from_file(path);
        assert_eq!(provider.get_valid_token().await.unwrap(), "abc");
    }

    #[tokio::test]
    async fn test_missing_file_is_credential_error() {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalCredentialProvider::from_file(dir.path().join("none.json"));
        let err = provider.get_valid_token().await.unwrap_err();
        assert!(matches!(err, CoreError::CredentialError(_)));
    }

    #[tokio::test]
    async fn test_empty_token_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_credential(&dir, r#"{"access_token": "  "}"#);
        let provider = LocalCredentialProvider::from_file(path);
        assert!(provider.get_valid_token().await.is_err());
    }

    #[tokio::test]
    async fn test_token_cached_until_invalidated() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_credential(&dir, r#"{"access_token": "first"}"#);
        let provider = Arc::new(LocalCredentialProvider::from_file(path.clone()));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let provider = provider.clone();
                tokio::spawn(async move { provider.get_valid_token().await })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), "first");
        }

        std::fs::write(&path, r#"{"access_token": "second"}"#).unwrap();
        assert_eq!(provider.get_valid_token().await.unwrap(), "first");
        provider.invalidate().await;
        assert_eq!(provider.get_valid_token().await.unwrap(), "second");
    }

    #[tokio::test]
    async fn test_clear_removes_file_and_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_credential(&dir, r#"{"access_token": "abc"}"#);
        let provider = LocalCredentialProvider::from_file(path.clone());
        assert_eq!(provider.get_valid_token().await.unwrap(), "abc");

        assert!(provider.clear().await.unwrap());
        assert!(!path.exists());
        assert!(matches!(
            provider.get_valid_token().await.unwrap_err(),
            CoreError::CredentialError(_)
        ));

        // 已经没有凭证时不报错
        assert!(!provider.clear().await.unwrap());
    }
}
