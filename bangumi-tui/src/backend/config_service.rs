//! 配置服务

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// 应用配置
///
/// 所有字段都有默认值，配置文件只需写出要覆盖的部分。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// API 根地址
    pub api_base_url: String,
    /// 收藏列表每页条数
    pub page_size: u32,
    /// 单个 HTTP 请求超时（秒）
    pub request_timeout_secs: u64,
    /// 并发加载中单个请求的时间上限（秒）
    pub fetch_timeout_secs: u64,
    /// 条目页读取的章节数上限
    pub episode_limit: u32,
    /// 默认日志级别（`RUST_LOG` 优先）
    pub log_level: String,
    pub user_agent: String,
    /// 配色：`dark` 或 `light`
    pub theme: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.bgm.tv".to_string(),
            page_size: 20,
            request_timeout_secs: 15,
            fetch_timeout_secs: 20,
            episode_limit: 100,
            log_level: "info".to_string(),
            user_agent: format!("bangumi-tui/{}", env!("CARGO_PKG_VERSION")),
            theme: "dark".to_string(),
        }
    }
}

impl AppConfig {
    /// 校验取值范围
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            bail!("page_size must be greater than 0");
        }
        if self.episode_limit == 0 {
            bail!("episode_limit must be greater than 0");
        }
        if self.api_base_url.trim().is_empty() {
            bail!("api_base_url must not be empty");
        }
        if !matches!(self.theme.as_str(), "dark" | "light") {
            bail!("theme must be \"dark\" or \"light\", got {:?}", self.theme);
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// 配置服务 trait
pub trait ConfigService: Send + Sync {
    /// 加载配置
    fn load(&self) -> Result<AppConfig>;

    /// 保存配置
    fn save(&self, config: &AppConfig) -> Result<()>;
}

/// 获取配置文件路径
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bangumi-tui")
        .join("config.json")
}

/// 本地配置服务（JSON 文件）
pub struct LocalConfigService {
    path: PathBuf,
}

impl LocalConfigService {
    pub fn new() -> Self {
        Self::with_path(default_config_path())
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for LocalConfigService {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigService for LocalConfigService {
    fn load(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Malformed config file {}", self.path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn save(&self, config: &AppConfig) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}
