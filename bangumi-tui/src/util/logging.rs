//! 日志初始化
//!
//! 终端界面占用了 stdout，日志只能写文件。
//! 库中的 `log` 记录经 tracing-log 桥接进同一个订阅者。

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_NAME: &str = "bangumi-tui.log";

/// 日志文件位置：`<data_local_dir>/bangumi-tui/bangumi-tui.log`
pub fn log_file_path() -> PathBuf {
    dirs::data_local_dir()
        .or_else(dirs::config_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bangumi-tui")
        .join(LOG_FILE_NAME)
}

/// 构造过滤器：`RUST_LOG` 优先，否则使用配置中的级别
fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(default_level).unwrap_or_else(|_| EnvFilter::new("info"))
    })
}

/// 安装全局日志订阅者，返回日志文件路径
pub fn init_logging(level: &str) -> Result<PathBuf> {
    let path = log_file_path();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .with(build_filter(level))
        .try_init()
        .context("Failed to install log subscriber")?;

    tracing::info!("bangumi-tui {} starting", env!("CARGO_PKG_VERSION"));
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_name() {
        assert!(log_file_path().ends_with("bangumi-tui/bangumi-tui.log"));
    }

    #[test]
    fn test_bad_level_falls_back() {
        // 无法解析的级别不应导致初始化失败
        let filter = build_filter("[[not a directive");
        assert!(!filter.to_string().is_empty());
    }
}
