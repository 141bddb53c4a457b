//!
//! src/backend/mod.rs
//! Backend 层：业务服务
//!
//! Backend 层与 UI 完全解耦，只通过 bangumi-core / bangumi-client 访问网络。
//!
//!
//! 有模块结构：
//!     src/backend/mod.rs
//!         mod config_service;     // 配置文件（JSON）
//!         mod core_service;       // 核心服务入口
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 一、配置服务（ConfigService）
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     配置文件位于 `<config_dir>/bangumi-tui/config.json`：
//!         · 文件不存在          → 使用默认值，并写出一份默认配置
//!         · 格式错误或取值非法   → 启动失败
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 二、核心服务（CoreService）
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     创建流程：
//!         1. 创建多线程 tokio 运行时
//!         2. 创建 LocalCredentialProvider（keyring，回退到 credential.json）
//!         3. 创建 HttpGateway，包装为 ServiceContext
//!
//!     界面线程是同步的，每个方法内部 `block_on`：
//!
//!         startup()          凭证 → /v0/me → 五个列表 + 放送表并发加载
//!         load_subject(id)   条目 + 收藏 + 章节并发加载
//!         load_next_page()   列表翻页
//!         commit(session)    提交编辑会话
//!
//!     命令行子命令另外用到：
//!
//!         whoami()           验证凭证并读取当前用户
//!         load_entry(id)     读取收藏，未收藏时合成默认记录
//!         logout()           删除钥匙串条目与凭证文件
//!

mod config_service;
mod core_service;

pub use config_service::{AppConfig, ConfigService, LocalConfigService};
pub use core_service::{CoreService, StartupData};
