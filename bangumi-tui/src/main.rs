//! bangumi TUI
//!
//! ## 架构
//!
//! 采用 Elm Architecture (TEA) 模式：
//! - **Model**: 应用状态 (`model/`)
//! - **Message**: 事件消息 (`message/`)
//! - **Update**: 状态更新 (`update/`)
//! - **View**: UI 渲染 (`view/`)
//! - **Event**: 输入处理 (`event/`)
//! - **Backend**: 业务服务 (`backend/`)
//!
//!
//! main.rs
//! bangumi TUI 的程序入口
//!
//! 其执行：
//! fn `main()` {
//!
//!     cli::run()                  // 解析命令行，读取配置，初始化文件日志
//!         ├─ (无子命令) / ui      // 终端界面
//!         └─ list / calendar / search / subject / auth
//!                                 // 一次性命令，结果打印到 stdout
//!
//! }
//!
//!
//! 终端界面的执行：
//!
//!     CoreService::new()          // 运行时、凭证、HTTP 网关
//!     CoreService::startup()      // 凭证 → 当前用户 → 并发加载五个列表与放送表
//!     App::from_startup()         // 注册页面，停在在看列表
//!     init_terminal()             // 进入原始模式与备用屏幕
//!     app::run()                  // 运行 app.rs 主循环
//!     restore_terminal()          // 无论成功与否，都恢复终端
//!
//!
//! 任何错误都会打印到 stderr，进程以非零状态退出。

mod app;
mod backend;
mod cli;
mod event;
mod message;
mod model;
mod update;
mod util;
mod view;

use anyhow::Result;

fn main() -> Result<()> {
    cli::run()
}
