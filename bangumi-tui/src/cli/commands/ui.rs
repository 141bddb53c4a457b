//! 终端界面
//!
//! 启动阶段（进入备用屏幕之前）的任何错误都会打印到 stderr，进程以非零状态退出：
//!     · 没有可用的凭证
//!     · 读取当前用户失败
//!     · 任意一个收藏列表加载失败
//!
//! 放送表加载失败不影响启动，只在状态栏显示一条警告。

use anyhow::Result;

use crate::app;
use crate::backend::{AppConfig, ConfigService, CoreService, LocalConfigService};
use crate::model;
use crate::util::{init_terminal, restore_terminal};
use crate::view::theme::{set_theme, Theme};

pub fn run(config_service: &LocalConfigService, config: &AppConfig) -> Result<()> {
    // 第一次运行时写出默认配置，方便用户修改
    if !config_service.path().exists() {
        match config_service.save(config) {
            Ok(()) => log::info!("Wrote default config to {}", config_service.path().display()),
            Err(e) => log::warn!("Failed to write default config: {e:#}"),
        }
    }
    set_theme(Theme::from_name(&config.theme));

    // 1. 启动加载（失败时直接退出，终端尚未切换）
    let backend = CoreService::new(config)?;
    let data = backend.startup().inspect_err(|e| log::error!("Startup failed: {e:#}"))?;

    // 2. 创建应用实例
    let mut app = model::App::from_startup(data, backend.page_size());

    // 3. 初始化终端
    let mut terminal = init_terminal()?;

    // 4. 运行主循环
    let result = app::run(&mut terminal, &mut app, &backend);

    // 5. 恢复终端（无论成功失败都执行）
    restore_terminal(&mut terminal)?;

    log::info!("Exiting");
    result
}
