//!
//! app.rs
//! 应用主循环
//!
//!
//!
//! 在应用启动时，main.rs 用启动数据创建以下状态：
//!
//! App {
//!
//!     navigator: Navigator {                          // 五个收藏列表、放送表、帮助已注册
//!         current: Some("watching"),                  // 停在在看列表
//!         history: [],
//!     },
//!     notification: NotificationChannel,             // 放送表加载失败时带一条警告
//!     modal: ModalState { active: None },
//!     pending: None,                                  // 等待执行的后端操作
//!
//! }
//!
//!
//! 主循环大约每 100 ms 执行一次（取决于有无事件）
//! 应用的主循环中有：
//! loop {
//!
//!     terminal.draw(|f| view::render(&app , f))       // 渲染 UI（包括 Loading 状态）
//!     if app.should_quit() { break }                  // 检查 APP 是否应该退出
//!     if let Some(cmd) = app.pending.take() {         // 上一次更新安排了后端操作
//!         update::execute(&mut app , &backend , cmd)      // 阻塞执行，结果落地后回到循环顶部重绘
//!         continue
//!     }
//!     if let Some(event) = poll_event() {             // 轮询获取输入，在此等待 100ms
//!         app.notification.clear()                        // 按键清除上一条通知
//!         let msg = handle_event(event , &app);           // 接收原始事件并分发消息
//!         update::update(&mut app , msg)                  // 更新终端状态
//!     }
//! }

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, KeyEventKind};
use ratatui::layout::Rect;

use crate::backend::CoreService;
use crate::event;
use crate::model::App;
use crate::update;
use crate::util::Term;
use crate::view;

/// 运行应用主循环
pub fn run(terminal: &mut Term, app: &mut App, backend: &CoreService) -> Result<()> {
    loop {
        // 1. 渲染 UI
        let frame = terminal.draw(|frame| {
            view::render(app, frame);
        })?;
        app.viewport = frame.area;

        // 2. 检查是否应该退出
        if app.should_quit() {
            break;
        }

        // 3. 执行上一次更新安排的后端操作（此时 Loading 状态已经画出）
        if let Some(command) = app.pending.take() {
            update::execute(app, backend, command);
            continue;
        }

        // 4. 轮询事件（100ms 超时）
        if let Some(event) = event::poll_event(Duration::from_millis(100))? {
            if is_key_press(&event) {
                app.notification.clear();
            }
            if let Event::Resize(width, height) = event {
                app.viewport = Rect::new(0, 0, width, height);
            }

            // 5. 处理事件，获取消息
            let msg = event::handle_event(event, app);

            // 6. 更新状态
            update::update(app, msg);
        }
    }

    Ok(())
}

fn is_key_press(event: &Event) -> bool {
    matches!(event, Event::Key(key) if key.kind == KeyEventKind::Press)
}
