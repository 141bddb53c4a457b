//!
//! src/view/mod.rs
//! View 层：UI 渲染
//!
//! View 层只读取 Model，不修改任何状态。
//!
//!
//! 有模块结构：
//!     src/view/mod.rs
//!         pub mod layout;         // 主布局：标签栏 + 内容区 + 状态栏
//!         pub mod theme;          // 全局配色
//!         mod components;         // 标签栏、状态栏、编辑弹窗
//!         pub mod pages;          // 各页面的内容区渲染
//!
//!
//!     ┌──────────────────────────────────────────────────────────────┐
//!     │ 1 Watching (12)  2 Wish (3)  ...  6 Calendar  7 Search   user│  标签栏
//!     ├─ Watching (12/12) ───────────────────────────────────────────┤
//!     │                                                              │
//!     │                 Page::render(frame, inner)                   │  内容区
//!     │                                                              │
//!     ├──────────────────────────────────────────────────────────────┤
//!     │ j/k Select │ Enter Open │ e Edit │ ... │ 通知                 │  状态栏
//!     └──────────────────────────────────────────────────────────────┘
//!
//!     编辑弹窗打开时叠加在最上层。
//!

mod components;
pub mod layout;
pub mod pages;
pub mod theme;

use ratatui::Frame;

use crate::model::App;

/// 渲染整个界面
pub fn render(app: &App, frame: &mut Frame) {
    layout::render(app, frame);
}
