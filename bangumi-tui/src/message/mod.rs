//!
//! src/message/mod.rs
//! Message 层：事件消息定义
//!
//! 作为 Event → Update 之间的桥梁
//! 所有的用户操作都先被翻译成 Message，Update 层根据 Message 来更新 Model。
//!
//!
//! 有模块结构：
//!     src/message/mod.rs
//!         mod app;            // AppMessage：主消息
//!         mod navigation;     // 页面跳转
//!         mod content;        // 当前页面内的操作
//!         mod modal;          // 编辑弹窗内的操作
//!         mod command;        // Update 留给主循环执行的后端操作
//!
//!
//!     在 app::AppMessage 中进行主消息的枚举：
//!
//!         pub enum AppMessage {
//!             Quit,                               // 退出应用
//!             Navigation(NavigationMessage),      // 跳转子消息
//!             Content(ContentMessage),            // 页面内容子消息
//!             Modal(ModalMessage),                // 弹窗子消息
//!             GoBack,                             // 返回上一页
//!             Refresh,                            // 刷新当前页面
//!             ShowHelp,                           // 显示帮助页
//!             Noop,                               // 无操作
//!         }
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! Message 与 Command
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     Message 描述"用户做了什么"，Update 处理后立刻返回，不做网络请求。
//!     需要网络的操作被记成 Command 放进 App.pending：
//!
//!         按 n ──▶ ContentMessage::LoadMore
//!                     ──▶ update: 页面进入 LoadingMore，pending = Command::LoadNextPage
//!                         ──▶ 主循环重绘（显示 Loading...）后执行 Command
//!                             ──▶ 结果落地，页面回到 Ready
//!

mod app;
mod command;
mod content;
mod modal;
mod navigation;

pub use app::AppMessage;
pub use command::Command;
pub use content::ContentMessage;
pub use modal::ModalMessage;
pub use navigation::NavigationMessage;
