//!
//! src/event/mod.rs
//! Event 层：事件处理
//!
//! 负责将键盘输入事件转换为 Message。
//!
//!
//! 有模块结构：
//!     src/event/mod.rs
//!         mod handler;        // 事件处理器
//!         mod keymap;         // 快捷键映射
//!
//!         pub use handler::{handle_event, poll_event};
//!
//!
//!     其中有：
//!         · poll_event      事件轮询，受 ~/app.rs 调用
//!
//!         pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
//!             if event::poll(timeout)? {                  // 此处阻塞以等待事件，最长等待 timeout
//!                 Ok(Some(event::read()?))
//!             } else {
//!                 Ok(None)
//!             }
//!         }
//!
//!
//!         · handle_event    事件分发
//!
//!             当接收到键盘事件时，按以下顺序判断：
//!                 1. 非 Press 事件                    → Noop
//!                 2. 编辑弹窗打开                      → handle_modal_keys
//!                 3. Ctrl+C                           → Quit
//!                 4. 当前页面的输入框持有焦点           → 交给页面（全局快捷键让位）
//!                 5. 全局快捷键                        → Q / q / Esc / 1-7 / ? / R
//!                 6. 其余                              → 交给当前页面 Page::handle_key
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 页面按键
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     每个页面的 Page::handle_key 转发到这里的函数：
//!         - collection_keys()     收藏列表：列表键 + h/l + e + n
//!         - list_keys()           放送表：j/k/g/G/PgUp/PgDn/Enter
//!         - scroll_keys()         条目详情、帮助：滚动 + e
//!         - search_keys()         搜索：输入框与结果表
//!
//!     页面只产生消息，不修改任何状态。
//!

mod handler;
mod keymap;

pub use handler::{collection_keys, handle_event, list_keys, poll_event, scroll_keys, search_keys};
