//!
//! src/model/mod.rs
//! Model 层：应用状态
//!
//! Model 层只保存数据，不做 IO。Update 层修改它，View 层读取它。
//!
//!
//! 有模块结构：
//!     src/model/mod.rs
//!         mod app;            // App：整个界面的状态根
//!         mod navigator;      // 页面注册表 + 历史栈
//!         mod notification;   // 单槽位状态栏通知
//!         mod page;           // Page trait 与 PageKind
//!         pub mod state;      // 各页面与编辑弹窗的状态
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 页面与导航
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     App {
//!         navigator: Navigator {
//!             pages: {
//!                 "watching" | "wish" | "done" | "stashed" | "dropped"
//!                                         => PageKind::Collection(..)   // 启动时创建
//!                 "calendar"              => PageKind::Calendar(..)     // 启动时创建
//!                 "help"                  => PageKind::Help(..)         // 启动时创建
//!                 "search"                => PageKind::Search(..)       // 第一次按 7 时创建
//!                 "subject"               => PageKind::Subject(..)      // 每次打开条目时替换
//!             },
//!             current: Some("watching"),
//!             history: [],                    // 栈顶永远不是当前页面
//!         },
//!         notification,                       // 下一次按键时清除
//!         modal: ModalState { active: None }, // 编辑弹窗
//!         pending: None,                      // 等待主循环执行的后端操作
//!     }
//!
//!     历史栈只记录"需要返回"的页面：
//!         · 从列表打开条目详情：来源页入栈
//!         · 离开条目详情去别的顶层页面：详情页入栈
//!         · 顶层页面之间切换：不入栈
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 页面阶段
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     Loading ──▶ Ready ──▶ LoadingMore ──▶ Ready
//!                   │
//!                   └────▶ Editing ──(保存成功/取消)──▶ Ready
//!
//!     只有 Ready 时允许翻页、刷新、打开编辑与跳转详情。
//!

mod app;
mod navigator;
mod notification;
mod page;
pub mod state;

pub use app::App;
pub use navigator::Navigator;
pub use notification::{Notification, NotificationChannel, NotificationLevel};
pub use page::{Page, PageKind, PagePhase, CALENDAR_PAGE, HELP_PAGE, SEARCH_PAGE, SUBJECT_PAGE};
