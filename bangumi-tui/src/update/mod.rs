//！┌─────────────────────────────────────────────────────────────────────────────┐
//！│                              主循环 (app.rs)                               │
//！│                                                                            │
//！│  ┌────────────────────────────── UI 层 ───────────────────────────────┐   │
//！│  │                                                                     │   │
//！│  │   ┌─────────┐          ┌───────────┐          ┌──────────┐         │   │
//！│  │   │  Event  │ ───────▶ │  Message  │ ───────▶ │  Update  │         │   │
//！│  │   │   层    │   翻译    │    层     │   消费    │    层    │         │   │
//！│  │   └─────────┘          │           │          └────┬─────┘         │   │
//！│  │        ▲               │ AppMessage│               │ 修改          │   │
//！│  │        │               │ ModalMsg  │               ▼               │   │
//！│  │   ┌─────────┐          │ ContentMsg│          ┌──────────┐         │   │
//！│  │   │  View   │          │ NavMsg    │   ┌───── │  Model   │         │   │
//！│  │   │   层    │          └───────────┘   │      │    层    │         │   │
//！│  │   └────┬────┘ ◀──────── 读取 ──────────┘      └────┬─────┘         │   │
//！│  │        │                                           │ Command       │   │
//！│  └────────│───────────────────────────────────────────│───────────────┘   │
//！│           │                                           │ block_on          │
//！│           ▼                                           ▼                   │
//！│      ┌─────────┐                                ┌──────────┐              │
//！│      │  终端   │                                │ Backend  │              │
//！│      │ (Util)  │                                │    层    │              │
//！│      └─────────┘                                └────┬─────┘              │
//！│                                                      │                    │
//！│                                                      ▼                    │
//！│                                           ┌───────────────────┐           │
//！│                                           │   bangumi-core    │           │
//！│                                           └───────────────────┘           │
//！└─────────────────────────────────────────────────────────────────────────────┘


//!
//! src/update/mod.rs
//! Update 层：状态更新逻辑
//!
//! Update 层负责处理 Message，更新 Model 状态。
//! 是唯一可以修改 Model 的地方。
//!
//!
//! 有模块结构：
//!     src/update/mod.rs
//!         mod navigation;         // 页面跳转
//!         mod content;            // 当前页面内的操作
//!         mod modal;              // 编辑弹窗
//!         mod command;            // 执行后端操作并落地结果
//!
//!         pub fn update(app: &mut App, msg: AppMessage) {...}
//!         pub fn execute(app: &mut App, backend: &CoreService, command: Command) {...}
//!
//!
//!     update() 只修改内存中的状态，需要网络时调用 app.schedule(Command::...)，
//!     并把页面切到 Loading / LoadingMore，随后立即返回。
//!
//!     execute() 由主循环在下一次重绘之后调用：
//!         1. 通过 Backend 阻塞执行请求
//!         2. 把结果落地到对应页面，页面回到 Ready
//!         3. 通过 NotificationChannel 报告成功或失败
//!
//!     网络错误永远不会让进程退出，只会变成一条通知或一个空状态。
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 弹窗更新（modal.rs）
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     - ModalMessage::Close       放弃修改，关闭弹窗，页面回到 Ready
//!     - ModalMessage::NextField   切换到下一个字段
//!     - ModalMessage::Input(c)    修改工作副本
//!     - ModalMessage::Confirm     安排 Command::CommitEdit
//!
//!     提交成功才关闭弹窗；失败时弹窗保留，错误显示在弹窗内。
//!

mod command;
mod content;
mod modal;
mod navigation;

use crate::message::{AppMessage, Command};
use crate::model::{App, PageKind, PagePhase, HELP_PAGE};

pub use command::execute;

/// 处理应用消息，更新状态
pub fn update(app: &mut App, msg: AppMessage) {
    match msg {
        AppMessage::Quit => {
            app.navigator.quit();
        }

        AppMessage::Navigation(nav_msg) => {
            navigation::update(app, nav_msg);
        }

        AppMessage::Content(content_msg) => {
            content::update(app, content_msg);
        }

        AppMessage::Modal(modal_msg) => {
            modal::update(app, modal_msg);
        }

        AppMessage::GoBack => {
            app.navigator.back();
        }

        AppMessage::Refresh => refresh(app),

        AppMessage::ShowHelp => {
            app.navigator.goto(HELP_PAGE);
        }

        AppMessage::Noop => {}
    }
}

/// 刷新当前页面
fn refresh(app: &mut App) {
    let Some(page) = app.navigator.current_mut() else {
        return;
    };
    if !page.phase().is_ready() {
        return;
    }

    let command = match page {
        PageKind::Collection(p) => Command::RefreshList {
            page: p.status().page_name().to_string(),
        },
        PageKind::Subject(_) => Command::ReloadSubject,
        PageKind::Calendar(_) => Command::ReloadCalendar,
        PageKind::Search(p) => {
            if p.input_payload().is_empty() {
                return;
            }
            Command::Search { fresh: true }
        }
        PageKind::Help(_) => return,
    };
    page.set_phase(PagePhase::Loading);
    app.notification.info("Refreshing...");
    app.schedule(command);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bangumi_core::session::ListModel;
    use bangumi_core::types::{CollectionStatus, Entry, Paged, UserInfo};

    use super::*;
    use crate::message::{ContentMessage, ModalMessage, NavigationMessage};
    use crate::model::state::{CalendarPage, CollectionPage, HelpPage, Pane};
    use crate::model::{CALENDAR_PAGE, SEARCH_PAGE};

    fn entry(id: u32) -> Entry {
        Entry {
            subject_id: id,
            status: Some(CollectionStatus::Watching),
            ..Entry::default()
        }
    }

    /// 在看列表已加载 2/total 条，停在在看列表
    fn app(total: u32) -> App {
        let mut app = App::new(UserInfo::default(), 20);
        for status in CollectionStatus::ALL {
            let mut list = ListModel::new("me", status, 20);
            if status == CollectionStatus::Watching {
                list.apply_load(Paged::new(vec![entry(1), entry(2)], total, 0, 20));
            }
            app.navigator
                .register(PageKind::Collection(CollectionPage::new(list)));
        }
        app.navigator
            .register(PageKind::Calendar(CalendarPage::new(Vec::new(), 1)));
        app.navigator.register(PageKind::Help(HelpPage::new()));
        app.navigator.goto("watching");
        app
    }

    fn watching(app: &App) -> &CollectionPage {
        app.navigator
            .get("watching")
            .and_then(PageKind::as_collection)
            .unwrap()
    }

    fn content(app: &mut App, msg: ContentMessage) {
        update(app, AppMessage::Content(msg));
    }

    #[test]
    fn test_load_more_schedules_when_more_remain() {
        let mut app = app(45);
        content(&mut app, ContentMessage::LoadMore);
        assert_eq!(
            app.pending,
            Some(Command::LoadNextPage {
                page: "watching".to_string()
            })
        );
        assert_eq!(watching(&app).phase, PagePhase::LoadingMore);

        // 加载中再次按 n 不会重复安排
        app.pending = None;
        content(&mut app, ContentMessage::LoadMore);
        assert!(app.pending.is_none());
    }

    #[test]
    fn test_load_more_when_exhausted_is_a_notice() {
        let mut app = app(2);
        content(&mut app, ContentMessage::LoadMore);
        assert!(app.pending.is_none());
        assert!(watching(&app).phase.is_ready());
        assert!(app.notification.current().is_some());
    }

    #[test]
    fn test_confirm_opens_selected_subject() {
        let mut app = app(2);
        content(&mut app, ContentMessage::SelectNext);
        content(&mut app, ContentMessage::Confirm);
        assert_eq!(
            app.pending,
            Some(Command::OpenSubject {
                subject_id: 2,
                origin: "watching".to_string()
            })
        );
    }

    #[test]
    fn test_confirm_ignored_while_loading() {
        let mut app = app(45);
        content(&mut app, ContentMessage::LoadMore);
        app.pending = None;

        content(&mut app, ContentMessage::Confirm);
        assert!(app.pending.is_none());
        assert_eq!(watching(&app).phase, PagePhase::LoadingMore);

        // 加载完成回到 Ready 后才能打开
        app.navigator
            .current_mut()
            .unwrap()
            .set_phase(PagePhase::Ready);
        content(&mut app, ContentMessage::Confirm);
        assert!(matches!(app.pending, Some(Command::OpenSubject { subject_id: 1, .. })));
    }

    #[test]
    fn test_detail_pane_scrolls_instead_of_selecting() {
        let mut app = app(2);
        content(&mut app, ContentMessage::FocusRight);
        content(&mut app, ContentMessage::SelectNext);
        let page = watching(&app);
        assert_eq!(page.pane, Pane::Detail);
        assert_eq!(page.selected, 0);
        assert_eq!(page.detail_scroll, 1);
    }

    #[test]
    fn test_edit_opens_modal_and_close_restores_ready() {
        let mut app = app(2);
        content(&mut app, ContentMessage::Edit);
        assert!(app.modal.is_open());
        assert_eq!(watching(&app).phase, PagePhase::Editing);

        // 弹窗打开时页面不接受翻页
        content(&mut app, ContentMessage::LoadMore);
        assert!(app.pending.is_none());

        update(&mut app, AppMessage::Modal(ModalMessage::Close));
        assert!(!app.modal.is_open());
        assert!(watching(&app).phase.is_ready());
        assert_eq!(watching(&app).list.entries()[0].subject_id, 1);
    }

    #[test]
    fn test_modal_confirm_schedules_commit_and_cancel_closes() {
        let mut app = app(2);
        content(&mut app, ContentMessage::Edit);

        // 没有修改时确认直接关闭
        update(&mut app, AppMessage::Modal(ModalMessage::Confirm));
        assert!(!app.modal.is_open());
        assert!(app.pending.is_none());

        content(&mut app, ContentMessage::Edit);
        update(&mut app, AppMessage::Modal(ModalMessage::Right));
        update(&mut app, AppMessage::Modal(ModalMessage::Confirm));
        assert_eq!(app.pending, Some(Command::CommitEdit));
        assert!(app.modal.get().unwrap().saving);
        assert!(app.modal.is_open());

        app.pending = None;
        update(&mut app, AppMessage::Modal(ModalMessage::PrevField));
        update(&mut app, AppMessage::Modal(ModalMessage::Confirm));
        assert!(app.pending.is_none());
        assert!(!app.modal.is_open());
    }

    #[test]
    fn test_refresh_collection() {
        let mut app = app(2);
        update(&mut app, AppMessage::Refresh);
        assert_eq!(
            app.pending,
            Some(Command::RefreshList {
                page: "watching".to_string()
            })
        );
        assert_eq!(watching(&app).phase, PagePhase::Loading);
    }

    #[test]
    fn test_open_search_registers_lazily() {
        let mut app = app(2);
        assert!(!app.navigator.contains(SEARCH_PAGE));
        update(&mut app, AppMessage::Navigation(NavigationMessage::OpenSearch));
        assert_eq!(app.navigator.current_name(), Some(SEARCH_PAGE));

        content(&mut app, ContentMessage::Input('a'));
        update(&mut app, AppMessage::Navigation(NavigationMessage::Goto(CALENDAR_PAGE.to_string())));
        update(&mut app, AppMessage::Navigation(NavigationMessage::OpenSearch));
        let page = app.navigator.current().unwrap();
        assert!(matches!(page, PageKind::Search(p) if p.keyword == "a"));
    }

    #[test]
    fn test_empty_search_is_rejected() {
        let mut app = app(2);
        update(&mut app, AppMessage::Navigation(NavigationMessage::OpenSearch));
        content(&mut app, ContentMessage::Confirm);
        assert!(app.pending.is_none());
        assert!(app.notification.current().is_some());

        content(&mut app, ContentMessage::Input('x'));
        content(&mut app, ContentMessage::Confirm);
        assert_eq!(app.pending, Some(Command::Search { fresh: true }));
    }

    #[test]
    fn test_back_and_quit() {
        let mut app = app(2);
        update(&mut app, AppMessage::ShowHelp);
        update(&mut app, AppMessage::GoBack);
        // 顶层页面之间切换不入栈，返回是空操作
        assert_eq!(app.navigator.current_name(), Some(HELP_PAGE));

        update(&mut app, AppMessage::Quit);
        assert!(app.should_quit());
    }
}
