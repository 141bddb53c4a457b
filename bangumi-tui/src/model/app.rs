//! 应用状态

use bangumi_core::session::ListModel;
use bangumi_core::types::{CollectionStatus, UserInfo};
use chrono::Datelike;
use ratatui::layout::Rect;

use crate::backend::StartupData;
use crate::message::Command;

use super::navigator::Navigator;
use super::notification::NotificationChannel;
use super::page::PageKind;
use super::state::{CalendarPage, CollectionPage, HelpPage, ModalState};

/// 应用状态
#[derive(Debug)]
pub struct App {
    /// 页面注册表与历史
    pub navigator: Navigator,
    /// 状态栏通知
    pub notification: NotificationChannel,
    /// 编辑弹窗
    pub modal: ModalState,
    /// 等待主循环执行的后端操作
    pub pending: Option<Command>,
    /// 当前登录用户
    pub user: UserInfo,
    /// 列表翻页步长
    pub page_size: u32,
    /// 上一帧的终端区域，用来计算滚动上限
    pub viewport: Rect,
}

impl App {
    /// 创建空应用（没有任何页面）
    pub fn new(user: UserInfo, page_size: u32) -> Self {
        Self {
            navigator: Navigator::new(),
            notification: NotificationChannel::new(),
            modal: ModalState::new(),
            pending: None,
            user,
            page_size,
            viewport: Rect::default(),
        }
    }

    /// 用启动数据注册所有常驻页面，并停在在看列表
    pub fn from_startup(data: StartupData, page_size: u32) -> Self {
        let StartupData {
            user,
            buckets,
            calendar,
        } = data;
        let mut app = Self::new(user, page_size);

        for (status, page) in buckets {
            let mut list = ListModel::new(app.user.username.clone(), status, page_size);
            list.apply_load(page);
            app.navigator
                .register(PageKind::Collection(CollectionPage::new(list)));
        }

        let today = chrono::Local::now().weekday().number_from_monday();
        let calendar_page = match calendar {
            Ok(days) => {
                let mut page = CalendarPage::new(days, today);
                page.select_today();
                page
            }
            Err(e) => {
                app.notification
                    .warn(format!("Failed to load calendar: {e}"));
                let mut page = CalendarPage::new(Vec::new(), today);
                page.error = Some(e.to_string());
                page
            }
        };
        app.navigator.register(PageKind::Calendar(calendar_page));
        app.navigator.register(PageKind::Help(HelpPage::new()));

        app.navigator.goto(CollectionStatus::Watching.page_name());
        app
    }

    /// 是否应该退出主循环
    pub fn should_quit(&self) -> bool {
        self.navigator.is_quit()
    }

    /// 安排一个后端操作（同一时刻只保留一个）
    pub fn schedule(&mut self, command: Command) {
        if let Some(previous) = self.pending.replace(command) {
            log::warn!("Dropping unexecuted command {previous:?}");
        }
    }

    /// 收藏状态对应的列表页
    pub fn collection_page_mut(&mut self, status: CollectionStatus) -> Option<&mut CollectionPage> {
        self.navigator
            .get_mut(status.page_name())
            .and_then(PageKind::as_collection_mut)
    }
}
