//! 页面抽象
//!
//! 每个页面有唯一的名字，能把按键翻译成消息，也能把自己画出来。
//! `PageKind` 是 Navigator 注册表中存放的具体页面。

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::message::AppMessage;

use super::state::{CalendarPage, CollectionPage, HelpPage, SearchPage, SubjectPage};

pub const CALENDAR_PAGE: &str = "calendar";
pub const SEARCH_PAGE: &str = "search";
pub const HELP_PAGE: &str = "help";
pub const SUBJECT_PAGE: &str = "subject";

/// 页面生命周期阶段
///
/// 只有 `Ready` 时允许翻页、打开编辑与跳转详情。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PagePhase {
    /// 正在整体加载（刷新）
    Loading,
    #[default]
    Ready,
    /// 正在追加下一页
    LoadingMore,
    /// 编辑弹窗打开中
    Editing,
}

impl PagePhase {
    pub fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// 页面
pub trait Page {
    /// 注册表中的名字
    fn name(&self) -> &str;

    /// 边框标题
    fn title(&self) -> String;

    /// 把按键翻译成消息
    fn handle_key(&self, key: KeyEvent) -> AppMessage;

    /// 渲染到给定区域
    fn render(&self, frame: &mut Frame, area: Rect);

    /// 离开时是否需要压入历史（详情页）
    fn is_detail(&self) -> bool {
        false
    }

    /// 是否有文本输入框持有焦点（此时全局快捷键让位）
    fn captures_input(&self) -> bool {
        false
    }
}

/// 注册表中的页面
#[derive(Debug)]
pub enum PageKind {
    Collection(CollectionPage),
    Calendar(CalendarPage),
    Subject(Box<SubjectPage>),
    Search(SearchPage),
    Help(HelpPage),
}

impl PageKind {
    pub fn as_page(&self) -> &dyn Page {
        match self {
            Self::Collection(p) => p,
            Self::Calendar(p) => p,
            Self::Subject(p) => p.as_ref(),
            Self::Search(p) => p,
            Self::Help(p) => p,
        }
    }

    pub fn name(&self) -> &str {
        self.as_page().name()
    }

    /// 当前阶段（无状态页面总是就绪）
    pub fn phase(&self) -> PagePhase {
        match self {
            Self::Collection(p) => p.phase,
            Self::Subject(p) => p.phase,
            Self::Search(p) => p.phase,
            Self::Calendar(p) => p.phase,
            Self::Help(_) => PagePhase::Ready,
        }
    }

    pub fn set_phase(&mut self, phase: PagePhase) {
        match self {
            Self::Collection(p) => p.phase = phase,
            Self::Subject(p) => p.phase = phase,
            Self::Search(p) => p.phase = phase,
            Self::Calendar(p) => p.phase = phase,
            Self::Help(_) => {}
        }
    }

    pub fn as_collection(&self) -> Option<&CollectionPage> {
        match self {
            Self::Collection(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_collection_mut(&mut self) -> Option<&mut CollectionPage> {
        match self {
            Self::Collection(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_calendar_mut(&mut self) -> Option<&mut CalendarPage> {
        match self {
            Self::Calendar(p) => Some(p),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn as_subject(&self) -> Option<&SubjectPage> {
        match self {
            Self::Subject(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_subject_mut(&mut self) -> Option<&mut SubjectPage> {
        match self {
            Self::Subject(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_search_mut(&mut self) -> Option<&mut SearchPage> {
        match self {
            Self::Search(p) => Some(p),
            _ => None,
        }
    }
}
