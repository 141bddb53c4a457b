//! 收藏列表页面状态

use bangumi_core::session::ListModel;
use bangumi_core::types::{CollectionStatus, Entry};
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::event::collection_keys;
use crate::message::AppMessage;
use crate::model::page::{Page, PagePhase};
use crate::view::pages;

/// 页面内的焦点面板
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    /// 左侧条目列表
    #[default]
    List,
    /// 右侧条目详情
    Detail,
}

/// 一个收藏状态的列表页面
#[derive(Debug)]
pub struct CollectionPage {
    pub list: ListModel,
    /// 当前选中的索引
    pub selected: usize,
    pub pane: Pane,
    /// 详情面板滚动行数
    pub detail_scroll: u16,
    pub phase: PagePhase,
}

impl CollectionPage {
    pub fn new(list: ListModel) -> Self {
        Self {
            list,
            selected: 0,
            pane: Pane::List,
            detail_scroll: 0,
            phase: PagePhase::Ready,
        }
    }

    pub fn status(&self) -> CollectionStatus {
        self.list.status()
    }

    /// 获取当前选中的条目
    pub fn selected_entry(&self) -> Option<&Entry> {
        self.list.get(self.selected)
    }

    // ========== 选择 ==========

    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.set_selected(self.selected - 1);
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.list.loaded_count() {
            self.set_selected(self.selected + 1);
        }
    }

    pub fn select_first(&mut self) {
        self.set_selected(0);
    }

    pub fn select_last(&mut self) {
        self.set_selected(self.list.loaded_count().saturating_sub(1));
    }

    pub fn page_up(&mut self, step: usize) {
        self.set_selected(self.selected.saturating_sub(step));
    }

    pub fn page_down(&mut self, step: usize) {
        let last = self.list.loaded_count().saturating_sub(1);
        self.set_selected((self.selected + step).min(last));
    }

    /// 列表内容变化后把选择收回到有效范围
    pub fn clamp_selection(&mut self) {
        let last = self.list.loaded_count().saturating_sub(1);
        if self.selected > last {
            self.set_selected(last);
        }
    }

    fn set_selected(&mut self, index: usize) {
        if index != self.selected {
            self.selected = index;
            self.detail_scroll = 0;
        }
    }

    // ========== 详情面板 ==========

    pub fn scroll_detail_up(&mut self, lines: u16) {
        self.detail_scroll = self.detail_scroll.saturating_sub(lines);
    }

    /// 向下滚动，不超过 `max`
    pub fn scroll_detail_down(&mut self, lines: u16, max: u16) {
        self.detail_scroll = self.detail_scroll.saturating_add(lines).min(max);
    }

    // ========== 提交后的本地变更 ==========

    /// 把提交后的记录移到最前并替换旧记录，选中它
    ///
    /// 条目不在本列表中时返回 `false`，列表不变。
    pub fn apply_committed(&mut self, entry: Entry) -> bool {
        let subject_id = entry.subject_id;
        if self.list.move_to_front(subject_id).is_none() {
            return false;
        }
        self.list.replace(subject_id, entry);
        self.selected = 0;
        self.detail_scroll = 0;
        true
    }
}

impl Page for CollectionPage {
    fn name(&self) -> &str {
        self.status().page_name()
    }

    fn title(&self) -> String {
        format!(
            "{} ({}/{})",
            self.status().label(),
            self.list.loaded_count(),
            self.list.total()
        )
    }

    fn handle_key(&self, key: KeyEvent) -> AppMessage {
        collection_keys(key)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        pages::collection::render(self, frame, area);
    }
}
