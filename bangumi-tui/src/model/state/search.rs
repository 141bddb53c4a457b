//! 搜索页面状态

use bangumi_core::types::{Paged, SearchPayload, Subject};
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::event::search_keys;
use crate::message::AppMessage;
use crate::model::page::{Page, PagePhase, SEARCH_PAGE};
use crate::view::pages;

/// 搜索页面的焦点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchFocus {
    #[default]
    Keyword,
    Tags,
    Results,
}

impl SearchFocus {
    pub fn next(self) -> Self {
        match self {
            Self::Keyword => Self::Tags,
            Self::Tags => Self::Results,
            Self::Results => Self::Keyword,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Keyword => Self::Results,
            Self::Tags => Self::Keyword,
            Self::Results => Self::Tags,
        }
    }

    pub fn is_input(self) -> bool {
        !matches!(self, Self::Results)
    }
}

/// 搜索页面
#[derive(Debug, Default)]
pub struct SearchPage {
    pub keyword: String,
    /// 空格分隔的标签
    pub tags: String,
    pub focus: SearchFocus,
    pub results: Vec<Subject>,
    pub total: u32,
    pub selected: usize,
    /// 当前结果对应的请求，翻页沿用它
    pub payload: Option<SearchPayload>,
    pub phase: PagePhase,
}

impl SearchPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 输入框内容构成的请求
    pub fn input_payload(&self) -> SearchPayload {
        SearchPayload::from_input(&self.keyword, &self.tags)
    }

    pub fn has_more(&self) -> bool {
        self.payload.is_some() && (self.results.len() as u64) < u64::from(self.total)
    }

    pub fn selected_subject(&self) -> Option<&Subject> {
        self.results.get(self.selected)
    }

    // ========== 输入 ==========

    fn focused_input(&mut self) -> Option<&mut String> {
        match self.focus {
            SearchFocus::Keyword => Some(&mut self.keyword),
            SearchFocus::Tags => Some(&mut self.tags),
            SearchFocus::Results => None,
        }
    }

    pub fn input(&mut self, c: char) {
        if let Some(field) = self.focused_input() {
            field.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focused_input() {
            field.pop();
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    // ========== 结果 ==========

    /// 落地一页结果
    ///
    /// `fresh` 为新搜索，替换已有结果并把焦点移到结果表；否则追加。
    pub fn apply_results(&mut self, payload: SearchPayload, page: Paged<Subject>, fresh: bool) {
        if fresh {
            self.results = page.data;
            self.selected = 0;
            if !self.results.is_empty() {
                self.focus = SearchFocus::Results;
            }
        } else {
            self.results.extend(page.data);
        }
        self.total = page.total.max(u32::try_from(self.results.len()).unwrap_or(u32::MAX));
        self.payload = Some(payload);
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.results.len() {
            self.selected += 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.results.len().saturating_sub(1);
    }

    pub fn page_up(&mut self, step: usize) {
        self.selected = self.selected.saturating_sub(step);
    }

    pub fn page_down(&mut self, step: usize) {
        let last = self.results.len().saturating_sub(1);
        self.selected = (self.selected + step).min(last);
    }
}

impl Page for SearchPage {
    fn name(&self) -> &str {
        SEARCH_PAGE
    }

    fn title(&self) -> String {
        match &self.payload {
            Some(_) => format!("Search ({}/{})", self.results.len(), self.total),
            None => "Search".to_string(),
        }
    }

    fn handle_key(&self, key: KeyEvent) -> AppMessage {
        search_keys(self, key)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        pages::search::render(self, frame, area);
    }

    fn captures_input(&self) -> bool {
        self.focus.is_input()
    }
}
