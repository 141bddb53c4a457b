//! 放送表页面状态
//!
//! 七个星期分区拼成一个扁平列表，`selected` 是扁平索引。

use bangumi_core::types::{CalendarDay, CalendarItem};
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::event::list_keys;
use crate::message::AppMessage;
use crate::model::page::{Page, PagePhase, CALENDAR_PAGE};
use crate::view::pages;

/// 放送表页面
#[derive(Debug, Default)]
pub struct CalendarPage {
    pub days: Vec<CalendarDay>,
    pub selected: usize,
    /// 今天是星期几（1 = 周一）
    pub today: u32,
    /// 最近一次加载失败的原因
    pub error: Option<String>,
    pub phase: PagePhase,
}

impl CalendarPage {
    pub fn new(days: Vec<CalendarDay>, today: u32) -> Self {
        let mut page = Self {
            today,
            ..Self::default()
        };
        page.set_days(days);
        page
    }

    /// 替换放送表，每天按关注人数降序排列
    pub fn set_days(&mut self, mut days: Vec<CalendarDay>) {
        for day in &mut days {
            day.sort_by_followers();
        }
        self.days = days;
        self.error = None;
        let last = self.item_count().saturating_sub(1);
        self.selected = self.selected.min(last);
    }

    pub fn item_count(&self) -> usize {
        self.days.iter().map(|d| d.items.len()).sum()
    }

    /// 扁平索引对应的 (天, 条目)
    pub fn locate(&self, index: usize) -> Option<(&CalendarDay, &CalendarItem)> {
        let mut rest = index;
        for day in &self.days {
            if rest < day.items.len() {
                return Some((day, &day.items[rest]));
            }
            rest -= day.items.len();
        }
        None
    }

    pub fn selected_item(&self) -> Option<&CalendarItem> {
        self.locate(self.selected).map(|(_, item)| item)
    }

    pub fn is_today(&self, day: &CalendarDay) -> bool {
        day.weekday.id == self.today
    }

    // ========== 选择 ==========

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.item_count() {
            self.selected += 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.item_count().saturating_sub(1);
    }

    pub fn page_up(&mut self, step: usize) {
        self.selected = self.selected.saturating_sub(step);
    }

    pub fn page_down(&mut self, step: usize) {
        let last = self.item_count().saturating_sub(1);
        self.selected = (self.selected + step).min(last);
    }

    /// 跳到今天的第一个条目
    pub fn select_today(&mut self) {
        let mut index = 0;
        for day in &self.days {
            if self.is_today(day) && !day.items.is_empty() {
                self.selected = index;
                return;
            }
            index += day.items.len();
        }
    }
}

impl Page for CalendarPage {
    fn name(&self) -> &str {
        CALENDAR_PAGE
    }

    fn title(&self) -> String {
        "Calendar".to_string()
    }

    fn handle_key(&self, key: KeyEvent) -> AppMessage {
        list_keys(key)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        pages::calendar::render(self, frame, area);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bangumi_core::types::{CalendarCollection, Weekday};

    use super::*;

    fn item(id: u32, followers: u32) -> CalendarItem {
        CalendarItem {
            id,
            collection: Some(CalendarCollection {
                doing: followers,
                ..CalendarCollection::default()
            }),
            ..CalendarItem::default()
        }
    }

    fn day(id: u32, items: Vec<CalendarItem>) -> CalendarDay {
        CalendarDay {
            weekday: Weekday {
                id,
                ..Weekday::default()
            },
            items,
        }
    }

    fn sample() -> CalendarPage {
        CalendarPage::new(
            vec![
                day(1, vec![item(10, 5), item(11, 50)]),
                day(2, Vec::new()),
                day(3, vec![item(30, 1)]),
            ],
            3,
        )
    }

    #[test]
    fn test_items_sorted_by_followers() {
        let page = sample();
        let ids: Vec<u32> = page.days[0].items.iter().map(|i| i.id).collect();
        assert_eq!(ids, [11, 10]);
    }

    #[test]
    fn test_flat_index_spans_days() {
        let mut page = sample();
        assert_eq!(page.item_count(), 3);
        page.select_last();
        let (day, item) = page.locate(page.selected).unwrap();
        assert_eq!(day.weekday.id, 3);
        assert_eq!(item.id, 30);
        page.select_next();
        assert_eq!(page.selected, 2);
    }

    #[test]
    fn test_select_today() {
        let mut page = sample();
        page.select_today();
        assert_eq!(page.selected_item().map(|i| i.id), Some(30));
    }

    #[test]
    fn test_reload_clamps_selection() {
        let mut page = sample();
        page.select_last();
        page.set_days(vec![day(1, vec![item(1, 1)])]);
        assert_eq!(page.selected, 0);
        assert!(page.error.is_none());
    }
}
