//! 内容面板更新逻辑
//!
//! 处理当前页面内的各种操作消息

use ratatui::layout::Rect;

use crate::message::{Command, ContentMessage};
use crate::model::state::{
    CalendarPage, CollectionPage, EditModal, HelpPage, Pane, SearchFocus, SearchPage,
    SubjectPage,
};
use crate::model::{App, PageKind, PagePhase, CALENDAR_PAGE, SEARCH_PAGE, SUBJECT_PAGE};
use crate::view::{layout, pages};

/// PgUp / PgDn 移动的条目数
const PAGE_STEP: usize = 10;
/// PgUp / PgDn 滚动的行数
const SCROLL_STEP: u16 = 10;

/// 处理内容面板消息
pub fn update(app: &mut App, msg: ContentMessage) {
    let area = layout::content_area(app.viewport);
    let Some(page) = app.navigator.current_mut() else {
        return;
    };

    // 页面自身只修改自己的状态，需要通知或后端操作时返回给这里
    let effect = match page {
        PageKind::Collection(p) => collection(p, msg, area),
        PageKind::Calendar(p) => calendar(p, msg),
        PageKind::Subject(p) => subject(p, msg, area),
        PageKind::Search(p) => search(p, msg),
        PageKind::Help(p) => {
            help(p, msg, area);
            Effect::None
        }
    };

    match effect {
        Effect::None => {}
        Effect::Schedule(command) => app.schedule(command),
        Effect::Notice(text) => app.notification.info(text),
        Effect::Warn(text) => app.notification.warn(text),
        Effect::Edit(modal) => app.modal.show(modal),
    }
}

/// 页面处理消息后的副作用
enum Effect {
    None,
    Schedule(Command),
    Notice(String),
    Warn(String),
    Edit(EditModal),
}

// ========== 收藏列表 ==========

fn collection(page: &mut CollectionPage, msg: ContentMessage, area: Rect) -> Effect {
    let in_detail = page.pane == Pane::Detail;
    let max_scroll = pages::collection::detail_max_scroll(page, area);

    match msg {
        ContentMessage::SelectPrevious if in_detail => page.scroll_detail_up(1),
        ContentMessage::SelectNext if in_detail => page.scroll_detail_down(1, max_scroll),
        ContentMessage::PageUp if in_detail => page.scroll_detail_up(SCROLL_STEP),
        ContentMessage::PageDown if in_detail => {
            page.scroll_detail_down(SCROLL_STEP, max_scroll);
        }
        ContentMessage::SelectFirst if in_detail => page.detail_scroll = 0,
        ContentMessage::SelectLast if in_detail => page.detail_scroll = max_scroll,

        ContentMessage::SelectPrevious => page.select_previous(),
        ContentMessage::SelectNext => page.select_next(),
        ContentMessage::SelectFirst => page.select_first(),
        ContentMessage::SelectLast => page.select_last(),
        ContentMessage::PageUp => page.page_up(PAGE_STEP),
        ContentMessage::PageDown => page.page_down(PAGE_STEP),

        ContentMessage::FocusLeft => page.pane = Pane::List,
        ContentMessage::FocusRight => page.pane = Pane::Detail,

        ContentMessage::Confirm => {
            if !page.phase.is_ready() {
                return Effect::None;
            }
            if let Some(entry) = page.selected_entry() {
                return Effect::Schedule(Command::OpenSubject {
                    subject_id: entry.subject_id,
                    origin: page.status().page_name().to_string(),
                });
            }
        }

        ContentMessage::Edit => {
            if !page.phase.is_ready() {
                return Effect::None;
            }
            if let Some(entry) = page.selected_entry() {
                let modal = EditModal::open(page.status().page_name(), entry);
                page.phase = PagePhase::Editing;
                return Effect::Edit(modal);
            }
        }

        ContentMessage::LoadMore => {
            if !page.phase.is_ready() {
                return Effect::None;
            }
            if !page.list.has_more() {
                return Effect::Notice(format!(
                    "All {} entries loaded",
                    page.list.loaded_count()
                ));
            }
            page.phase = PagePhase::LoadingMore;
            return Effect::Schedule(Command::LoadNextPage {
                page: page.status().page_name().to_string(),
            });
        }

        ContentMessage::CycleFocus
        | ContentMessage::CycleFocusBack
        | ContentMessage::Input(_)
        | ContentMessage::Backspace => {}
    }
    Effect::None
}

// ========== 放送表 ==========

fn calendar(page: &mut CalendarPage, msg: ContentMessage) -> Effect {
    match msg {
        ContentMessage::SelectPrevious => page.select_previous(),
        ContentMessage::SelectNext => page.select_next(),
        ContentMessage::SelectFirst => page.select_first(),
        ContentMessage::SelectLast => page.select_last(),
        ContentMessage::PageUp => page.page_up(PAGE_STEP),
        ContentMessage::PageDown => page.page_down(PAGE_STEP),
        ContentMessage::Confirm => {
            if !page.phase.is_ready() {
                return Effect::None;
            }
            if let Some(item) = page.selected_item() {
                return Effect::Schedule(Command::OpenSubject {
                    subject_id: item.id,
                    origin: CALENDAR_PAGE.to_string(),
                });
            }
        }
        _ => {}
    }
    Effect::None
}

// ========== 条目详情 ==========

fn subject(page: &mut SubjectPage, msg: ContentMessage, area: Rect) -> Effect {
    let max_scroll = pages::subject::max_scroll(page, area);

    match msg {
        ContentMessage::SelectPrevious => page.scroll_up(1),
        ContentMessage::SelectNext => page.scroll_down(1, max_scroll),
        ContentMessage::PageUp => page.scroll_up(SCROLL_STEP),
        ContentMessage::PageDown => page.scroll_down(SCROLL_STEP, max_scroll),
        ContentMessage::SelectFirst => page.scroll = 0,
        ContentMessage::SelectLast => page.scroll = max_scroll,

        ContentMessage::Edit => {
            if !page.phase.is_ready() {
                return Effect::None;
            }
            let modal = if page.collected {
                EditModal::open(SUBJECT_PAGE, &page.entry)
            } else {
                EditModal::open_uncollected(SUBJECT_PAGE, &page.entry)
            };
            page.phase = PagePhase::Editing;
            return Effect::Edit(modal);
        }
        _ => {}
    }
    Effect::None
}

// ========== 搜索 ==========

fn search(page: &mut SearchPage, msg: ContentMessage) -> Effect {
    match msg {
        ContentMessage::Input(c) => page.input(c),
        ContentMessage::Backspace => page.backspace(),
        ContentMessage::CycleFocus => page.focus_next(),
        ContentMessage::CycleFocusBack => page.focus_prev(),
        ContentMessage::FocusLeft => page.focus = SearchFocus::Keyword,
        ContentMessage::FocusRight => page.focus = SearchFocus::Results,

        ContentMessage::SelectPrevious => page.select_previous(),
        ContentMessage::SelectNext => page.select_next(),
        ContentMessage::SelectFirst => page.select_first(),
        ContentMessage::SelectLast => page.select_last(),
        ContentMessage::PageUp => page.page_up(PAGE_STEP),
        ContentMessage::PageDown => page.page_down(PAGE_STEP),

        ContentMessage::Confirm if page.focus.is_input() => {
            if page.input_payload().is_empty() {
                return Effect::Warn("Enter a keyword or tags to search".to_string());
            }
            if page.phase.is_ready() {
                page.phase = PagePhase::Loading;
                return Effect::Schedule(Command::Search { fresh: true });
            }
        }

        ContentMessage::Confirm => {
            if !page.phase.is_ready() {
                return Effect::None;
            }
            if let Some(subject) = page.selected_subject() {
                return Effect::Schedule(Command::OpenSubject {
                    subject_id: subject.id,
                    origin: SEARCH_PAGE.to_string(),
                });
            }
        }

        ContentMessage::LoadMore => {
            if !page.phase.is_ready() || page.payload.is_none() {
                return Effect::None;
            }
            if !page.has_more() {
                return Effect::Notice(format!("All {} results loaded", page.results.len()));
            }
            page.phase = PagePhase::LoadingMore;
            return Effect::Schedule(Command::Search { fresh: false });
        }

        ContentMessage::Edit => {}
    }
    Effect::None
}

// ========== 帮助 ==========

fn help(page: &mut HelpPage, msg: ContentMessage, area: Rect) {
    let max_scroll = pages::help::max_scroll(page, area);
    match msg {
        ContentMessage::SelectPrevious => page.scroll_up(1),
        ContentMessage::SelectNext => page.scroll_down(1, max_scroll),
        ContentMessage::PageUp => page.scroll_up(SCROLL_STEP),
        ContentMessage::PageDown => page.scroll_down(SCROLL_STEP, max_scroll),
        ContentMessage::SelectFirst => page.scroll = 0,
        ContentMessage::SelectLast => page.scroll = max_scroll,
        _ => {}
    }
}
