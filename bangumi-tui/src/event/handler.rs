//! 事件处理器

use std::time::Duration;

use anyhow::Result;
use bangumi_core::types::CollectionStatus;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::event::keymap::{bucket_index, DefaultKeymap};
use crate::message::{AppMessage, ContentMessage, ModalMessage, NavigationMessage};
use crate::model::state::{EditField, SearchFocus, SearchPage};
use crate::model::{App, CALENDAR_PAGE};




/// 轮询事件
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}




/// 处理事件，返回对应的消息
pub fn handle_event(event: Event, app: &App) -> AppMessage {
    match event {
        Event::Key(key_event) => handle_key_event(key_event, app),      // 键盘事件
        _ => AppMessage::Noop,                                          // 窗口大小改变时自动重绘
    }
}




/// 处理键盘事件
fn handle_key_event(key: KeyEvent, app: &App) -> AppMessage {
    // 只处理 Press 事件，忽略 Release 和 Repeat
    if key.kind != KeyEventKind::Press {
        return AppMessage::Noop;
    }

    // 如果有弹窗打开，优先处理弹窗输入
    if let Some(modal) = app.modal.get() {
        return handle_modal_keys(key, modal.focus);
    }

    if DefaultKeymap::FORCE_QUIT.matches(&key) {
        return AppMessage::Quit;
    }

    let Some(page) = app.navigator.current() else {
        return handle_global_keys(&key).unwrap_or(AppMessage::Noop);
    };
    let page = page.as_page();

    // 输入框持有焦点时，全局快捷键让位
    if page.captures_input() {
        return page.handle_key(key);
    }

    handle_global_keys(&key).unwrap_or_else(|| page.handle_key(key))
}

/// 全局快捷键（无论当前在哪个页面）
fn handle_global_keys(key: &KeyEvent) -> Option<AppMessage> {
    if DefaultKeymap::QUIT.matches(key) {
        return Some(AppMessage::Quit);
    }
    if DefaultKeymap::BACK.matches(key) || DefaultKeymap::BACK_ALT.matches(key) {
        return Some(AppMessage::GoBack);
    }
    if DefaultKeymap::HELP.matches(key) {
        return Some(AppMessage::ShowHelp);
    }
    if DefaultKeymap::REFRESH.matches(key) {
        return Some(AppMessage::Refresh);
    }
    if let Some(index) = bucket_index(key) {
        let status = CollectionStatus::ALL[index];
        return Some(AppMessage::Navigation(NavigationMessage::Goto(
            status.page_name().to_string(),
        )));
    }
    if DefaultKeymap::CALENDAR.matches(key) {
        return Some(AppMessage::Navigation(NavigationMessage::Goto(
            CALENDAR_PAGE.to_string(),
        )));
    }
    if DefaultKeymap::SEARCH.matches(key) {
        return Some(AppMessage::Navigation(NavigationMessage::OpenSearch));
    }
    None
}

// ========== 页面按键 ==========

/// 列表类页面的通用按键
pub fn list_keys(key: KeyEvent) -> AppMessage {
    let msg = match key.code {
        // ↑ 或 k: 上一项
        KeyCode::Up | KeyCode::Char('k') => ContentMessage::SelectPrevious,
        // ↓ 或 j: 下一项
        KeyCode::Down | KeyCode::Char('j') => ContentMessage::SelectNext,
        // Home 或 g: 第一项
        KeyCode::Home | KeyCode::Char('g') => ContentMessage::SelectFirst,
        // End 或 G: 最后一项
        KeyCode::End | KeyCode::Char('G') => ContentMessage::SelectLast,
        KeyCode::PageUp => ContentMessage::PageUp,
        KeyCode::PageDown => ContentMessage::PageDown,
        // Enter 或 Space: 打开条目
        KeyCode::Enter | KeyCode::Char(' ') => ContentMessage::Confirm,
        _ => return AppMessage::Noop,
    };
    AppMessage::Content(msg)
}

/// 收藏列表页面的按键
pub fn collection_keys(key: KeyEvent) -> AppMessage {
    if DefaultKeymap::EDIT.matches(&key) {
        return AppMessage::Content(ContentMessage::Edit);
    }
    if DefaultKeymap::LOAD_MORE.matches(&key) {
        return AppMessage::Content(ContentMessage::LoadMore);
    }
    if DefaultKeymap::FOCUS_LEFT.matches(&key) || key.code == KeyCode::Left {
        return AppMessage::Content(ContentMessage::FocusLeft);
    }
    if DefaultKeymap::FOCUS_RIGHT.matches(&key) || key.code == KeyCode::Right {
        return AppMessage::Content(ContentMessage::FocusRight);
    }
    list_keys(key)
}

/// 滚动类页面（条目详情、帮助）的按键
pub fn scroll_keys(key: KeyEvent) -> AppMessage {
    if DefaultKeymap::EDIT.matches(&key) {
        return AppMessage::Content(ContentMessage::Edit);
    }
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => AppMessage::Noop,
        _ => list_keys(key),
    }
}

/// 搜索页面的按键
pub fn search_keys(page: &SearchPage, key: KeyEvent) -> AppMessage {
    match key.code {
        KeyCode::Tab => return AppMessage::Content(ContentMessage::CycleFocus),
        KeyCode::BackTab => return AppMessage::Content(ContentMessage::CycleFocusBack),
        _ => {}
    }

    if page.focus == SearchFocus::Results {
        if DefaultKeymap::LOAD_MORE.matches(&key) {
            return AppMessage::Content(ContentMessage::LoadMore);
        }
        if key.code == KeyCode::Char('/') {
            return AppMessage::Content(ContentMessage::FocusLeft);
        }
        return list_keys(key);
    }

    // 输入框
    let msg = match key.code {
        KeyCode::Enter => ContentMessage::Confirm,
        // Esc 把焦点交给结果表，之后再按 Esc 才是返回
        KeyCode::Esc => ContentMessage::FocusRight,
        KeyCode::Down => ContentMessage::CycleFocus,
        KeyCode::Up => ContentMessage::CycleFocusBack,
        KeyCode::Backspace => ContentMessage::Backspace,
        KeyCode::Char(c) if is_text_input(&key) => ContentMessage::Input(c),
        _ => return AppMessage::Noop,
    };
    AppMessage::Content(msg)
}

// ========== 弹窗按键 ==========

/// 处理编辑弹窗中的按键
fn handle_modal_keys(key: KeyEvent, focus: EditField) -> AppMessage {
    // Esc 和 Ctrl+C 始终可以关闭弹窗
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Esc) => {
            return AppMessage::Modal(ModalMessage::Close);
        }
        _ => {}
    }

    let msg = match key.code {
        // Tab / ↓: 下一个字段
        KeyCode::Tab | KeyCode::Down => ModalMessage::NextField,

        // Shift+Tab / ↑: 上一个字段
        KeyCode::BackTab | KeyCode::Up => ModalMessage::PrevField,

        // ← →: 切换状态 / 调整数字 / 切换按钮
        KeyCode::Left => ModalMessage::Left,
        KeyCode::Right => ModalMessage::Right,

        // Enter: 保存（焦点在 Cancel 时为取消）
        KeyCode::Enter => ModalMessage::Confirm,

        // Backspace: 删除字符
        KeyCode::Backspace => ModalMessage::Backspace,

        // 字符输入
        KeyCode::Char(ch) if is_text_input(&key) && !focus.is_button() => ModalMessage::Input(ch),

        _ => return AppMessage::Noop,
    };
    AppMessage::Modal(msg)
}

/// 普通字符输入（允许 Shift）
fn is_text_input(key: &KeyEvent) -> bool {
    (key.modifiers - KeyModifiers::SHIFT).is_empty()
}

#[cfg(test)]
mod tests {
    use bangumi_core::types::{Entry, UserInfo};

    use super::*;
    use crate::model::state::{EditModal, HelpPage};
    use crate::model::PageKind;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn app_on_search() -> App {
        let mut app = App::new(UserInfo::default(), 20);
        app.navigator.register(PageKind::Search(SearchPage::new()));
        app.navigator.register(PageKind::Help(HelpPage::new()));
        app.navigator.goto("search");
        app
    }

    #[test]
    fn test_release_events_are_ignored() {
        let app = app_on_search();
        let mut key = KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT);
        key.kind = KeyEventKind::Release;
        assert_eq!(handle_event(Event::Key(key), &app), AppMessage::Noop);
    }

    #[test]
    fn test_global_keys_yield_to_search_input() {
        let app = app_on_search();
        assert_eq!(
            handle_event(press(KeyCode::Char('q')), &app),
            AppMessage::Content(ContentMessage::Input('q'))
        );
        assert_eq!(
            handle_event(press(KeyCode::Char('1')), &app),
            AppMessage::Content(ContentMessage::Input('1'))
        );
        assert_eq!(
            handle_event(press(KeyCode::Esc), &app),
            AppMessage::Content(ContentMessage::FocusRight)
        );
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(handle_event(ctrl_c, &app), AppMessage::Quit);
    }

    #[test]
    fn test_global_keys_on_results_focus() {
        let mut app = app_on_search();
        if let Some(page) = app.navigator.current_mut().and_then(PageKind::as_search_mut) {
            page.focus = SearchFocus::Results;
        }
        assert_eq!(handle_event(press(KeyCode::Char('q')), &app), AppMessage::GoBack);
        assert_eq!(
            handle_event(press(KeyCode::Char('2')), &app),
            AppMessage::Navigation(NavigationMessage::Goto("wish".to_string()))
        );
        assert_eq!(
            handle_event(press(KeyCode::Char('7')), &app),
            AppMessage::Navigation(NavigationMessage::OpenSearch)
        );
        assert_eq!(
            handle_event(press(KeyCode::Char('n')), &app),
            AppMessage::Content(ContentMessage::LoadMore)
        );
        let shift_q = Event::Key(KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT));
        assert_eq!(handle_event(shift_q, &app), AppMessage::Quit);
    }

    #[test]
    fn test_collection_keys() {
        assert_eq!(
            collection_keys(KeyEvent::new(KeyCode::Char('e'), KeyModifiers::NONE)),
            AppMessage::Content(ContentMessage::Edit)
        );
        assert_eq!(
            collection_keys(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE)),
            AppMessage::Content(ContentMessage::FocusRight)
        );
        assert_eq!(
            collection_keys(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE)),
            AppMessage::Content(ContentMessage::Confirm)
        );
        assert_eq!(
            collection_keys(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            AppMessage::Content(ContentMessage::SelectLast)
        );
    }

    #[test]
    fn test_modal_captures_all_keys() {
        let mut app = app_on_search();
        app.modal.show(EditModal::open("search", &Entry::default()));

        assert_eq!(
            handle_event(press(KeyCode::Char('Q')), &app),
            AppMessage::Modal(ModalMessage::Input('Q'))
        );
        assert_eq!(
            handle_event(press(KeyCode::Esc), &app),
            AppMessage::Modal(ModalMessage::Close)
        );
        assert_eq!(
            handle_event(press(KeyCode::BackTab), &app),
            AppMessage::Modal(ModalMessage::PrevField)
        );
        assert_eq!(
            handle_event(press(KeyCode::Enter), &app),
            AppMessage::Modal(ModalMessage::Confirm)
        );
    }

    #[test]
    fn test_modal_buttons_ignore_text() {
        assert_eq!(
            handle_modal_keys(
                KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE),
                EditField::Save
            ),
            AppMessage::Noop
        );
    }
}
