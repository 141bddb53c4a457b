//! 快捷键配置
//!
//! 定义默认快捷键映射

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// 快捷键绑定
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub modifiers: KeyModifiers,
    pub code: KeyCode,
}

impl KeyBinding {
    pub const fn new(modifiers: KeyModifiers, code: KeyCode) -> Self {
        Self { modifiers, code }
    }

    pub const fn key(code: KeyCode) -> Self {
        Self::new(KeyModifiers::NONE, code)
    }

    pub const fn ctrl(code: KeyCode) -> Self {
        Self::new(KeyModifiers::CONTROL, code)
    }

    /// 检查按键事件是否匹配此快捷键绑定
    ///
    /// 字符键忽略 Shift：大写字母本身已经区分了大小写。
    pub fn matches(&self, key: &KeyEvent) -> bool {
        let modifiers = if matches!(key.code, KeyCode::Char(_)) {
            key.modifiers - KeyModifiers::SHIFT
        } else {
            key.modifiers
        };
        modifiers == self.modifiers && key.code == self.code
    }
}

/// 默认快捷键配置
pub struct DefaultKeymap;

impl DefaultKeymap {
    // 全局
    pub const QUIT: KeyBinding = KeyBinding::key(KeyCode::Char('Q'));
    pub const FORCE_QUIT: KeyBinding = KeyBinding::ctrl(KeyCode::Char('c'));
    pub const HELP: KeyBinding = KeyBinding::key(KeyCode::Char('?'));
    pub const REFRESH: KeyBinding = KeyBinding::key(KeyCode::Char('R'));
    pub const BACK: KeyBinding = KeyBinding::key(KeyCode::Esc);
    pub const BACK_ALT: KeyBinding = KeyBinding::key(KeyCode::Char('q'));
    pub const CALENDAR: KeyBinding = KeyBinding::key(KeyCode::Char('6'));
    pub const SEARCH: KeyBinding = KeyBinding::key(KeyCode::Char('7'));

    // 面板切换
    pub const FOCUS_LEFT: KeyBinding = KeyBinding::key(KeyCode::Char('h'));
    pub const FOCUS_RIGHT: KeyBinding = KeyBinding::key(KeyCode::Char('l'));

    // 操作
    pub const EDIT: KeyBinding = KeyBinding::key(KeyCode::Char('e'));
    pub const LOAD_MORE: KeyBinding = KeyBinding::key(KeyCode::Char('n'));
}

/// 数字键 1–5 对应的收藏列表序号
pub fn bucket_index(key: &KeyEvent) -> Option<usize> {
    if !key.modifiers.is_empty() {
        return None;
    }
    match key.code {
        KeyCode::Char(c @ '1'..='5') => Some(c as usize - '1' as usize),
        _ => None,
    }
}
