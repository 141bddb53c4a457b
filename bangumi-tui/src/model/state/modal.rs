//! 收藏编辑弹窗状态
//!
//! 表单只修改 `EditSession` 的工作副本。数字输入框保存原始文本，
//! 每次变化后立即解析并写回会话，超出范围的值会被改写成截断后的值。

use bangumi_core::session::{EditSession, MAX_RATE};
use bangumi_core::types::{CollectionStatus, Entry};

/// 表单字段（按 Tab 顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditField {
    #[default]
    Status,
    Progress,
    Tags,
    Rate,
    Comment,
    Private,
    Save,
    Cancel,
}

impl EditField {
    pub const ALL: [EditField; 8] = [
        EditField::Status,
        EditField::Progress,
        EditField::Tags,
        EditField::Rate,
        EditField::Comment,
        EditField::Private,
        EditField::Save,
        EditField::Cancel,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Status => "Status",
            Self::Progress => "Episodes watched",
            Self::Tags => "Tags (separated by spaces)",
            Self::Rate => "Rate (0-10)",
            Self::Comment => "Comment",
            Self::Private => "Private",
            Self::Save => "Save",
            Self::Cancel => "Cancel",
        }
    }

    pub fn is_button(self) -> bool {
        matches!(self, Self::Save | Self::Cancel)
    }
}

/// 编辑弹窗
#[derive(Debug, Clone)]
pub struct EditModal {
    /// 打开弹窗的页面名
    pub owner: String,
    pub session: EditSession,
    pub focus: EditField,
    pub progress_input: String,
    pub tags_input: String,
    pub rate_input: String,
    pub comment_input: String,
    /// 上一次提交失败的原因
    pub error: Option<String>,
    /// 提交请求已发出，等待结果
    pub saving: bool,
}

impl EditModal {
    /// 以某条收藏打开弹窗
    pub fn open(owner: impl Into<String>, entry: &Entry) -> Self {
        Self::from_session(owner.into(), EditSession::open(entry))
    }

    /// 以尚未收藏的条目打开弹窗，状态预选为在看
    pub fn open_uncollected(owner: impl Into<String>, entry: &Entry) -> Self {
        let mut session = EditSession::open(entry);
        if session.working().status.is_none() {
            session.set_status(Some(CollectionStatus::Watching));
        }
        Self::from_session(owner.into(), session)
    }

    fn from_session(owner: String, session: EditSession) -> Self {
        let working = session.working();
        let progress_input = working.ep_status.to_string();
        let tags_input = working.tags.join(" ");
        let rate_input = if working.rate == 0 {
            String::new()
        } else {
            working.rate.to_string()
        };
        let comment_input = working.comment.clone();
        Self {
            owner,
            session,
            focus: EditField::Status,
            progress_input,
            tags_input,
            rate_input,
            comment_input,
            error: None,
            saving: false,
        }
    }

    pub fn title(&self) -> &str {
        self.session.original().display_name()
    }

    pub fn working(&self) -> &Entry {
        self.session.working()
    }

    // ========== 焦点 ==========

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_field(&mut self) {
        self.focus = self.focus.prev();
    }

    // ========== 编辑 ==========

    /// ←：状态上一项，数字减一，按钮间切换
    pub fn left(&mut self) {
        match self.focus {
            EditField::Status => {
                let status = CollectionStatus::cycle_prev(self.working().status);
                self.session.set_status(Some(status));
            }
            EditField::Progress => {
                let value = self.working().ep_status.saturating_sub(1);
                self.set_progress(value);
            }
            EditField::Rate => {
                let value = self.working().rate.saturating_sub(1);
                self.set_rate(u32::from(value));
            }
            EditField::Save | EditField::Cancel => self.focus = EditField::Save,
            _ => {}
        }
    }

    /// →：状态下一项，数字加一，按钮间切换
    pub fn right(&mut self) {
        match self.focus {
            EditField::Status => {
                let status = CollectionStatus::cycle_next(self.working().status);
                self.session.set_status(Some(status));
            }
            EditField::Progress => {
                let value = self.working().ep_status.saturating_add(1);
                self.set_progress(value);
            }
            EditField::Rate => {
                let value = self.working().rate.saturating_add(1);
                self.set_rate(u32::from(value));
            }
            EditField::Save | EditField::Cancel => self.focus = EditField::Cancel,
            _ => {}
        }
    }

    pub fn toggle_private(&mut self) {
        let private = !self.working().private;
        self.session.set_private(private);
    }

    /// 字符输入
    pub fn input(&mut self, c: char) {
        match self.focus {
            EditField::Progress if c.is_ascii_digit() => {
                let mut text = self.progress_input.clone();
                text.push(c);
                self.set_progress(parse_number(&text));
            }
            EditField::Rate if c.is_ascii_digit() => {
                let mut text = self.rate_input.clone();
                text.push(c);
                self.set_rate(parse_number(&text));
            }
            EditField::Tags => {
                self.tags_input.push(c);
                self.session.set_tags_from_input(&self.tags_input);
            }
            EditField::Comment => {
                self.comment_input.push(c);
                self.session.set_comment(self.comment_input.clone());
            }
            EditField::Private if c == ' ' => self.toggle_private(),
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            EditField::Progress => {
                self.progress_input.pop();
                let value = parse_number(&self.progress_input);
                self.set_progress(value);
            }
            EditField::Rate => {
                self.rate_input.pop();
                let value = parse_number(&self.rate_input);
                self.set_rate(value);
            }
            EditField::Tags => {
                self.tags_input.pop();
                self.session.set_tags_from_input(&self.tags_input);
            }
            EditField::Comment => {
                self.comment_input.pop();
                self.session.set_comment(self.comment_input.clone());
            }
            _ => {}
        }
    }

    fn set_progress(&mut self, value: u32) {
        self.session.set_progress(value);
        self.progress_input = self.working().ep_status.to_string();
    }

    fn set_rate(&mut self, value: u32) {
        let rate = u8::try_from(value.min(u32::from(MAX_RATE))).unwrap_or(MAX_RATE);
        self.session.set_rate(rate);
        self.rate_input = if rate == 0 {
            String::new()
        } else {
            rate.to_string()
        };
    }

    /// 是否有未提交的修改
    pub fn is_dirty(&self) -> bool {
        !self.session.diff().is_empty()
    }
}

/// 空串为 0，溢出按最大值处理
fn parse_number(text: &str) -> u32 {
    if text.is_empty() {
        return 0;
    }
    text.parse().unwrap_or(u32::MAX)
}

/// 弹窗状态
#[derive(Debug, Default)]
pub struct ModalState {
    pub active: Option<EditModal>,
}

impl ModalState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 显示弹窗
    pub fn show(&mut self, modal: EditModal) {
        self.active = Some(modal);
    }

    /// 关闭弹窗，返回被关闭的弹窗
    pub fn close(&mut self) -> Option<EditModal> {
        self.active.take()
    }

    /// 是否有弹窗打开
    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn get(&self) -> Option<&EditModal> {
        self.active.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut EditModal> {
        self.active.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use bangumi_core::types::SlimSubject;

    use super::*;

    fn entry() -> Entry {
        Entry {
            subject_id: 42,
            status: Some(CollectionStatus::Watching),
            tags: vec!["mecha".to_string()],
            rate: 7,
            ep_status: 3,
            subject: SlimSubject {
                id: 42,
                name: "EVA".to_string(),
                eps: 26,
                ..SlimSubject::default()
            },
            ..Entry::default()
        }
    }

    fn modal() -> EditModal {
        EditModal::open("watching", &entry())
    }

    #[test]
    fn test_form_prefilled_from_entry() {
        let modal = modal();
        assert_eq!(modal.progress_input, "3");
        assert_eq!(modal.tags_input, "mecha");
        assert_eq!(modal.rate_input, "7");
        assert_eq!(modal.title(), "EVA");
        assert!(!modal.is_dirty());
    }

    #[test]
    fn test_focus_wraps_around() {
        let mut modal = modal();
        modal.prev_field();
        assert_eq!(modal.focus, EditField::Cancel);
        modal.next_field();
        assert_eq!(modal.focus, EditField::Status);
    }

    #[test]
    fn test_rate_input_is_clamped() {
        let mut modal = modal();
        modal.focus = EditField::Rate;
        modal.input('5');
        assert_eq!(modal.rate_input, "10");
        assert_eq!(modal.working().rate, 10);

        modal.backspace();
        modal.backspace();
        assert_eq!(modal.rate_input, "");
        assert_eq!(modal.working().rate, 0);

        modal.input('x');
        assert_eq!(modal.working().rate, 0);
    }

    #[test]
    fn test_progress_clamped_to_episode_count() {
        let mut modal = modal();
        modal.focus = EditField::Progress;
        modal.input('9');
        assert_eq!(modal.working().ep_status, 26);
        assert_eq!(modal.progress_input, "26");

        modal.backspace();
        assert_eq!(modal.working().ep_status, 2);
        modal.right();
        assert_eq!(modal.working().ep_status, 3);
        assert!(!modal.is_dirty());
    }

    #[test]
    fn test_status_cycles_and_marks_dirty() {
        let mut modal = modal();
        modal.right();
        assert_eq!(modal.working().status, Some(CollectionStatus::Wish));
        assert!(modal.session.diff().status);
        modal.left();
        assert!(!modal.is_dirty());
    }

    #[test]
    fn test_status_wraps_without_unset() {
        let mut modal = modal();
        modal.left();
        assert_eq!(modal.working().status, Some(CollectionStatus::Dropped));
        modal.right();
        assert_eq!(modal.working().status, Some(CollectionStatus::Watching));

        for _ in 0..12 {
            modal.right();
            assert!(modal.working().status.is_some());
        }
    }

    #[test]
    fn test_tags_and_comment_update_working_copy() {
        let mut modal = modal();
        modal.focus = EditField::Tags;
        for c in " robot mecha".chars() {
            modal.input(c);
        }
        assert_eq!(modal.working().tags, ["mecha", "robot"]);

        modal.focus = EditField::Comment;
        modal.input('!');
        assert_eq!(modal.working().comment, "!");
        assert_eq!(modal.session.original().comment, "");
    }

    #[test]
    fn test_space_toggles_private() {
        let mut modal = modal();
        modal.focus = EditField::Private;
        modal.input(' ');
        assert!(modal.working().private);
        modal.toggle_private();
        assert!(!modal.working().private);
    }

    #[test]
    fn test_uncollected_defaults_to_watching() {
        let placeholder = Entry {
            subject_id: 1,
            ..Entry::default()
        };
        let modal = EditModal::open_uncollected("subject", &placeholder);
        assert_eq!(modal.working().status, Some(CollectionStatus::Watching));
        assert!(modal.is_dirty());
    }

    #[test]
    fn test_modal_state_open_close() {
        let mut state = ModalState::new();
        assert!(!state.is_open());
        state.show(modal());
        assert!(state.is_open());
        assert_eq!(state.close().map(|m| m.owner), Some("watching".to_string()));
        assert!(state.close().is_none());
    }
}
