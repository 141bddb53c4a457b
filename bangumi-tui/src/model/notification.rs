//! 状态栏通知
//!
//! 单槽位：新通知覆盖旧通知；下一次按键时清除。

/// 通知级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// 一条通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub text: String,
}

/// 通知槽
#[derive(Debug, Default)]
pub struct NotificationChannel {
    slot: Option<Notification>,
}

impl NotificationChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// 发出通知，覆盖当前内容
    pub fn notify(&mut self, level: NotificationLevel, text: impl Into<String>) {
        let text = text.into();
        match level {
            NotificationLevel::Error => log::error!("{text}"),
            NotificationLevel::Warning => log::warn!("{text}"),
            NotificationLevel::Info | NotificationLevel::Success => log::debug!("notice: {text}"),
        }
        self.slot = Some(Notification { level, text });
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.notify(NotificationLevel::Info, text);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.notify(NotificationLevel::Success, text);
    }

    pub fn warn(&mut self, text: impl Into<String>) {
        self.notify(NotificationLevel::Warning, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.notify(NotificationLevel::Error, text);
    }

    /// 当前通知
    pub fn current(&self) -> Option<&Notification> {
        self.slot.as_ref()
    }

    /// 清除并返回当前通知
    pub fn clear(&mut self) -> Option<Notification> {
        self.slot.take()
    }
}
