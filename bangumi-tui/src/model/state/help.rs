//! 帮助页面

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::event::scroll_keys;
use crate::message::AppMessage;
use crate::model::page::{Page, HELP_PAGE};
use crate::view::pages;

/// 一组快捷键说明
#[derive(Debug, Clone, Copy)]
pub struct HelpSection {
    pub title: &'static str,
    pub keys: &'static [(&'static str, &'static str)],
}

pub const HELP_SECTIONS: &[HelpSection] = &[
    HelpSection {
        title: "Pages",
        keys: &[
            ("1", "Watching list"),
            ("2", "Wish list"),
            ("3", "Done list"),
            ("4", "Stashed list"),
            ("5", "Dropped list"),
            ("6", "Calendar"),
            ("7", "Search"),
            ("?", "This help"),
        ],
    },
    HelpSection {
        title: "General",
        keys: &[
            ("e", "Edit collection"),
            ("R", "Refresh"),
            ("n", "Load next page"),
            ("Space/Enter", "View subject"),
        ],
    },
    HelpSection {
        title: "Navigation",
        keys: &[
            ("k/↑", "Move up"),
            ("j/↓", "Move down"),
            ("g/G", "First / last"),
            ("PgUp/PgDn", "Page up / down"),
            ("h/←", "Switch to left"),
            ("l/→", "Switch to right"),
            ("q/Esc", "Back"),
            ("Q/Ctrl+C", "Quit"),
        ],
    },
    HelpSection {
        title: "Search",
        keys: &[
            ("Tab/Shift+Tab", "Cycle focus"),
            ("Enter", "Search / open result"),
            ("Esc", "Leave input field"),
        ],
    },
    HelpSection {
        title: "Edit",
        keys: &[
            ("Tab/↓", "Next field"),
            ("Shift+Tab/↑", "Previous field"),
            ("←/→", "Change status / step value"),
            ("Space", "Toggle private"),
            ("Enter", "Save"),
            ("Esc", "Cancel"),
        ],
    },
];

/// 帮助页面
#[derive(Debug, Default)]
pub struct HelpPage {
    pub scroll: u16,
}

impl HelpPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sections(&self) -> &'static [HelpSection] {
        HELP_SECTIONS
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16, max: u16) {
        self.scroll = self.scroll.saturating_add(lines).min(max);
    }
}

impl Page for HelpPage {
    fn name(&self) -> &str {
        HELP_PAGE
    }

    fn title(&self) -> String {
        "Help".to_string()
    }

    fn handle_key(&self, key: KeyEvent) -> AppMessage {
        scroll_keys(key)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        pages::help::render(self, frame, area);
    }
}
