//! 页面状态模块
//!
//! 定义各个页面与编辑弹窗的状态数据结构

mod calendar;
mod collection;
mod help;
mod modal;
mod search;
mod subject;

pub use calendar::CalendarPage;
pub use collection::{CollectionPage, Pane};
pub use help::{HelpPage, HelpSection, HELP_SECTIONS};
pub use modal::{EditField, EditModal, ModalState};
pub use search::{SearchFocus, SearchPage};
pub use subject::{EpisodeAirState, SubjectPage};
