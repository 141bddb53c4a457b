//! 会话层：列表分页、并发加载与编辑提交
//!
//! 这一层持有界面会话里真正有状态的部分，不依赖任何终端组件。

mod data_loader;
mod edit_session;
mod list_model;

pub use data_loader::{DataLoader, FetchResults, FetchSpec};
pub use edit_session::{CommitError, CommitOutcome, EditSession, EntryDiff, MAX_RATE};
pub use list_model::{ListModel, PageOutcome, PageRequest};
