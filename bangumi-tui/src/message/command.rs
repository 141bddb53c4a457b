//! 后端操作
//!
//! Update 层不直接做网络请求，只把要做的事记成 `Command` 交给主循环。
//! 主循环先重绘一次（显示加载提示），再阻塞执行。

/// 等待执行的后端操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 追加收藏列表的下一页
    LoadNextPage { page: String },
    /// 从第一页重新加载收藏列表
    RefreshList { page: String },
    /// 加载条目并打开详情页，返回时回到 `origin`
    OpenSubject { subject_id: u32, origin: String },
    /// 重新加载当前条目详情页
    ReloadSubject,
    /// 重新加载放送表
    ReloadCalendar,
    /// 搜索；`fresh` 为新搜索，否则加载下一页结果
    Search { fresh: bool },
    /// 提交编辑弹窗
    CommitEdit,
}
