//! 页面内容消息
//!
//! 同一条消息在不同页面上含义略有不同，例如 `SelectNext`
//! 在列表焦点时移动选择，在详情焦点时滚动详情。

/// 内容消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentMessage {
    // ========== 列表导航 ==========
    /// 选择上一项
    SelectPrevious,
    /// 选择下一项
    SelectNext,
    /// 跳转到第一项
    SelectFirst,
    /// 跳转到最后一项
    SelectLast,
    /// 向上翻一屏
    PageUp,
    /// 向下翻一屏
    PageDown,

    // ========== 面板焦点 ==========
    /// 焦点移到左侧面板
    FocusLeft,
    /// 焦点移到右侧面板
    FocusRight,
    /// 循环切换焦点（搜索页）
    CycleFocus,
    /// 反向循环切换焦点（搜索页）
    CycleFocusBack,

    // ========== 操作 ==========
    /// 确认选择（打开条目或执行搜索）
    Confirm,
    /// 编辑当前条目的收藏
    Edit,
    /// 加载下一页
    LoadMore,

    // ========== 文本输入 ==========
    /// 输入字符
    Input(char),
    /// 删除字符（Backspace）
    Backspace,
}
