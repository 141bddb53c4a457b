//! 编辑弹窗消息

/// 弹窗相关消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalMessage {
    /// 关闭弹窗（放弃修改）
    Close,

    /// 下一个字段
    NextField,

    /// 上一个字段
    PrevField,

    /// 当前字段取上一个值
    Left,

    /// 当前字段取下一个值
    Right,

    /// 确认/提交
    Confirm,

    /// 输入字符
    Input(char),

    /// 删除字符（Backspace）
    Backspace,
}
