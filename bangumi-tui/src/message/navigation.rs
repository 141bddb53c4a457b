//! 页面跳转消息

/// 导航消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationMessage {
    /// 切换到已注册的页面
    Goto(String),
    /// 切换到搜索页（不存在时先创建）
    OpenSearch,
}
