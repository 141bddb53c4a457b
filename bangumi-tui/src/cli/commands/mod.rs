//! 子命令实现
//!
//! 除 `ui` 外，每个子命令都是“请求 → 格式化 → 打印”。
//! 格式化函数只返回字符串，方便单独测试。

pub mod auth;
pub mod calendar;
pub mod list;
pub mod search;
pub mod subject;
pub mod ui;

/// 集数未知时显示 `?`
fn episodes_label(total: u32) -> String {
    if total == 0 {
        "?".to_string()
    } else {
        total.to_string()
    }
}
