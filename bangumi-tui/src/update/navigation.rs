//! 导航更新逻辑

use crate::message::NavigationMessage;
use crate::model::state::SearchPage;
use crate::model::{App, PageKind, SEARCH_PAGE};

/// 处理导航消息
pub fn update(app: &mut App, msg: NavigationMessage) {
    match msg {
        NavigationMessage::Goto(name) => {
            if !app.navigator.goto(&name) {
                log::debug!("No page named {name}");
            }
        }

        NavigationMessage::OpenSearch => {
            // 搜索页第一次打开时才注册，之后保留输入与结果
            if !app.navigator.contains(SEARCH_PAGE) {
                app.navigator.register(PageKind::Search(SearchPage::new()));
            }
            app.navigator.goto(SEARCH_PAGE);
        }
    }
}
