//! 页面注册表与历史栈
//!
//! 同一时刻最多一个当前页面。离开详情页时把它压入历史，
//! 顶层页面（收藏列表、放送表、搜索）之间切换不会让历史增长。
//! 历史栈顶永远不是当前页面。

use std::collections::HashMap;

use super::page::PageKind;

/// 导航器
#[derive(Debug, Default)]
pub struct Navigator {
    pages: HashMap<String, PageKind>,
    current: Option<String>,
    history: Vec<String>,
    quit: bool,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== 注册表 ==========

    /// 注册页面，同名页面被替换并返回
    ///
    /// 被替换的页面从历史中移除，返回时不会落到已经不存在的旧内容上。
    pub fn register(&mut self, page: PageKind) -> Option<PageKind> {
        let name = page.name().to_string();
        let previous = self.pages.insert(name.clone(), page);
        if previous.is_some() {
            self.history.retain(|n| *n != name);
        }
        previous
    }

    /// 移除页面；移除当前页面后没有当前页面
    #[cfg(test)]
    pub fn remove(&mut self, name: &str) -> Option<PageKind> {
        let removed = self.pages.remove(name)?;
        self.history.retain(|n| n != name);
        if self.current.as_deref() == Some(name) {
            self.current = None;
        }
        Some(removed)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.pages.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&PageKind> {
        self.pages.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut PageKind> {
        self.pages.get_mut(name)
    }

    // ========== 当前页面 ==========

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn current(&self) -> Option<&PageKind> {
        self.current.as_deref().and_then(|name| self.pages.get(name))
    }

    pub fn current_mut(&mut self) -> Option<&mut PageKind> {
        let name = self.current.as_deref()?;
        self.pages.get_mut(name)
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    // ========== 跳转 ==========

    /// 切换到指定页面
    ///
    /// 未注册的名字只记录日志，不做任何改变。离开的页面若是详情页则压入历史。
    pub fn goto(&mut self, name: &str) -> bool {
        if self.quit {
            return false;
        }
        if !self.pages.contains_key(name) {
            log::warn!("Cannot go to unregistered page '{name}'");
            return false;
        }
        if self.current.as_deref() == Some(name) {
            return true;
        }

        if let Some(leaving) = self.current.take() {
            let leaving_is_detail = self
                .pages
                .get(&leaving)
                .is_some_and(|p| p.as_page().is_detail());
            if leaving_is_detail {
                self.push(leaving);
            }
        }
        self.switch_to(name);
        true
    }

    /// 返回上一页
    ///
    /// 历史为空时停留在当前页面。返回本身不会再压入历史，
    /// 已被移除的页面名会被跳过。
    pub fn back(&mut self) -> bool {
        if self.quit {
            return false;
        }
        while let Some(name) = self.history.pop() {
            if self.current.as_deref() == Some(name.as_str()) {
                continue;
            }
            if !self.pages.contains_key(&name) {
                log::warn!("Skipping history entry '{name}', page no longer registered");
                continue;
            }
            self.switch_to(&name);
            return true;
        }
        false
    }

    /// 从 `origin` 打开详情页
    ///
    /// 详情页需要事先注册。
    pub fn open_detail(&mut self, name: &str, origin: &str) -> bool {
        if self.quit {
            return false;
        }
        if !self.pages.contains_key(name) {
            log::warn!("Cannot open unregistered detail page '{name}'");
            return false;
        }
        if origin != name {
            self.push(origin.to_string());
        }
        self.switch_to(name);
        true
    }

    /// 结束事件循环，此后不再跳转
    pub fn quit(&mut self) {
        self.quit = true;
    }

    pub fn is_quit(&self) -> bool {
        self.quit
    }

    fn push(&mut self, name: String) {
        if self.history.last() != Some(&name) {
            self.history.push(name);
        }
    }

    fn switch_to(&mut self, name: &str) {
        // 保持栈顶不是当前页面
        while self.history.last().map(String::as_str) == Some(name) {
            self.history.pop();
        }
        log::debug!("Page: {:?} -> {name}", self.current);
        self.current = Some(name.to_string());
    }
}
