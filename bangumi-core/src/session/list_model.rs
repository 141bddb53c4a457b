//! 单个收藏状态（bucket）的分页列表
//!
//! 不变式：`loaded_count() == entries.len() <= total`。已加载数量只会通过
//! 追加下一页增长，或通过刷新整体重置，不会被部分删除。
//!
//! 分页加载分两步：`begin_next_page` 占用在途标记并给出请求范围，
//! `finish_next_page` 落地结果并释放标记。同一列表同时只允许一个在途加载。

use crate::error::{CoreError, CoreResult};
use crate::services::CollectionService;
use crate::types::{CollectionStatus, Entry, Paged};

/// 下一页请求范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: u32,
    pub limit: u32,
}

/// 追加下一页的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// 追加了 n 条
    Appended(usize),
    /// 已全部加载，未发请求
    Exhausted,
}

/// 一个 bucket 的分页列表
#[derive(Debug, Clone)]
pub struct ListModel {
    username: String,
    status: CollectionStatus,
    page_size: u32,
    entries: Vec<Entry>,
    total: u32,
    in_flight: bool,
}

impl ListModel {
    /// 创建空列表
    ///
    /// `page_size` 为 0 时按 1 处理。
    #[must_use]
    pub fn new(username: impl Into<String>, status: CollectionStatus, page_size: u32) -> Self {
        Self {
            username: username.into(),
            status,
            page_size: page_size.max(1),
            entries: Vec::new(),
            total: 0,
            in_flight: false,
        }
    }

    // ========== 查询 ==========

    pub fn status(&self) -> CollectionStatus {
        self.status
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn find(&self, subject_id: u32) -> Option<&Entry> {
        self.entries.iter().find(|e| e.subject_id == subject_id)
    }

    pub fn loaded_count(&self) -> usize {
        self.entries.len()
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// 是否还有未加载的记录
    pub fn has_more(&self) -> bool {
        (self.entries.len() as u64) < u64::from(self.total)
    }

    // ========== 整体加载 ==========

    /// 加载一页并整体替换当前内容
    ///
    /// 失败时保留原状态，错误交给调用方。
    pub async fn load(
        &mut self,
        service: &CollectionService,
        offset: u32,
        limit: u32,
    ) -> CoreResult<()> {
        if limit == 0 {
            return Err(CoreError::ValidationError(
                "limit must be greater than 0".to_string(),
            ));
        }
        self.acquire()?;
        let result = service
            .list(&self.username, self.status, None, offset, limit)
            .await;
        self.in_flight = false;
        self.apply_load(result?);
        Ok(())
    }

    /// 从第一页重新加载，丢弃已有的分页进度
    pub async fn refresh(&mut self, service: &CollectionService) -> CoreResult<()> {
        self.load(service, 0, self.page_size).await
    }

    /// 用已获取的一页整体替换当前内容（启动时的并发加载结果走这里）
    pub fn apply_load(&mut self, page: Paged<Entry>) {
        self.entries = page.data;
        self.total = clamp_total(page.total, self.entries.len());
    }

    // ========== 分页 ==========

    /// 追加下一页
    pub async fn load_next_page(&mut self, service: &CollectionService) -> CoreResult<PageOutcome> {
        let Some(request) = self.begin_next_page()? else {
            return Ok(PageOutcome::Exhausted);
        };
        let result = service
            .list(
                &self.username,
                self.status,
                None,
                request.offset,
                request.limit,
            )
            .await;
        self.finish_next_page(result)
    }

    /// 开始加载下一页：占用在途标记并返回请求范围
    ///
    /// 已全部加载时返回 `Ok(None)`；已有在途加载时返回 `LoadInFlight`。
    pub fn begin_next_page(&mut self) -> CoreResult<Option<PageRequest>> {
        if self.in_flight {
            return Err(CoreError::LoadInFlight);
        }
        if !self.has_more() {
            return Ok(None);
        }
        self.in_flight = true;
        Ok(Some(PageRequest {
            offset: u32::try_from(self.entries.len()).unwrap_or(u32::MAX),
            limit: self.page_size,
        }))
    }

    /// 落地下一页的结果并释放在途标记
    ///
    /// 按原顺序追加，不去重。失败时列表保持不变。
    pub fn finish_next_page(&mut self, result: CoreResult<Paged<Entry>>) -> CoreResult<PageOutcome> {
        self.in_flight = false;
        let page = result?;
        let appended = page.data.len();
        self.entries.extend(page.data);
        self.total = clamp_total(page.total, self.entries.len());
        log::debug!(
            "{} list: appended {appended}, loaded {}/{}",
            self.status.page_name(),
            self.entries.len(),
            self.total
        );
        Ok(PageOutcome::Appended(appended))
    }

    // ========== 本地变更 ==========

    /// 把条目移到最前，其余条目保持相对顺序
    ///
    /// 返回原位置；不存在时返回 `None` 且列表不变。
    pub fn move_to_front(&mut self, subject_id: u32) -> Option<usize> {
        let index = self
            .entries
            .iter()
            .position(|e| e.subject_id == subject_id)?;
        let entry = self.entries.remove(index);
        self.entries.insert(0, entry);
        Some(index)
    }

    /// 用新记录整体替换同 id 的条目，返回是否找到
    pub fn replace(&mut self, subject_id: u32, entry: Entry) -> bool {
        match self.entries.iter_mut().find(|e| e.subject_id == subject_id) {
            Some(slot) => {
                *slot = entry;
                true
            }
            None => false,
        }
    }

    fn acquire(&mut self) -> CoreResult<()> {
        if self.in_flight {
            return Err(CoreError::LoadInFlight);
        }
        self.in_flight = true;
        Ok(())
    }
}

/// 服务端总数小于已加载数量时以已加载数量为准
fn clamp_total(reported: u32, loaded: usize) -> u32 {
    reported.max(u32::try_from(loaded).unwrap_or(u32::MAX))
}
