//! 收藏编辑会话
//!
//! 打开时复制一份工作副本，表单只修改副本；提交时与原记录比较，
//! 只发出必要的写请求。取消不发请求，原记录保持不变。

use std::fmt;

use crate::error::CoreError;
use crate::services::{CollectionService, ProgressSync};
use crate::types::{CollectionStatus, CollectionUpdate, Entry};

/// 评分上限
pub const MAX_RATE: u8 = 10;

/// 字段级差异
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryDiff {
    pub status: bool,
    pub tags: bool,
    pub rate: bool,
    pub comment: bool,
    pub private: bool,
    pub progress: bool,
}

impl EntryDiff {
    /// 比较两份记录
    #[must_use]
    pub fn between(original: &Entry, working: &Entry) -> Self {
        Self {
            status: original.status != working.status,
            tags: original.tags != working.tags,
            rate: original.rate != working.rate,
            comment: original.comment != working.comment,
            private: original.private != working.private,
            progress: original.ep_status != working.ep_status,
        }
    }

    /// 收藏信息是否有变化（需要整体写入）
    #[must_use]
    pub fn info_changed(&self) -> bool {
        self.status || self.tags || self.rate || self.comment || self.private
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.info_changed() && !self.progress
    }
}

/// 提交成功
#[derive(Debug, Clone)]
pub struct CommitOutcome {
    /// 提交后的记录，用于替换列表中的旧记录
    pub entry: Entry,
    /// 是否发出了整体写入
    pub info_updated: bool,
    /// 进度同步结果（未修改进度时为 `None`）
    pub progress: Option<ProgressSync>,
}

impl CommitOutcome {
    /// 是否什么都没有写
    #[must_use]
    pub fn is_noop(&self) -> bool {
        !self.info_updated && self.progress.is_none()
    }
}

/// 提交失败（可能部分成功）
///
/// 已成功的步骤不会回滚。
#[derive(Debug, Clone)]
pub struct CommitError {
    /// 整体写入的错误
    pub info: Option<CoreError>,
    /// 进度同步的错误
    pub progress: Option<CoreError>,
    /// 整体写入是否已生效
    pub info_applied: bool,
    /// 进度同步是否已生效
    pub progress_applied: bool,
}

impl CommitError {
    /// 是否有步骤已生效
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.info_applied || self.progress_applied
    }
}

impl fmt::Display for CommitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(e) = &self.info {
            parts.push(format!("update failed: {e}"));
        }
        if let Some(e) = &self.progress {
            parts.push(format!("progress failed: {e}"));
        }
        if self.is_partial() {
            parts.push("other changes were saved".to_string());
        }
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for CommitError {}

/// 一次编辑会话
#[derive(Debug, Clone)]
pub struct EditSession {
    original: Entry,
    working: Entry,
}

impl EditSession {
    /// 以某条记录打开编辑会话
    #[must_use]
    pub fn open(original: &Entry) -> Self {
        Self {
            original: original.clone(),
            working: original.clone(),
        }
    }

    pub fn original(&self) -> &Entry {
        &self.original
    }

    pub fn working(&self) -> &Entry {
        &self.working
    }

    pub fn subject_id(&self) -> u32 {
        self.original.subject_id
    }

    // ========== 字段修改（只作用于工作副本） ==========

    pub fn set_status(&mut self, status: Option<CollectionStatus>) {
        self.working.status = status;
    }

    /// 以空白分隔的标签串设置标签，保持输入顺序并去掉重复
    pub fn set_tags_from_input(&mut self, input: &str) {
        let mut tags: Vec<String> = Vec::new();
        for tag in input.split_whitespace() {
            if !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }
        self.working.tags = tags;
    }

    /// 设置评分，超过上限时截断
    pub fn set_rate(&mut self, rate: u8) {
        self.working.rate = rate.min(MAX_RATE);
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.working.comment = comment.into();
    }

    pub fn set_private(&mut self, private: bool) {
        self.working.private = private;
    }

    /// 设置观看进度；已知集数时截断到集数
    pub fn set_progress(&mut self, episode: u32) {
        let total = self.working.episode_total();
        self.working.ep_status = if total > 0 { episode.min(total) } else { episode };
    }

    // ========== 提交 / 取消 ==========

    #[must_use]
    pub fn diff(&self) -> EntryDiff {
        EntryDiff::between(&self.original, &self.working)
    }

    /// 提交修改
    ///
    /// 1. 收藏信息有变化时发出一次整体写入，无变化则跳过；
    /// 2. 进度有变化时单独同步章节状态，与第 1 步互不影响。
    ///
    /// 任一步失败都返回 `CommitError`，调用方不应修改本地列表。
    pub async fn commit(&self, service: &CollectionService) -> Result<CommitOutcome, CommitError> {
        let diff = self.diff();
        let subject_id = self.subject_id();
        if diff.is_empty() {
            log::debug!("Nothing changed for subject {subject_id}, skipping commit");
            return Ok(CommitOutcome {
                entry: self.working.clone(),
                info_updated: false,
                progress: None,
            });
        }

        let info_result = if diff.info_changed() {
            Some(
                service
                    .update(subject_id, &CollectionUpdate::from(&self.working))
                    .await,
            )
        } else {
            None
        };

        let progress_result = if diff.progress {
            Some(
                service
                    .watch_to_episode(subject_id, self.working.ep_status)
                    .await,
            )
        } else {
            None
        };

        let info_applied = matches!(info_result, Some(Ok(())));
        let (progress, progress_error) = match progress_result {
            Some(Ok(sync)) => (Some(sync), None),
            Some(Err(e)) => (None, Some(e)),
            None => (None, None),
        };
        let info_error = info_result.and_then(Result::err);

        if info_error.is_some() || progress_error.is_some() {
            let err = CommitError {
                info: info_error,
                progress: progress_error,
                info_applied,
                progress_applied: progress.is_some(),
            };
            log::error!("Commit for subject {subject_id} failed: {err}");
            return Err(err);
        }

        let mut entry = self.working.clone();
        if let Some(sync) = progress {
            entry.ep_status = sync.done;
        }
        entry.updated_at = Some(chrono::Local::now().fixed_offset());

        Ok(CommitOutcome {
            entry,
            info_updated: info_applied,
            progress,
        })
    }

    /// 放弃修改，返回未改动的原记录
    #[must_use]
    pub fn cancel(self) -> Entry {
        self.original
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_utils::{episodes_json, test_context, MockGateway};
    use crate::types::{EpisodesPatch, SlimSubject};

    fn watching(id: u32, eps: u32) -> Entry {
        Entry {
            subject_id: id,
            status: Some(CollectionStatus::Watching),
            tags: vec!["a".into()],
            ep_status: 1,
            subject: SlimSubject {
                id,
                eps,
                ..SlimSubject::default()
            },
            ..Entry::default()
        }
    }

    fn setup() -> (Arc<MockGateway>, CollectionService) {
        let gateway = Arc::new(MockGateway::new());
        gateway.respond_prefix("/v0/users/-/collections/", "{}");
        gateway.respond_prefix(
            "/v0/users/-/collections/1/episodes?",
            &episodes_json(&[11, 12, 13]),
        );
        let service = CollectionService::new(test_context(&gateway));
        (gateway, service)
    }

    #[tokio::test]
    async fn test_commit_without_changes_issues_no_calls() {
        let (gateway, service) = setup();
        let session = EditSession::open(&watching(1, 3));

        let outcome = session.commit(&service).await.unwrap();

        assert!(outcome.is_noop());
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_status_only_issues_single_update() {
        let (gateway, service) = setup();
        let mut session = EditSession::open(&watching(1, 3));
        session.set_status(Some(CollectionStatus::Done));

        let outcome = session.commit(&service).await.unwrap();

        assert!(outcome.info_updated);
        assert!(outcome.progress.is_none());
        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "POST");
        assert_eq!(calls[0].path, "/v0/users/-/collections/1");
        let body: CollectionUpdate = serde_json::from_slice(&calls[0].body).unwrap();
        assert_eq!(body.status, Some(2));
        assert_eq!(body.tags, vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn test_cycled_status_is_sent_and_kept() {
        let (gateway, service) = setup();
        let mut session = EditSession::open(&watching(1, 3));
        let prev = CollectionStatus::cycle_prev(session.working().status);
        session.set_status(Some(prev));

        let outcome = session.commit(&service).await.unwrap();

        assert_eq!(outcome.entry.status, Some(CollectionStatus::Dropped));
        let calls = gateway.calls_with_method("POST");
        assert_eq!(calls.len(), 1);
        let body: CollectionUpdate = serde_json::from_slice(&calls[0].body).unwrap();
        assert_eq!(body.status, Some(CollectionStatus::Dropped.code()));
    }

    #[tokio::test]
    async fn test_progress_only_skips_update() {
        let (gateway, service) = setup();
        let mut session = EditSession::open(&watching(1, 3));
        session.set_progress(2);

        let outcome = session.commit(&service).await.unwrap();

        assert!(!outcome.info_updated);
        assert_eq!(outcome.entry.ep_status, 2);
        assert!(gateway.calls_with_method("POST").is_empty());
        let patches = gateway.calls_with_method("PATCH");
        assert_eq!(patches.len(), 2);
        let done: EpisodesPatch = serde_json::from_slice(&patches[0].body).unwrap();
        assert_eq!(done.episode_id, vec![11, 12]);
    }

    #[tokio::test]
    async fn test_progress_failure_does_not_roll_back_update() {
        let (gateway, service) = setup();
        gateway.fail_prefix(
            "/v0/users/-/collections/1/episodes",
            CoreError::NetworkError("reset".into()),
        );
        let mut session = EditSession::open(&watching(1, 3));
        session.set_rate(8);
        session.set_progress(3);

        let err = session.commit(&service).await.unwrap_err();

        assert!(err.info.is_none());
        assert!(err.info_applied);
        assert!(err.progress.is_some());
        assert!(err.is_partial());
        assert_eq!(gateway.calls_with_method("POST").len(), 1);
    }

    #[tokio::test]
    async fn test_update_failure_still_attempts_progress() {
        let (gateway, service) = setup();
        gateway.fail_prefix(
            "/v0/users/-/collections/1",
            CoreError::ApiError {
                status: 500,
                message: "boom".into(),
            },
        );
        gateway.respond_prefix(
            "/v0/users/-/collections/1/episodes?",
            &episodes_json(&[11, 12, 13]),
        );
        gateway.respond_prefix("/v0/users/-/collections/1/episodes", "{}");
        let mut session = EditSession::open(&watching(1, 3));
        session.set_comment("new");
        session.set_progress(3);

        let err = session.commit(&service).await.unwrap_err();

        assert!(err.info.is_some());
        assert!(!err.info_applied);
        assert!(err.progress_applied);
        assert_eq!(gateway.calls_with_method("PATCH").len(), 1);
    }

    #[test]
    fn test_cancel_returns_original() {
        let original = watching(1, 3);
        let mut session = EditSession::open(&original);
        session.set_comment("changed");
        session.set_private(true);
        let back = session.cancel();
        assert_eq!(back.comment, original.comment);
        assert!(!back.private);
    }

    #[test]
    fn test_field_setters() {
        let mut session = EditSession::open(&watching(1, 12));
        session.set_rate(42);
        assert_eq!(session.working().rate, MAX_RATE);
        session.set_progress(99);
        assert_eq!(session.working().ep_status, 12);
        session.set_tags_from_input(" b  a b ");
        assert_eq!(session.working().tags, vec!["b", "a"]);
        assert!(session.diff().tags);
        assert_eq!(session.original().ep_status, 1);
    }
}
