//! 收藏服务

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::{check_limit, ServiceContext};
use crate::types::{
    CollectionStatus, CollectionUpdate, Entry, EpisodeCollectionType, EpisodesPatch, Paged,
    SubjectType, UserEpisode,
};

/// 一次读取用户章节记录的上限
const EPISODE_PAGE_LIMIT: u32 = 100;

/// 进度同步结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSync {
    /// 标记为看过的章节数（已截断到已知集数）
    pub done: u32,
    /// 撤销标记的章节数
    pub reset: u32,
}

/// 用户收藏服务
pub struct CollectionService {
    ctx: Arc<ServiceContext>,
}

impl CollectionService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 列出某个状态下的收藏（分页）
    pub async fn list(
        &self,
        username: &str,
        status: CollectionStatus,
        subject_type: Option<SubjectType>,
        offset: u32,
        limit: u32,
    ) -> CoreResult<Paged<Entry>> {
        check_limit(limit)?;
        let type_param = subject_type.map_or(String::new(), |t| t.code().to_string());
        let path = format!(
            "/v0/users/{}/collections?subject_type={type_param}&type={}&limit={limit}&offset={offset}",
            urlencoding::encode(username),
            status.code(),
        );
        self.ctx.get_json(&path).await
    }

    /// 当前用户对某条目的收藏；尚未收藏时返回 `NotFound`
    pub async fn get(&self, subject_id: u32) -> CoreResult<Entry> {
        let path = format!("/v0/users/-/collections/{subject_id}");
        self.ctx.get_json(&path).await.map_err(|e| {
            if e.is_not_found() {
                CoreError::NotFound(format!("collection for subject {subject_id}"))
            } else {
                e
            }
        })
    }

    /// 整体写入收藏信息（状态、评分、评论、隐私、标签）
    pub async fn update(&self, subject_id: u32, update: &CollectionUpdate) -> CoreResult<()> {
        let path = format!("/v0/users/-/collections/{subject_id}");
        self.ctx.post_json(&path, update).await?;
        log::info!("Collection of subject {subject_id} updated");
        Ok(())
    }

    /// 用户在某条目下的本篇章节记录
    pub async fn user_episodes(
        &self,
        subject_id: u32,
        offset: u32,
        limit: u32,
    ) -> CoreResult<Paged<UserEpisode>> {
        check_limit(limit)?;
        let path = format!(
            "/v0/users/-/collections/{subject_id}/episodes?offset={offset}&limit={limit}&episode_type=0"
        );
        self.ctx.get_json(&path).await
    }

    /// 批量更新章节状态；空列表不发请求
    pub async fn patch_episodes(
        &self,
        subject_id: u32,
        episode_ids: Vec<u32>,
        status: EpisodeCollectionType,
    ) -> CoreResult<()> {
        if episode_ids.is_empty() {
            return Ok(());
        }
        let path = format!("/v0/users/-/collections/{subject_id}/episodes");
        let patch = EpisodesPatch {
            episode_id: episode_ids,
            status,
        };
        self.ctx.patch_json(&path, &patch).await?;
        Ok(())
    }

    /// 看到第 `episode` 集：前 N 集标记看过，其余撤销
    ///
    /// N 截断到 `[0, 已知集数]`，已知集数取用户章节记录的条数。
    pub async fn watch_to_episode(&self, subject_id: u32, episode: u32) -> CoreResult<ProgressSync> {
        let episodes = self
            .user_episodes(subject_id, 0, EPISODE_PAGE_LIMIT)
            .await?;
        let known = u32::try_from(episodes.data.len()).unwrap_or(u32::MAX);
        if episode > known {
            log::warn!(
                "Episode {episode} exceeds known episodes ({known}) of subject {subject_id}, marking all"
            );
        }
        let target = episode.min(known);

        let mut done: Vec<u32> = episodes.data.iter().map(|e| e.episode.id).collect();
        let rest = done.split_off(target as usize);
        let reset = u32::try_from(rest.len()).unwrap_or(u32::MAX);

        self.patch_episodes(subject_id, done, EpisodeCollectionType::Done)
            .await?;
        self.patch_episodes(subject_id, rest, EpisodeCollectionType::None)
            .await?;

        Ok(ProgressSync {
            done: target,
            reset,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::{episodes_json, MockGateway};

    fn service(gateway: &Arc<MockGateway>) -> CollectionService {
        CollectionService::new(Arc::new(ServiceContext::new(gateway.clone())))
    }

    #[tokio::test]
    async fn test_list_builds_query() {
        let gateway = Arc::new(MockGateway::new());
        gateway.respond_prefix("/v0/users/", r#"{"total": 0, "limit": 20, "offset": 0, "data": []}"#);
        let svc = service(&gateway);

        svc.list("some user", CollectionStatus::Watching, None, 40, 20)
            .await
            .unwrap();

        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].path,
            "/v0/users/some%20user/collections?subject_type=&type=3&limit=20&offset=40"
        );
    }

    #[tokio::test]
    async fn test_list_rejects_zero_limit() {
        let gateway = Arc::new(MockGateway::new());
        let svc = service(&gateway);
        let err = svc
            .list("u", CollectionStatus::Wish, None, 0, 0)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_get_maps_404() {
        let gateway = Arc::new(MockGateway::new());
        gateway.fail_prefix(
            "/v0/users/-/collections/9",
            CoreError::ApiError {
                status: 404,
                message: "not found".into(),
            },
        );
        let err = service(&gateway).get(9).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_watch_to_episode_clamps_and_splits() {
        let gateway = Arc::new(MockGateway::new());
        gateway.respond_prefix(
            "/v0/users/-/collections/5/episodes?",
            &episodes_json(&[101, 102, 103, 104]),
        );
        gateway.respond_prefix("/v0/users/-/collections/5/episodes", "{}");
        let svc = service(&gateway);

        let sync = svc.watch_to_episode(5, 2).await.unwrap();
        assert_eq!(sync, ProgressSync { done: 2, reset: 2 });

        let patches = gateway.calls_with_method("PATCH");
        assert_eq!(patches.len(), 2);
        let first: EpisodesPatch = serde_json::from_slice(&patches[0].body).unwrap();
        assert_eq!(first.episode_id, vec![101, 102]);
        assert_eq!(first.status, EpisodeCollectionType::Done);
        let second: EpisodesPatch = serde_json::from_slice(&patches[1].body).unwrap();
        assert_eq!(second.episode_id, vec![103, 104]);
        assert_eq!(second.status, EpisodeCollectionType::None);
    }

    #[tokio::test]
    async fn test_watch_to_episode_beyond_total_marks_all() {
        let gateway = Arc::new(MockGateway::new());
        gateway.respond_prefix(
            "/v0/users/-/collections/5/episodes?",
            &episodes_json(&[1, 2, 3]),
        );
        gateway.respond_prefix("/v0/users/-/collections/5/episodes", "{}");

        let sync = service(&gateway).watch_to_episode(5, 99).await.unwrap();
        assert_eq!(sync, ProgressSync { done: 3, reset: 0 });
        // 只有一个非空列表
        assert_eq!(gateway.calls_with_method("PATCH").len(), 1);
    }
}
