//! 核心服务
//!
//! 封装 bangumi-core 的各种服务，提供给 TUI 层使用的统一接口。
//! 界面循环是同步的：所有网络调用都在这里通过自有的 tokio 运行时 `block_on`，
//! 并发加载的结果在屏障之后才交回界面线程。

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use bangumi_client::{GatewayConfig, HttpGateway, LocalCredentialProvider};
use bangumi_core::services::{
    CalendarService, CollectionService, SearchService, ServiceContext, SubjectService, UserService,
};
use bangumi_core::session::{
    CommitError, CommitOutcome, DataLoader, EditSession, FetchSpec, ListModel, PageOutcome,
};
use bangumi_core::traits::CredentialProvider;
use bangumi_core::types::{
    CalendarDay, CollectionStatus, Entry, Episode, Paged, SearchPayload, Subject, UserInfo,
};
use bangumi_core::{CoreError, CoreResult};
use tokio::runtime::Runtime;

use super::config_service::AppConfig;

/// 启动时一次性加载的数据
#[derive(Debug)]
pub struct StartupData {
    pub user: UserInfo,
    /// 五个收藏状态的第一页，顺序同 `CollectionStatus::ALL`
    pub buckets: Vec<(CollectionStatus, Paged<Entry>)>,
    /// 放送表失败不影响启动
    pub calendar: CoreResult<Vec<CalendarDay>>,
}

/// 条目页所需的数据
#[derive(Debug)]
pub struct SubjectData {
    pub subject: Subject,
    /// 用户的收藏；尚未收藏时为合成的默认记录
    pub entry: Entry,
    pub collected: bool,
    pub episodes: Vec<Episode>,
    /// 章节列表读取失败的原因
    pub episodes_error: Option<CoreError>,
}

/// 启动批次中的单个结果
enum StartupFetch {
    Bucket(Paged<Entry>),
    Calendar(Vec<CalendarDay>),
}

/// 条目页批次中的单个结果
enum SubjectFetch {
    Subject(Subject),
    Entry(Entry),
    Episodes(Paged<Episode>),
}

const CALENDAR_FETCH: &str = "calendar";
const SUBJECT_FETCH: &str = "subject";
const COLLECTION_FETCH: &str = "collection";
const EPISODES_FETCH: &str = "episodes";

/// TUI 核心服务
///
/// 持有运行时、服务上下文与凭证提供者。
pub struct CoreService {
    runtime: Runtime,
    ctx: Arc<ServiceContext>,
    credentials: Arc<LocalCredentialProvider>,
    loader: DataLoader,
    page_size: u32,
    episode_limit: u32,
}

impl CoreService {
    /// 创建核心服务实例
    pub fn new(config: &AppConfig) -> Result<Self> {
        // 1. 创建运行时
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("bangumi-io")
            .build()
            .context("Failed to start async runtime")?;

        // 2. 凭证与网关
        let credentials = Arc::new(LocalCredentialProvider::new());
        let gateway_config = GatewayConfig {
            base_url: config.api_base_url.clone(),
            user_agent: config.user_agent.clone(),
            timeout: config.request_timeout(),
        };
        let gateway = HttpGateway::new(&gateway_config, credentials.clone())?;

        // 3. 服务上下文
        let ctx = Arc::new(ServiceContext::new(Arc::new(gateway)));

        Ok(Self {
            runtime,
            ctx,
            credentials,
            loader: DataLoader::with_timeout(config.fetch_timeout()),
            page_size: config.page_size,
            episode_limit: config.episode_limit,
        })
    }

    /// 在运行时上阻塞执行
    pub fn block_on<F: Future>(&self, fut: F) -> F::Output {
        self.runtime.block_on(fut)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    // ========== 服务 ==========

    pub fn user(&self) -> UserService {
        UserService::new(self.ctx.clone())
    }

    pub fn collection(&self) -> CollectionService {
        CollectionService::new(self.ctx.clone())
    }

    pub fn subject(&self) -> SubjectService {
        SubjectService::new(self.ctx.clone())
    }

    pub fn calendar(&self) -> CalendarService {
        CalendarService::new(self.ctx.clone())
    }

    pub fn search_service(&self) -> SearchService {
        SearchService::new(self.ctx.clone())
    }

    // ========== 启动 ==========

    /// 启动加载
    ///
    /// 1. 读取凭证（缺失时直接失败）
    /// 2. 读取当前用户
    /// 3. 并发加载五个收藏状态与放送表，全部完成后返回
    ///
    /// 任何一个收藏状态加载失败都视为启动失败。
    pub fn startup(&self) -> Result<StartupData> {
        self.block_on(async {
            self.credentials
                .get_valid_token()
                .await
                .context("No usable credential, log in first")?;

            let user = self
                .user()
                .me()
                .await
                .context("Failed to fetch the current user")?;
            log::info!("Logged in as {} ({})", user.username, user.id);

            let collection_service = self.collection();
            let calendar = self.calendar();
            let collection = &collection_service;
            let username = user.username.as_str();
            let page_size = self.page_size;

            let mut fetches: Vec<FetchSpec<'_, StartupFetch>> = CollectionStatus::ALL
                .iter()
                .map(move |&status| {
                    FetchSpec::new(status.page_name(), async move {
                        collection
                            .list(username, status, None, 0, page_size)
                            .await
                            .map(StartupFetch::Bucket)
                    })
                })
                .collect();
            fetches.push(FetchSpec::new(CALENDAR_FETCH, async {
                calendar.calendar().await.map(StartupFetch::Calendar)
            }));

            let mut results = self.loader.run_concurrent(fetches).await;

            let mut buckets = Vec::with_capacity(CollectionStatus::ALL.len());
            for status in CollectionStatus::ALL {
                let page = match results.take(status.page_name()) {
                    Ok(StartupFetch::Bucket(page)) => page,
                    Ok(StartupFetch::Calendar(_)) => {
                        return Err(anyhow!("Unexpected result for {}", status.page_name()))
                    }
                    Err(e) => {
                        return Err(anyhow::Error::new(e)
                            .context(format!("Failed to load the {} list", status.label())))
                    }
                };
                buckets.push((status, page));
            }

            let calendar = match results.take(CALENDAR_FETCH) {
                Ok(StartupFetch::Calendar(days)) => Ok(days),
                Ok(StartupFetch::Bucket(_)) => Err(CoreError::FetchMissing(CALENDAR_FETCH.into())),
                Err(e) => Err(e),
            };

            Ok(StartupData {
                user,
                buckets,
                calendar,
            })
        })
    }

    // ========== 页面数据 ==========

    /// 并发读取条目详情、用户收藏与章节列表
    ///
    /// - 条目详情失败：整体失败
    /// - 收藏不存在：合成默认记录；其他收藏错误整体失败，避免用空记录覆盖真实收藏
    /// - 章节失败：返回空列表并附带原因
    pub fn load_subject(&self, subject_id: u32) -> CoreResult<SubjectData> {
        self.block_on(async {
            let subjects = self.subject();
            let collection = self.collection();
            let episode_limit = self.episode_limit;

            let fetches = vec![
                FetchSpec::new(SUBJECT_FETCH, async {
                    subjects.get(subject_id).await.map(SubjectFetch::Subject)
                }),
                FetchSpec::new(COLLECTION_FETCH, async {
                    collection.get(subject_id).await.map(SubjectFetch::Entry)
                }),
                FetchSpec::new(EPISODES_FETCH, async {
                    subjects
                        .episodes(subject_id, 0, episode_limit)
                        .await
                        .map(SubjectFetch::Episodes)
                }),
            ];
            let mut results = self.loader.run_concurrent(fetches).await;

            let subject = match results.take(SUBJECT_FETCH)? {
                SubjectFetch::Subject(subject) => subject,
                _ => return Err(CoreError::FetchMissing(SUBJECT_FETCH.into())),
            };

            let (entry, collected) = match results.take(COLLECTION_FETCH) {
                Ok(SubjectFetch::Entry(entry)) => (entry, true),
                Ok(_) => return Err(CoreError::FetchMissing(COLLECTION_FETCH.into())),
                Err(e) if e.is_not_found() => (Entry::placeholder(&subject), false),
                Err(e) => return Err(e),
            };

            let (episodes, episodes_error) = match results.take(EPISODES_FETCH) {
                Ok(SubjectFetch::Episodes(page)) => (page.data, None),
                Ok(_) => (Vec::new(), Some(CoreError::FetchMissing(EPISODES_FETCH.into()))),
                Err(e) => (Vec::new(), Some(e)),
            };

            Ok(SubjectData {
                subject,
                entry,
                collected,
                episodes,
                episodes_error,
            })
        })
    }

    /// 重新读取放送表
    pub fn load_calendar(&self) -> CoreResult<Vec<CalendarDay>> {
        self.block_on(self.calendar().calendar())
    }

    /// 搜索一页结果
    pub fn search(&self, payload: &SearchPayload, offset: u32) -> CoreResult<Paged<Subject>> {
        self.block_on(self.search_service().search(payload, offset, self.page_size))
    }

    // ========== 列表 ==========

    /// 追加列表的下一页
    pub fn load_next_page(&self, list: &mut ListModel) -> CoreResult<PageOutcome> {
        let service = self.collection();
        self.block_on(list.load_next_page(&service))
    }

    /// 从第一页重新加载列表
    pub fn refresh_list(&self, list: &mut ListModel) -> CoreResult<()> {
        let service = self.collection();
        self.block_on(list.refresh(&service))
    }

    // ========== 凭证 ==========

    pub fn credential_path(&self) -> &Path {
        self.credentials.path()
    }

    /// 用当前凭证读取用户，确认令牌可用
    pub fn whoami(&self) -> Result<UserInfo> {
        self.block_on(async {
            self.credentials
                .get_valid_token()
                .await
                .context("No usable credential, log in first")?;
            self.user()
                .me()
                .await
                .context("Failed to fetch the current user")
        })
    }

    /// 删除保存的凭证，返回是否删除了任何东西
    pub fn logout(&self) -> CoreResult<bool> {
        self.block_on(self.credentials.clear())
    }

    // ========== 编辑 ==========

    /// 读取用户对条目的收藏；尚未收藏时合成默认记录，第二项为是否已收藏
    pub fn load_entry(&self, subject_id: u32) -> CoreResult<(Entry, bool)> {
        self.block_on(async {
            match self.collection().get(subject_id).await {
                Ok(entry) => Ok((entry, true)),
                Err(e) if e.is_not_found() => {
                    let subject = self.subject().get(subject_id).await?;
                    Ok((Entry::placeholder(&subject), false))
                }
                Err(e) => Err(e),
            }
        })
    }


    /// 提交编辑会话
    pub fn commit(&self, session: &EditSession) -> Result<CommitOutcome, CommitError> {
        let service = self.collection();
        self.block_on(session.commit(&service))
    }
}
