//! 并发数据加载
//!
//! 一个页面所需的多个独立请求同时发出，全部结束后（屏障）才把结果交给调用方。
//! 单个请求失败不影响其他请求，是否致命由页面按字段决定。

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use futures::future::{join_all, BoxFuture};
use futures::FutureExt;

use crate::error::{CoreError, CoreResult};

/// 一个具名的待执行请求
pub struct FetchSpec<'a, T> {
    id: String,
    fut: BoxFuture<'a, CoreResult<T>>,
}

impl<'a, T> FetchSpec<'a, T> {
    /// 创建请求描述
    ///
    /// # Arguments
    /// * `id` - 结果表中的键，在同一批次内应唯一
    /// * `fut` - 尚未开始执行的请求
    pub fn new<F>(id: impl Into<String>, fut: F) -> Self
    where
        F: Future<Output = CoreResult<T>> + Send + 'a,
    {
        Self {
            id: id.into(),
            fut: fut.boxed(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// 一批请求的结果表
#[derive(Debug)]
pub struct FetchResults<T> {
    results: HashMap<String, CoreResult<T>>,
}

impl<T> FetchResults<T> {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// 查看某个请求的结果
    pub fn get(&self, id: &str) -> Option<&CoreResult<T>> {
        self.results.get(id)
    }

    /// 取出某个请求的结果；未登记的 id 返回 `FetchMissing`
    pub fn take(&mut self, id: &str) -> CoreResult<T> {
        self.results
            .remove(id)
            .unwrap_or_else(|| Err(CoreError::FetchMissing(id.to_string())))
    }

    /// 失败的请求 id
    pub fn failed_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .results
            .iter()
            .filter(|(_, r)| r.is_err())
            .map(|(id, _)| id.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }
}

/// 并发加载器
#[derive(Debug, Clone, Copy, Default)]
pub struct DataLoader {
    /// 单个请求的时间上限，`None` 为不限
    timeout: Option<Duration>,
}

impl DataLoader {
    #[must_use]
    pub fn new() -> Self {
        Self { timeout: None }
    }

    /// 为每个请求设置时间上限
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    /// 同时执行全部请求，等待全部完成后返回结果表
    ///
    /// 不会因为某个请求失败而提前返回；结果表大小等于请求数（id 重复时后者覆盖前者）。
    pub async fn run_concurrent<'a, T>(&self, fetches: Vec<FetchSpec<'a, T>>) -> FetchResults<T>
    where
        T: Send + 'a,
    {
        let count = fetches.len();
        log::debug!("Loading {count} fetches concurrently");

        let timeout = self.timeout;
        let tasks = fetches.into_iter().map(|spec| async move {
            let FetchSpec { id, fut } = spec;
            let result = match timeout {
                Some(limit) => tokio::time::timeout(limit, fut).await.unwrap_or_else(|_| {
                    Err(CoreError::Timeout(format!(
                        "fetch '{id}' exceeded {}s",
                        limit.as_secs()
                    )))
                }),
                None => fut.await,
            };
            if let Err(e) = &result {
                if e.is_expected() {
                    log::warn!("Fetch '{id}' failed: {e}");
                } else {
                    log::error!("Fetch '{id}' failed: {e}");
                }
            }
            (id, result)
        });

        // 屏障：全部完成后才在调用方收集结果
        let finished = join_all(tasks).await;

        let mut results = HashMap::with_capacity(count);
        for (id, result) in finished {
            if results.insert(id.clone(), result).is_some() {
                log::warn!("Duplicate fetch id '{id}', keeping the last result");
            }
        }
        FetchResults { results }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tokio::time::{sleep, Instant};

    async fn delayed(ms: u64, value: Result<u32, CoreError>) -> CoreResult<u32> {
        sleep(Duration::from_millis(ms)).await;
        value
    }

    #[tokio::test(start_paused = true)]
    async fn test_partial_failure_keeps_successes() {
        let loader = DataLoader::new();
        let fetches = vec![
            FetchSpec::new("subject", delayed(100, Ok(1))),
            FetchSpec::new(
                "collection",
                delayed(200, Err(CoreError::NotFound("collection".into()))),
            ),
            FetchSpec::new("episodes", delayed(300, Ok(3))),
        ];

        let start = Instant::now();
        let mut results = loader.run_concurrent(fetches).await;
        let elapsed = start.elapsed();

        assert_eq!(results.len(), 3);
        assert_eq!(results.failed_ids(), vec!["collection"]);
        assert_eq!(results.take("subject").unwrap(), 1);
        assert_eq!(results.take("episodes").unwrap(), 3);
        assert!(results.take("collection").unwrap_err().is_not_found());

        // 总耗时取决于最慢的请求，而不是总和
        assert!(elapsed >= Duration::from_millis(300));
        assert!(elapsed < Duration::from_millis(600));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_bounds_each_fetch() {
        let loader = DataLoader::with_timeout(Duration::from_secs(1));
        let fetches = vec![
            FetchSpec::new("slow", delayed(10_000, Ok(1))),
            FetchSpec::new("fast", delayed(10, Ok(2))),
        ];

        let mut results = loader.run_concurrent(fetches).await;

        assert!(matches!(results.take("slow"), Err(CoreError::Timeout(_))));
        assert_eq!(results.take("fast").unwrap(), 2);
    }

    #[tokio::test]
    async fn test_missing_id() {
        let loader = DataLoader::new();
        let mut results = loader
            .run_concurrent::<u32>(Vec::new())
            .await;
        assert!(results.is_empty());
        assert!(matches!(
            results.take("nope"),
            Err(CoreError::FetchMissing(_))
        ));
    }

    #[tokio::test]
    async fn test_borrowed_futures() {
        let names = vec!["a".to_string(), "b".to_string()];
        let fetches = names
            .iter()
            .map(|n| FetchSpec::new(n.clone(), async move { Ok(n.len()) }))
            .collect();
        let mut results = DataLoader::new().run_concurrent(fetches).await;
        assert_eq!(results.take("a").unwrap(), 1);
    }
}
