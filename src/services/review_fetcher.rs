//! 评审抓取服务
//!
//! 每篇论文发起一次 forum 请求，通过 Semaphore 限制同时在途的请求数。
//! 所有请求完成后才返回，结果按完成顺序排列。

use crate::clients::{NotesApi, NotesQuery};
use crate::config::Config;
use crate::error::{ApiError, AppResult};
use crate::models::ReviewThread;
use futures::stream::{FuturesUnordered, StreamExt};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};

/// 单篇论文的抓取结果
#[derive(Debug)]
pub struct ReviewFetchOutcome {
    pub paper_id: String,
    pub result: Result<ReviewThread, ApiError>,
}

/// 汇总后的抓取结果
#[derive(Debug, Default)]
pub struct ReviewFetchReport {
    /// 成功的 forum（完成顺序）
    pub threads: Vec<ReviewThread>,
    /// 失败的论文 id 及原因
    pub failures: Vec<(String, ApiError)>,
}

impl ReviewFetchReport {
    pub fn from_outcomes(outcomes: Vec<ReviewFetchOutcome>) -> Self {
        let mut report = Self::default();
        for outcome in outcomes {
            match outcome.result {
                Ok(thread) => report.threads.push(thread),
                Err(e) => report.failures.push((outcome.paper_id, e)),
            }
        }
        report
    }
}

/// 评审抓取服务
pub struct ReviewFetcher {
    api: Arc<dyn NotesApi>,
    venue: String,
    year: u32,
    max_concurrent: usize,
}

impl ReviewFetcher {
    /// 创建新的评审抓取服务
    pub fn new(api: Arc<dyn NotesApi>, config: &Config) -> Self {
        Self {
            api,
            venue: config.venue.clone(),
            year: config.year,
            max_concurrent: config.max_concurrent_reviews.max(1),
        }
    }

    /// 并发拉取每篇论文的评审
    ///
    /// # 参数
    /// - `paper_ids`: 论文 id 列表
    ///
    /// # 返回
    /// 每个输入 id 对应一个结果，顺序为完成顺序
    pub async fn fetch_reviews(&self, paper_ids: &[String]) -> AppResult<Vec<ReviewFetchOutcome>> {
        let total = paper_ids.len();
        info!("🔍 开始拉取 {} 篇论文的评审，并发数: {}", total, self.max_concurrent);

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut handles = FuturesUnordered::new();

        for paper_id in paper_ids {
            let permit = semaphore.clone().acquire_owned().await?;
            let api = self.api.clone();
            let query = NotesQuery::forum(&self.venue, self.year, paper_id);
            let paper_id = paper_id.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                fetch_thread(api.as_ref(), &query).await
            });
            // id 留在任务外，任务 panic 时结果仍能对应到论文
            handles.push(async move { (paper_id, handle.await) });
        }

        let mut outcomes = Vec::with_capacity(total);
        while let Some((paper_id, joined)) = handles.next().await {
            let result = match joined {
                Ok(result) => {
                    if let Err(e) = &result {
                        warn!("[论文 {}] 评审拉取失败: {}", paper_id, e);
                    } else {
                        debug!("[论文 {}] ✓ 评审拉取成功", paper_id);
                    }
                    result
                }
                Err(e) => {
                    error!("[论文 {}] 评审拉取任务执行失败: {}", paper_id, e);
                    Err(ApiError::TaskFailed {
                        paper_id: paper_id.clone(),
                        message: e.to_string(),
                    })
                }
            };
            let outcome = ReviewFetchOutcome { paper_id, result };
            outcomes.push(outcome);

            let done = outcomes.len();
            if done % 100 == 0 || done == total {
                info!("进度: {}/{}", done, total);
            }
        }

        Ok(outcomes)
    }
}

async fn fetch_thread(api: &dyn NotesApi, query: &NotesQuery) -> Result<ReviewThread, ApiError> {
    let body = api.get_notes(query).await?;
    decode_thread(body, query)
}

fn decode_thread(body: Value, query: &NotesQuery) -> Result<ReviewThread, ApiError> {
    let has_notes = body.get("notes").map(Value::is_array).unwrap_or(false);
    if !has_notes {
        return Err(ApiError::MissingKey {
            endpoint: query.describe(),
            key: "notes".to_string(),
        });
    }

    serde_json::from_value(body).map_err(|e| ApiError::JsonParseFailed {
        endpoint: query.describe(),
        source: Box::new(e),
    })
}
