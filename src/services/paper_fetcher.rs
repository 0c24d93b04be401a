//! 论文列表抓取服务
//!
//! 只负责"按会议分页拉取全部论文"能力，请求严格串行。

use crate::clients::{NotesApi, NotesQuery};
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult, ConfigError};
use crate::models::RawPaperRecord;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// 论文列表抓取服务
pub struct PaperFetcher {
    api: Arc<dyn NotesApi>,
    venue: String,
    year: u32,
    batch_limit: usize,
    limit: Option<usize>,
}

impl PaperFetcher {
    /// 创建新的抓取服务
    pub fn new(api: Arc<dyn NotesApi>, config: &Config) -> AppResult<Self> {
        if config.batch_limit == 0 {
            return Err(AppError::Config(ConfigError::InvalidValue {
                name: "batch_limit".to_string(),
                reason: "必须大于 0".to_string(),
            }));
        }

        Ok(Self {
            api,
            venue: config.venue.clone(),
            year: config.year,
            batch_limit: config.batch_limit,
            limit: config.limit,
        })
    }

    /// 拉取会议的全部论文
    ///
    /// # 返回
    /// 返回 (按到达顺序拼接的原始论文记录, 接口报告的论文总数)
    pub async fn fetch_papers(&self) -> AppResult<(Vec<RawPaperRecord>, usize)> {
        let base_query = NotesQuery::venue_papers(&self.venue, self.year);

        let initial = self.api.get_notes(&base_query).await?;
        let count = read_count(&initial, &base_query)?;
        let total_pages = count.div_ceil(self.batch_limit);

        info!("📄 论文总数: {}", count);
        info!("📋 分页大小: {}，共 {} 页", self.batch_limit, total_pages);

        let mut all_papers = Vec::new();
        for (page, offset) in (0..count).step_by(self.batch_limit).enumerate() {
            let query = base_query.clone().page(self.batch_limit, offset);
            let body = self.api.get_notes(&query).await?;
            let notes = read_notes(body, &query)?;

            debug!("第 {}/{} 页: {} 条", page + 1, total_pages, notes.len());
            all_papers.extend(notes);

            if let Some(limit) = self.limit {
                if all_papers.len() >= limit {
                    info!("已达到上限 {}，停止分页", limit);
                    break;
                }
            }
        }

        info!("✓ 共拉取 {} 篇论文", all_papers.len());
        Ok((all_papers, count))
    }
}

fn read_count(body: &Value, query: &NotesQuery) -> Result<usize, ApiError> {
    body.get("count")
        .and_then(Value::as_u64)
        .map(|c| c as usize)
        .ok_or_else(|| ApiError::MissingKey {
            endpoint: query.describe(),
            key: "count".to_string(),
        })
}

fn read_notes(body: Value, query: &NotesQuery) -> Result<Vec<Value>, ApiError> {
    match body {
        Value::Object(mut map) => match map.remove("notes") {
            Some(Value::Array(notes)) => Ok(notes),
            _ => Err(missing_notes(query)),
        },
        _ => Err(missing_notes(query)),
    }
}

fn missing_notes(query: &NotesQuery) -> ApiError {
    ApiError::MissingKey {
        endpoint: query.describe(),
        key: "notes".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::InMemoryNotesApi;
    use async_trait::async_trait;
    use serde_json::json;

    fn papers(n: usize) -> Vec<Value> {
        (0..n).map(|i| json!({ "id": format!("p{}", i) })).collect()
    }

    fn config(batch_limit: usize, limit: Option<usize>) -> Config {
        Config {
            batch_limit,
            limit,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_pagination_offsets_and_order() {
        let api = Arc::new(InMemoryNotesApi::new().with_papers(papers(2500)));
        let fetcher = PaperFetcher::new(api.clone(), &config(1000, None)).unwrap();

        let (records, count) = fetcher.fetch_papers().await.unwrap();

        assert_eq!(count, 2500);
        assert_eq!(records.len(), 2500);
        assert_eq!(records[0]["id"], "p0");
        assert_eq!(records[1000]["id"], "p1000");
        assert_eq!(records[2499]["id"], "p2499");

        let requests = api.requests();
        assert_eq!(requests.len(), 4);
        assert_eq!(requests[0].get("offset"), None);
        let offsets: Vec<&str> = requests[1..]
            .iter()
            .map(|q| q.get("offset").unwrap())
            .collect();
        assert_eq!(offsets, vec!["0", "1000", "2000"]);
        assert!(requests[1..].iter().all(|q| q.get("limit") == Some("1000")));
    }

    #[tokio::test]
    async fn test_limit_stops_after_batch() {
        let api = Arc::new(InMemoryNotesApi::new().with_papers(papers(2500)));
        let fetcher = PaperFetcher::new(api.clone(), &config(1000, Some(1500))).unwrap();

        let (records, count) = fetcher.fetch_papers().await.unwrap();

        assert_eq!(count, 2500);
        assert_eq!(records.len(), 2000);
        assert_eq!(api.request_count(), 3);
    }

    #[tokio::test]
    async fn test_empty_venue() {
        let api = Arc::new(InMemoryNotesApi::new());
        let fetcher = PaperFetcher::new(api.clone(), &config(1000, None)).unwrap();

        let (records, count) = fetcher.fetch_papers().await.unwrap();

        assert_eq!(count, 0);
        assert!(records.is_empty());
        assert_eq!(api.request_count(), 1);
    }

    #[test]
    fn test_zero_batch_limit_rejected() {
        let api = Arc::new(InMemoryNotesApi::new());
        assert!(PaperFetcher::new(api, &config(0, None)).is_err());
    }

    /// 返回固定响应体的数据源
    struct FixedApi(Value);

    #[async_trait]
    impl NotesApi for FixedApi {
        async fn get_notes(&self, _query: &NotesQuery) -> Result<Value, ApiError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_missing_count_is_data_format_error() {
        let fetcher =
            PaperFetcher::new(Arc::new(FixedApi(json!({ "notes": [] }))), &config(10, None)).unwrap();

        let err = fetcher.fetch_papers().await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Api(ApiError::MissingKey { ref key, .. }) if key == "count"
        ));
    }

    #[tokio::test]
    async fn test_missing_notes_is_data_format_error() {
        let fetcher =
            PaperFetcher::new(Arc::new(FixedApi(json!({ "count": 3 }))), &config(10, None)).unwrap();

        let err = fetcher.fetch_papers().await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Api(ApiError::MissingKey { ref key, .. }) if key == "notes"
        ));
    }
}
