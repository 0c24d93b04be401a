//! 内存版 notes 数据源（用于测试和离线演练）

use crate::clients::notes_api::{NotesApi, NotesQuery};
use crate::error::ApiError;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// 按查询参数返回预置数据的 [`NotesApi`] 实现
///
/// - 带 `forum` 的查询返回对应论文的 forum 响应，未登记的 id 返回 404
/// - 带 `limit`/`offset` 的查询返回论文列表切片
/// - 其余查询只返回 `count`
#[derive(Default)]
pub struct InMemoryNotesApi {
    papers: Vec<Value>,
    forums: HashMap<String, Value>,
    delay: Option<Duration>,
    requests: Mutex<Vec<NotesQuery>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl InMemoryNotesApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置论文列表
    pub fn with_papers(mut self, papers: Vec<Value>) -> Self {
        self.papers = papers;
        self
    }

    /// 登记单篇论文的 forum 响应
    pub fn with_forum(mut self, paper_id: impl Into<String>, body: Value) -> Self {
        self.forums.insert(paper_id.into(), body);
        self
    }

    /// 每次请求的模拟延迟
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// 已收到的请求（按到达顺序）
    pub fn requests(&self) -> Vec<NotesQuery> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// 请求总数
    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// 观察到的最大同时在途请求数
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn respond(&self, query: &NotesQuery) -> Result<Value, ApiError> {
        if let Some(forum) = query.get("forum") {
            return self
                .forums
                .get(forum)
                .cloned()
                .ok_or_else(|| ApiError::BadStatus {
                    endpoint: query.describe(),
                    status: 404,
                });
        }

        let count = self.papers.len();
        let limit = query.get("limit").and_then(|v| v.parse::<usize>().ok());
        let offset = query.get("offset").and_then(|v| v.parse::<usize>().ok());

        match (limit, offset) {
            (Some(limit), Some(offset)) => {
                let notes: Vec<Value> = self.papers.iter().skip(offset).take(limit).cloned().collect();
                Ok(json!({ "count": count, "notes": notes }))
            }
            _ => Ok(json!({ "count": count, "notes": [] })),
        }
    }
}

#[async_trait]
impl NotesApi for InMemoryNotesApi {
    async fn get_notes(&self, query: &NotesQuery) -> Result<Value, ApiError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(query.clone());
        }

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let result = self.respond(query);

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
