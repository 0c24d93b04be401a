//! notes 接口抽象
//!
//! 抓取服务只依赖 [`NotesApi`]，生产环境由 `OpenReviewClient` 实现，
//! 测试中可以替换为内存数据源。

use crate::config::venue_domain;
use crate::error::ApiError;
use async_trait::async_trait;
use serde_json::Value;

const PAPER_DETAILS: &str = "replyCount,invitation,original";
const FORUM_DETAILS: &str = "replyCount,writable,signatures,invitation,presentation";

/// `GET /notes` 的查询参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesQuery {
    params: Vec<(String, String)>,
}

impl NotesQuery {
    /// 按会议列出已接收论文
    pub fn venue_papers(venue: &str, year: u32) -> Self {
        let domain = venue_domain(venue, year);
        Self {
            params: vec![
                ("content.venueid".to_string(), domain.clone()),
                ("details".to_string(), PAPER_DETAILS.to_string()),
                ("domain".to_string(), domain),
            ],
        }
    }

    /// 单篇论文的 forum（投稿 + 评审）
    pub fn forum(venue: &str, year: u32, paper_id: &str) -> Self {
        Self {
            params: vec![
                ("details".to_string(), FORUM_DETAILS.to_string()),
                ("domain".to_string(), venue_domain(venue, year)),
                ("forum".to_string(), paper_id.to_string()),
            ],
        }
    }

    /// 追加分页参数
    pub fn page(mut self, limit: usize, offset: usize) -> Self {
        self.params.push(("limit".to_string(), limit.to_string()));
        self.params.push(("offset".to_string(), offset.to_string()));
        self
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// 读取某个参数
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// 用于日志和错误信息的简短描述
    pub fn describe(&self) -> String {
        let parts: Vec<String> = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        format!("/notes?{}", parts.join("&"))
    }
}

/// notes 接口
#[async_trait]
pub trait NotesApi: Send + Sync {
    /// 发起一次 `GET /notes` 请求并返回 JSON 响应体
    async fn get_notes(&self, query: &NotesQuery) -> Result<Value, ApiError>;
}
