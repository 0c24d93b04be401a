use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 单篇论文的 forum 响应：投稿 note 与评审 note 混排
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewThread {
    pub notes: Vec<Note>,
    /// 其余字段原样保留，便于落盘
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// OpenReview 的一条 note
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub content: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Note {
    /// 读取 `content.<key>.value`
    pub fn content_value(&self, key: &str) -> Option<&Value> {
        self.content.get(key).and_then(|field| field.get("value"))
    }

    /// 读取 `content.<key>.value` 的字符串形式
    pub fn content_str(&self, key: &str) -> Option<&str> {
        self.content_value(key).and_then(Value::as_str)
    }

    /// 含 title 字段的是投稿 note
    pub fn is_submission(&self) -> bool {
        self.content.contains_key("title")
    }

    /// 所属 forum 的 id（即投稿 note 的 id）
    pub fn forum(&self) -> Option<&str> {
        self.extra.get("forum").and_then(Value::as_str)
    }

    /// 含 novelty 字段的是评审 note
    pub fn is_review(&self) -> bool {
        self.content.contains_key("novelty")
    }
}

/// 单条评审给出的四项评分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingSample {
    pub novelty: i64,
    pub scope: i64,
    pub technical_quality: i64,
    pub reviewer_confidence: i64,
}

/// 一篇论文所有评审的评分序列，四个序列长度始终一致
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingSet {
    pub novelty: Vec<i64>,
    pub scope: Vec<i64>,
    pub technical_quality: Vec<i64>,
    pub reviewer_confidence: Vec<i64>,
}

impl RatingSet {
    pub fn push(&mut self, sample: RatingSample) {
        self.novelty.push(sample.novelty);
        self.scope.push(sample.scope);
        self.technical_quality.push(sample.technical_quality);
        self.reviewer_confidence.push(sample.reviewer_confidence);
    }

    pub fn len(&self) -> usize {
        self.novelty.len()
    }

    pub fn is_empty(&self) -> bool {
        self.novelty.is_empty()
    }
}

/// 单篇论文的评分汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaperRatingSummary {
    pub id: Option<String>,
    pub title: String,
    pub track: String,
    pub avg_novelty: Option<f64>,
    pub std_novelty: Option<f64>,
    pub avg_technical: Option<f64>,
    pub std_technical: Option<f64>,
    pub avg_scope: Option<f64>,
    pub std_scope: Option<f64>,
    pub avg_confidence: Option<f64>,
    pub std_confidence: Option<f64>,
}

impl PaperRatingSummary {
    /// 是否有至少一条评审评分
    pub fn is_rated(&self) -> bool {
        self.avg_novelty.is_some()
    }
}
