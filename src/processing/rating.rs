//! 评分提取
//!
//! 评审 note 的评分字段形如 `"4: good"`，取第一个冒号前的整数。

use crate::error::DataError;
use crate::models::{Note, RatingSample};
use serde_json::Value;

pub const NOVELTY: &str = "novelty";
pub const SCOPE: &str = "scope";
pub const TECHNICAL_QUALITY: &str = "technical_quality";
pub const REVIEWER_CONFIDENCE: &str = "reviewer_confidence";

/// 解析单个评分值
///
/// 字符串取冒号前的整数部分（允许前后空白），JSON 整数原样接受。
pub fn parse_rating(value: &Value) -> Option<i64> {
    match value {
        Value::String(s) => s.split(':').next()?.trim().parse().ok(),
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
}

/// 从评审 note 中提取四项评分
///
/// 任一字段缺失或格式错误都会使整条 note 作废，保证四个序列等长。
pub fn extract_ratings(note: &Note, paper_id: &str) -> Result<RatingSample, DataError> {
    let field = |name: &str| -> Result<i64, DataError> {
        let raw = note.content_value(name);
        raw.and_then(parse_rating).ok_or_else(|| DataError::RatingParse {
            paper_id: paper_id.to_string(),
            field: name.to_string(),
            raw: match raw {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => "<missing>".to_string(),
            },
        })
    };

    Ok(RatingSample {
        novelty: field(NOVELTY)?,
        scope: field(SCOPE)?,
        technical_quality: field(TECHNICAL_QUALITY)?,
        reviewer_confidence: field(REVIEWER_CONFIDENCE)?,
    })
}
