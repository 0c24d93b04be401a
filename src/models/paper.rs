use serde::{Deserialize, Serialize};

/// API 返回的原始论文记录（原样保存，不做结构约束）
pub type RawPaperRecord = serde_json::Value;

/// 规范化后的论文信息
///
/// 除 `id` 外的字段在单条记录上可以缺失（写出为 null），
/// 只有整批记录都没有某个字段时才视为错误。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperRecord {
    pub id: String,
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub track: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub venue: Option<String>,
}
