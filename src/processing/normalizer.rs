//! 论文规范化
//!
//! 按点分路径从原始记录中取出固定的六个字段。
//! 字段是否存在按整批记录判断：某条记录缺少的字段记为 None，
//! 整批都没有的字段才报 `MissingField`。

use crate::error::DataError;
use crate::models::{PaperRecord, RawPaperRecord};
use serde_json::Value;

const ID: &str = "id";
const TITLE: &str = "content.title.value";
const ABSTRACT: &str = "content.abstract.value";
const TRACK: &str = "content.track.value";
const KEYWORDS: &str = "content.keywords.value";
const VENUE: &str = "content.venue.value";

const PROJECTED: [&str; 6] = [ID, TITLE, ABSTRACT, TRACK, KEYWORDS, VENUE];

/// 整批缺失字段时使用的记录标识
pub const BATCH: &str = "<batch>";

/// 按点分路径查找嵌套字段
pub fn lookup_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    walk(value, path).filter(|v| !v.is_null())
}

fn walk<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, key| current.get(key))
}

/// 将原始论文记录规范化
///
/// 批内没有任何记录含有某个字段时整体失败；`id` 对每条记录都是必需的。
pub fn process_papers(raw_records: &[RawPaperRecord]) -> Result<Vec<PaperRecord>, DataError> {
    check_schema(raw_records)?;
    raw_records.iter().map(normalize_paper).collect()
}

/// 检查批内每个投影字段至少出现一次
fn check_schema(raw_records: &[RawPaperRecord]) -> Result<(), DataError> {
    if raw_records.is_empty() {
        return Ok(());
    }

    match PROJECTED
        .iter()
        .find(|path| raw_records.iter().all(|raw| walk(raw, path).is_none()))
    {
        Some(path) => Err(DataError::MissingField {
            record_id: BATCH.to_string(),
            field: path.to_string(),
        }),
        None => Ok(()),
    }
}

/// 规范化单条记录
pub fn normalize_paper(raw: &RawPaperRecord) -> Result<PaperRecord, DataError> {
    let id = lookup_path(raw, ID)
        .ok_or_else(|| DataError::MissingField {
            record_id: "<unknown>".to_string(),
            field: ID.to_string(),
        })?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(ID, "<unknown>", "string"))?;

    Ok(PaperRecord {
        title: optional_str(raw, TITLE, &id)?,
        abstract_text: optional_str(raw, ABSTRACT, &id)?,
        track: optional_str(raw, TRACK, &id)?,
        keywords: optional_keywords(raw, &id)?,
        venue: optional_str(raw, VENUE, &id)?,
        id,
    })
}

fn optional_str(raw: &Value, path: &str, record_id: &str) -> Result<Option<String>, DataError> {
    lookup_path(raw, path)
        .map(|value| {
            value
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| invalid(path, record_id, "string"))
        })
        .transpose()
}

fn optional_keywords(raw: &Value, record_id: &str) -> Result<Option<Vec<String>>, DataError> {
    let Some(value) = lookup_path(raw, KEYWORDS) else {
        return Ok(None);
    };
    let items = value
        .as_array()
        .ok_or_else(|| invalid(KEYWORDS, record_id, "array of strings"))?;

    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| invalid(KEYWORDS, record_id, "array of strings"))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn invalid(path: &str, record_id: &str, expected: &str) -> DataError {
    DataError::InvalidField {
        record_id: record_id.to_string(),
        field: path.to_string(),
        expected: expected.to_string(),
    }
}
