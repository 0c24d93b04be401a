use crate::error::{AppError, AppResult, FileError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tokio::fs;

/// 写入 JSON Lines 文件（每行一条记录），会自动创建父目录
pub async fn write_jsonl<T: Serialize>(path: &Path, records: &[T]) -> AppResult<()> {
    let display = path.display().to_string();

    let mut content = String::new();
    for record in records {
        let line = serde_json::to_string(record)
            .map_err(|e| AppError::file_write_failed(&display, e))?;
        content.push_str(&line);
        content.push('\n');
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::file_write_failed(&display, e))?;
        }
    }

    fs::write(path, content)
        .await
        .map_err(|e| AppError::file_write_failed(&display, e))
}

/// 读取 JSON Lines 文件，跳过空行
pub async fn read_jsonl<T: DeserializeOwned>(path: &Path) -> AppResult<Vec<T>> {
    let display = path.display().to_string();
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(&display, e))?;

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|source| {
                AppError::File(FileError::JsonLineParseFailed {
                    path: display.clone(),
                    line: idx + 1,
                    source,
                })
            })
        })
        .collect()
}
