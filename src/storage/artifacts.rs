use std::path::{Path, PathBuf};

/// 各阶段产物的文件路径
///
/// 文件名前缀取会议 ID 最后一段加年份，例如 `TheWebConf_2025`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// 原始论文记录
    pub notes: PathBuf,
    /// 规范化后的论文
    pub papers: PathBuf,
    /// 原始 forum 响应
    pub reviews: PathBuf,
    /// 单篇论文评分汇总
    pub ratings: PathBuf,
    /// track 汇总
    pub tracks: PathBuf,
}

impl ArtifactPaths {
    pub fn new(data_dir: impl AsRef<Path>, venue: &str, year: u32) -> Self {
        let dir = data_dir.as_ref();
        let short_venue = venue.rsplit('/').next().unwrap_or(venue);
        let prefix = format!("{}_{}", short_venue, year);

        Self {
            notes: dir.join(format!("{}_notes.jsonl", prefix)),
            papers: dir.join(format!("{}_papers.json", prefix)),
            reviews: dir.join(format!("{}_reviews.json", prefix)),
            ratings: dir.join(format!("{}_ratings.json", prefix)),
            tracks: dir.join(format!("{}_tracks.json", prefix)),
        }
    }
}
