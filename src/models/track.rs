use serde::{Deserialize, Serialize};

/// 单个 track 的平均评分
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackStats {
    /// track 下的论文数量
    pub paper_count: usize,
    /// 其中有评分的论文数量
    pub rated_count: usize,
    pub avg_novelty: Option<f64>,
    pub avg_technical: Option<f64>,
    pub avg_confidence: Option<f64>,
}

/// 落盘用的一行 track 统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackStatsRow {
    pub track: String,
    #[serde(flatten)]
    pub stats: TrackStats,
}
