//! 评审汇总
//!
//! 遍历每篇论文 forum 中的 note：投稿 note 提供 id/标题/track，
//! 评审 note 提供四项评分，最后计算均值和样本标准差。

use crate::models::{PaperRatingSummary, RatingSet, ReviewThread};
use crate::processing::rating::extract_ratings;
use crate::processing::stats::{mean, sample_stdev};
use tracing::warn;

/// 缺少 track 时使用的占位值
pub const MISSING_TRACK: &str = "N/A";

/// 汇总所有论文的评分，输出顺序与输入一致
pub fn process_reviews(threads: &[ReviewThread]) -> Vec<PaperRatingSummary> {
    threads.iter().map(summarize_thread).collect()
}

/// 汇总单篇论文的评分
pub fn summarize_thread(thread: &ReviewThread) -> PaperRatingSummary {
    // 评审 note 可能排在投稿 note 之前，日志用的 id 先行确定
    let label = thread_label(thread);
    let mut paper_id: Option<String> = None;
    let mut title = String::new();
    let mut track = String::new();
    let mut ratings = RatingSet::default();

    for note in &thread.notes {
        if note.is_submission() {
            title = note.content_str("title").unwrap_or_default().to_string();
            paper_id = note.id.clone();
            track = match note.content_str("track") {
                Some(t) => t.to_string(),
                None => {
                    warn!("[论文 {}] 未找到 track，使用 {}", label, MISSING_TRACK);
                    MISSING_TRACK.to_string()
                }
            };
        } else if note.is_review() {
            match extract_ratings(note, &label) {
                Ok(sample) => ratings.push(sample),
                Err(e) => warn!(
                    "[论文 {}] 跳过评审 {}: {}",
                    label,
                    note.id.as_deref().unwrap_or("?"),
                    e
                ),
            }
        }
    }

    build_summary(paper_id, title, track, &ratings)
}

/// 线程所属论文的 id：优先取投稿 note，其次取任一 note 的 forum
fn thread_label(thread: &ReviewThread) -> String {
    thread
        .notes
        .iter()
        .find(|note| note.is_submission())
        .and_then(|note| note.id.as_deref())
        .or_else(|| thread.notes.iter().find_map(|note| note.forum()))
        .unwrap_or("<unknown>")
        .to_string()
}

fn build_summary(
    id: Option<String>,
    title: String,
    track: String,
    ratings: &RatingSet,
) -> PaperRatingSummary {
    let mut summary = PaperRatingSummary {
        id,
        title,
        track,
        ..Default::default()
    };

    if ratings.is_empty() {
        return summary;
    }

    summary.avg_novelty = mean(&ratings.novelty);
    summary.std_novelty = sample_stdev(&ratings.novelty);
    summary.avg_technical = mean(&ratings.technical_quality);
    summary.std_technical = sample_stdev(&ratings.technical_quality);
    summary.avg_scope = mean(&ratings.scope);
    summary.std_scope = sample_stdev(&ratings.scope);
    summary.avg_confidence = mean(&ratings.reviewer_confidence);
    summary.std_confidence = sample_stdev(&ratings.reviewer_confidence);
    summary
}
