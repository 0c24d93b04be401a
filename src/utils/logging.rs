/// 日志工具模块
///
/// 提供日志初始化和格式化输出的辅助函数
use crate::config::Config;
use crate::models::TrackStats;
use std::collections::BTreeMap;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 使用 `RUST_LOG` 控制级别，未设置时默认为 info。重复调用不会报错。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - OpenReview 评分统计");
    info!("📚 会议: {}", config.venue_domain());
    info!(
        "📊 分页大小: {} | 上限: {} | 评审并发数: {}",
        config.batch_limit,
        config
            .limit
            .map(|l| l.to_string())
            .unwrap_or_else(|| "不限".to_string()),
        config.max_concurrent_reviews
    );
    info!("{}", "=".repeat(60));
}

/// 记录阶段开始信息
///
/// # 参数
/// - `step`: 阶段编号
/// - `total`: 阶段总数
/// - `name`: 阶段名称
pub fn log_stage(step: usize, total: usize, name: &str) {
    info!("\n{}", "─".repeat(60));
    info!("📦 [{}/{}] {}", step, total, name);
    info!("{}", "─".repeat(60));
}

/// 打印各 track 的平均评分
pub fn log_track_table(tracks: &BTreeMap<String, TrackStats>) {
    info!("\n{}", "=".repeat(60));
    info!(
        "{:<28} {:>6} {:>9} {:>9} {:>9}",
        "track", "papers", "novelty", "technical", "confidence"
    );
    for (track, stats) in tracks {
        info!(
            "{:<28} {:>6} {:>9} {:>9} {:>9}",
            truncate_text(track, 28),
            stats.paper_count,
            format_score(stats.avg_novelty),
            format_score(stats.avg_technical),
            format_score(stats.avg_confidence)
        );
    }
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `papers`: 论文数量
/// - `rated`: 有评分的论文数量
/// - `failed`: 评审拉取失败数量
/// - `data_dir`: 数据目录
pub fn print_final_stats(papers: usize, rated: usize, failed: usize, data_dir: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📄 论文: {}", papers);
    info!("✅ 有评分: {}/{}", rated, papers);
    info!("❌ 评审拉取失败: {}", failed);
    info!("{}", "=".repeat(60));
    info!("\n数据已保存至: {}", data_dir);
}

/// 格式化可空评分
pub fn format_score(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.3}", v),
        None => "-".to_string(),
    }
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
