//! 流水线编排 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：创建共享的 HTTP 客户端
//! 2. **阶段调度**：论文列表 → 规范化 → 评审 → 评分汇总 → track 汇总
//! 3. **产物复用**：某阶段的文件已存在时直接读取，跳过该阶段
//! 4. **全局统计**：输出 track 表格和最终统计
//!
//! 本模块不处理单篇论文的细节，具体逻辑委托给 services 和 processing。

use crate::clients::{NotesApi, OpenReviewClient};
use crate::config::Config;
use crate::error::AppResult;
use crate::models::{PaperRatingSummary, PaperRecord, RawPaperRecord, ReviewThread, TrackStats};
use crate::processing::{aggregate_by_track, process_papers, process_reviews, track_rows};
use crate::services::{PaperFetcher, ReviewFetchReport, ReviewFetcher};
use crate::storage::{read_jsonl, write_jsonl, ArtifactPaths};
use crate::utils::logging::{log_stage, log_startup, log_track_table, print_final_stats};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

const TOTAL_STAGES: usize = 5;

/// 应用主结构
pub struct App {
    config: Config,
    api: Arc<dyn NotesApi>,
    paths: ArtifactPaths,
}

/// 一次运行的结果
#[derive(Debug, Default)]
pub struct RunSummary {
    pub papers: Vec<PaperRecord>,
    pub ratings: Vec<PaperRatingSummary>,
    pub tracks: BTreeMap<String, TrackStats>,
    /// 本次运行中评审拉取失败的论文 id
    pub failed_reviews: Vec<String>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> AppResult<Self> {
        config.validate()?;
        log_startup(&config);

        let client = OpenReviewClient::new(&config)?;
        Ok(Self::with_api(config, Arc::new(client)))
    }

    /// 使用指定的数据源创建应用
    pub fn with_api(config: Config, api: Arc<dyn NotesApi>) -> Self {
        let paths = ArtifactPaths::new(&config.data_dir, &config.venue, config.year);
        Self { config, api, paths }
    }

    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    /// 运行完整流水线
    pub async fn run(&self) -> AppResult<RunSummary> {
        log_stage(1, TOTAL_STAGES, "拉取论文列表");
        let notes = self.load_or_fetch_notes().await?;

        log_stage(2, TOTAL_STAGES, "规范化论文");
        let papers = self.load_or_process_papers(&notes).await?;

        log_stage(3, TOTAL_STAGES, "拉取评审");
        let (threads, failed_reviews) = self.load_or_fetch_reviews(&papers).await?;

        log_stage(4, TOTAL_STAGES, "汇总评分");
        let ratings = self.load_or_process_ratings(&threads).await?;

        log_stage(5, TOTAL_STAGES, "按 track 汇总");
        let tracks = aggregate_by_track(&ratings);
        write_jsonl(&self.paths.tracks, &track_rows(&tracks)).await?;
        log_track_table(&tracks);

        let rated = ratings.iter().filter(|r| r.is_rated()).count();
        print_final_stats(papers.len(), rated, failed_reviews.len(), &self.config.data_dir);

        Ok(RunSummary {
            papers,
            ratings,
            tracks,
            failed_reviews,
        })
    }

    async fn load_or_fetch_notes(&self) -> AppResult<Vec<RawPaperRecord>> {
        if let Some(notes) = load_cached(&self.paths.notes).await? {
            return Ok(notes);
        }

        let fetcher = PaperFetcher::new(self.api.clone(), &self.config)?;
        let (notes, count) = fetcher.fetch_papers().await?;
        info!("✓ 从 {} 拉取 {} 条记录（接口总数 {}）", self.config.venue_domain(), notes.len(), count);

        write_jsonl(&self.paths.notes, &notes).await?;
        Ok(notes)
    }

    async fn load_or_process_papers(&self, notes: &[RawPaperRecord]) -> AppResult<Vec<PaperRecord>> {
        if let Some(papers) = load_cached(&self.paths.papers).await? {
            return Ok(papers);
        }

        let papers = process_papers(notes)?;
        info!("✓ 规范化 {} 篇论文", papers.len());

        write_jsonl(&self.paths.papers, &papers).await?;
        Ok(papers)
    }

    async fn load_or_fetch_reviews(
        &self,
        papers: &[PaperRecord],
    ) -> AppResult<(Vec<ReviewThread>, Vec<String>)> {
        if let Some(threads) = load_cached(&self.paths.reviews).await? {
            return Ok((threads, Vec::new()));
        }

        let paper_ids: Vec<String> = papers.iter().map(|p| p.id.clone()).collect();
        let fetcher = ReviewFetcher::new(self.api.clone(), &self.config);
        let report = ReviewFetchReport::from_outcomes(fetcher.fetch_reviews(&paper_ids).await?);

        info!("✓ 拉取 {} 篇论文的评审", report.threads.len());
        for (paper_id, e) in &report.failures {
            let kind = if e.is_transport() { "网络" } else { "数据格式" };
            warn!("[论文 {}] ❌ 评审缺失（{}错误）: {}", paper_id, kind, e);
        }

        write_jsonl(&self.paths.reviews, &report.threads).await?;
        let failed = report.failures.into_iter().map(|(id, _)| id).collect();
        Ok((report.threads, failed))
    }

    async fn load_or_process_ratings(
        &self,
        threads: &[ReviewThread],
    ) -> AppResult<Vec<PaperRatingSummary>> {
        if let Some(ratings) = load_cached(&self.paths.ratings).await? {
            return Ok(ratings);
        }

        let ratings = process_reviews(threads);
        write_jsonl(&self.paths.ratings, &ratings).await?;
        info!("✓ 评分已保存至 {}", self.paths.ratings.display());
        Ok(ratings)
    }
}

/// 文件存在时读取，否则返回 None
async fn load_cached<T: serde::de::DeserializeOwned>(path: &Path) -> AppResult<Option<Vec<T>>> {
    if !path.exists() {
        return Ok(None);
    }
    let records = read_jsonl(path).await?;
    info!("📁 复用已有文件 {}（{} 条）", path.display(), records.len());
    Ok(Some(records))
}
