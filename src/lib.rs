//! # OpenReview Stats
//!
//! 从 OpenReview 拉取会议论文及评审，统计每篇论文和每个 track 的评分
//!
//! ## 架构设计
//!
//! ### ① 接入层（Clients）
//! - `clients/` - `NotesApi` 抽象及其实现
//! - `OpenReviewClient` - 基于 reqwest 的 HTTP 客户端，连接池在任务间共享
//! - `InMemoryNotesApi` - 内存数据源
//!
//! ### ② 业务能力层（Services）
//! - `PaperFetcher` - 串行分页拉取论文列表
//! - `ReviewFetcher` - 受限并发拉取每篇论文的评审
//!
//! ### ③ 处理层（Processing）
//! - `process_papers` - 论文字段投影
//! - `process_reviews` - 评分提取与单篇汇总
//! - `aggregate_by_track` - track 级汇总
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator::App` - 阶段调度、产物读写、统计输出
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod processing;
pub mod services;
pub mod storage;
pub mod utils;

// 重新导出常用类型
pub use clients::{InMemoryNotesApi, NotesApi, NotesQuery, OpenReviewClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{PaperRatingSummary, PaperRecord, ReviewThread, TrackStats};
pub use orchestrator::{App, RunSummary};
pub use processing::{aggregate_by_track, process_papers, process_reviews};
pub use services::{PaperFetcher, ReviewFetchReport, ReviewFetcher};
