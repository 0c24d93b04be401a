//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (阶段调度 + 产物复用)
//!     ↓
//! services (能力层：分页拉取论文 / 并发拉取评审)
//!     ↓
//! clients (NotesApi：OpenReview HTTP / 内存数据源)
//!
//! processing (纯函数：规范化 / 评分提取 / 汇总)
//! storage (JSON Lines 产物)
//! ```

pub mod pipeline;

pub use pipeline::{App, RunSummary};
