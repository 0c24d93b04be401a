//! 数据处理层：纯函数，不做 I/O

pub mod aggregator;
pub mod normalizer;
pub mod rating;
pub mod stats;
pub mod track;

pub use aggregator::{process_reviews, summarize_thread, MISSING_TRACK};
pub use normalizer::process_papers;
pub use rating::extract_ratings;
pub use track::{aggregate_by_track, track_rows};
