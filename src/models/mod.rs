pub mod paper;
pub mod review;
pub mod track;

pub use paper::{PaperRecord, RawPaperRecord};
pub use review::{Note, PaperRatingSummary, RatingSample, RatingSet, ReviewThread};
pub use track::{TrackStats, TrackStatsRow};
