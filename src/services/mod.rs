pub mod paper_fetcher;
pub mod review_fetcher;

pub use paper_fetcher::PaperFetcher;
pub use review_fetcher::{ReviewFetchOutcome, ReviewFetchReport, ReviewFetcher};
