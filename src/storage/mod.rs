pub mod artifacts;
pub mod jsonl;

pub use artifacts::ArtifactPaths;
pub use jsonl::{read_jsonl, write_jsonl};
