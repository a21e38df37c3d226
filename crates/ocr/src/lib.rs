pub mod classify;
pub mod extract;
pub mod hash;
pub mod merge;
pub mod normalize;
pub mod parse;
pub mod pipeline;
pub mod recognizer;

pub use extract::{extract_patterns, ExtractedPatterns};
pub use hash::{scan_key, sha256_bytes, to_hex};
pub use merge::{merge, merge_at};
pub use normalize::clean_line;
pub use parse::parse_side;
pub use pipeline::{ScanError, ScanOutcome, ScanPipeline};
pub use recognizer::{MockRecognizer, OcrBackend, OcrError};
