//! Candidate retrieval over product workbooks
//!
//! Components:
//! - Columns: resolve label/description/destination headers per sheet
//! - Scorer: token containment scoring of a single row
//! - Aggregator: collect, widen, rank and trim candidates
//! - Filter: sheet-level name/content filter backed by an explicit cache

pub mod aggregator;
pub mod columns;
pub mod filter;
pub mod scorer;

// Re-export key types
pub use aggregator::{Candidate, CandidateAggregator, SearchOutcome, MAX_CANDIDATES};
pub use columns::{pick_column, FieldColumns};
pub use filter::{filter_index, SheetCache};
pub use scorer::{score_row, tokenize};
