//! Commit classification and per-commit aggregation into release-note entries

pub mod aggregator;
pub mod classifier;

pub use aggregator::{aggregate_commit, CommitNotesBuilder};
pub use classifier::{classify_line, Classification, LineClass};
