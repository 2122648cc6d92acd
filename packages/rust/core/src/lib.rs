//! End-to-end pipeline orchestration for sourcelens.
//!
//! Ties together source-list loading, platform markup extraction, reference
//! annotation, aggregation, and artifact writing.

pub mod aggregate;
pub mod pipeline;
pub mod report;
pub mod sources;

pub use aggregate::{RefsByIndex, aggregate};
pub use pipeline::{ProgressReporter, RunSummary, SilentProgress, run};
pub use sources::load_source_rows;
