//! # stocksense-ingest
//!
//! The write pipeline. Every mutation of the availability data flows through
//! here in one fixed order: admission gate → boundary validation → entity
//! resolution → immutable observation insert → synchronous consensus
//! recompute. A rejection at any stage leaves no trace; a success returns
//! only after the pair's aggregate reflects the new observation.

pub mod pipeline;
pub mod submission;

pub use pipeline::{ImportSummary, IngestPipeline, ReportOutcome};
pub use submission::{ImportRecord, LocationRef, ReportSubmission};
