//! # stocksense-consensus
//!
//! Derives one (status, confidence, last-verified) verdict per
//! (item, location) pair from its recent observations. Each observation
//! contributes `source_weight × decay_factor`; the status bucket with the
//! strictly greatest sum wins, with ties falling to the earliest variant in
//! the status enum's order.

pub mod engine;
pub mod formula;
pub mod weights;

pub use engine::ConsensusEngine;
pub use formula::Verdict;
