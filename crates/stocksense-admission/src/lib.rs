//! # stocksense-admission
//!
//! Sliding-window admission control, keyed per (route, caller, policy). Each write
//! route carries its own policy; a caller key is derived from proxy headers.
//! The limiter is plain owned state. Construct one and share it `Arc`-style
//! wherever the write paths live.

pub mod caller;
pub mod limiter;

pub use caller::caller_key;
pub use limiter::AdmissionLimiter;
