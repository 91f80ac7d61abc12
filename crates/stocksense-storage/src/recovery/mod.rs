//! Corruption detection and recovery helpers for the live database.
//!
//! All three entry points take a raw connection; reach them through
//! `engine.pool().writer` so they serialize against normal writes.

pub mod backup;
pub mod integrity_check;
pub mod wal_recovery;
