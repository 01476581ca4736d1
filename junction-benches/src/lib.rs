//! Benchmark support crate for junction.
//!
//! Provides seeded synthetic point sets and parameter labels shared by the
//! Criterion benchmarks for edge construction, the merge walk, and the bridge
//! search.

pub mod error;
pub mod source;
