#![warn(missing_docs)]
//! Benchmark input model for `benchstat`.
//!
//! Parses the textual output of benchmark runs and groups repeated
//! measurements of the same benchmark into per-(file, benchmark, unit)
//! samples with outlier-filtered summary statistics.

mod collection;
mod parse;

pub use collection::{BenchKey, BenchStat, Collection};
pub use parse::{parse, Measurement};
