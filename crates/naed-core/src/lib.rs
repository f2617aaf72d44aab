//! Normalized accuracy distance between sparse profile count tables.
//!
//! A profiler records, per application, how often each reference identifier
//! (an instruction or line offset) was hit. Counts are stored sparsely and
//! scoped to an application's `[begin, end)` identifier range. This crate
//! rebuilds dense vectors from those sparse records and scores a measured
//! table against a reference table with a per-element normalized RMS distance.
//!
//! Zero I/O: data arrives through the [`CountSource`] trait.

pub mod constants;
pub mod distance;
pub mod record;
pub mod report;
pub mod source;
pub mod vector;

pub use constants::{DEFAULT_NORM_TABLE, DEFAULT_TABLE, LENGTH_MISMATCH, NO_DATA};
pub use distance::{DistanceResult, element_spread, normalized_distance};
pub use record::{AppRange, CountRecord, DenseVector};
pub use report::{Report, ReportRow, TableResult, evaluate};
pub use source::{CountSource, MemorySource};
pub use vector::{densify, reconstruct};
