/// Measured table evaluated when none is named.
pub const DEFAULT_TABLE: &str = "feedback";

/// Baseline table every measured table is compared against.
pub const DEFAULT_NORM_TABLE: &str = "perf_feedback";

/// Display form of [`DistanceResult::NoData`](crate::DistanceResult::NoData).
pub const NO_DATA: &str = "-none-";

/// Display form of [`DistanceResult::LengthMismatch`](crate::DistanceResult::LengthMismatch).
pub const LENGTH_MISMATCH: &str = "-error-";
