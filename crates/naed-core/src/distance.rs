//! Normalized distance between a measured and a reference count vector.
//!
//! Each squared difference is divided by the squared spread of the two values
//! at that index, so every element that differs contributes exactly `1` and
//! elements that agree contribute `0`. The weighted sum is then divided by the
//! length inside the square root and by the square root of the length outside
//! it. That double normalization scales as `n^-3/4` against a plain RMS and is
//! kept as is: existing reports are compared on this scale.

use std::fmt;

use serde::Serialize;

use crate::constants::{LENGTH_MISMATCH, NO_DATA};

/// Outcome of comparing two reconstructed vectors.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum DistanceResult {
    Distance(f64),
    /// Both vectors are empty: the application has no range in either table.
    NoData,
    /// Vectors of different length: the two tables disagree on the range.
    LengthMismatch,
}

impl DistanceResult {
    pub fn value(&self) -> Option<f64> {
        match self {
            DistanceResult::Distance(v) => Some(*v),
            DistanceResult::NoData | DistanceResult::LengthMismatch => None,
        }
    }
}

impl fmt::Display for DistanceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // `{:?}` keeps the shortest round-trip digits and always shows a
            // fractional part, so zero renders as `0.0`.
            DistanceResult::Distance(v) => write!(f, "{v:?}"),
            DistanceResult::NoData => f.write_str(NO_DATA),
            DistanceResult::LengthMismatch => f.write_str(LENGTH_MISMATCH),
        }
    }
}

/// Per-element normalizer: squared spread of the two values, or `1` when
/// they are equal (including both zero).
pub fn element_spread(a: f64, b: f64) -> f64 {
    let m = a.max(b);
    let mm = a.min(b);
    if m == 0.0 || m == mm {
        1.0
    } else {
        (m - mm) * (m - mm)
    }
}

/// Compare `measured` against `reference` index for index.
///
/// Sentinels are checked first: both empty gives [`DistanceResult::NoData`],
/// any other length difference gives [`DistanceResult::LengthMismatch`].
pub fn normalized_distance(measured: &[f64], reference: &[f64]) -> DistanceResult {
    if measured.is_empty() && reference.is_empty() {
        return DistanceResult::NoData;
    }
    if measured.len() != reference.len() {
        return DistanceResult::LengthMismatch;
    }

    let n = measured.len() as f64;
    let weighted: f64 = measured
        .iter()
        .zip(reference)
        .map(|(&a, &b)| {
            let diff = a - b;
            diff * diff / element_spread(a, b)
        })
        .sum();

    DistanceResult::Distance((weighted / n).sqrt() / n.sqrt())
}
