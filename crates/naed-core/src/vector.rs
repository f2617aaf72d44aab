use std::collections::HashMap;

use crate::record::{AppRange, CountRecord, DenseVector};
use crate::source::CountSource;

/// Rebuild the dense count vector of `app` from the sparse records in `table`.
///
/// An application without a range yields an empty vector; that is a signal,
/// not an error. Only data-source failures are returned as `Err`.
pub fn reconstruct<S: CountSource + ?Sized>(
    source: &S,
    app: &str,
    table: &str,
) -> Result<DenseVector, S::Error> {
    let Some(range) = source.range(app)? else {
        return Ok(Vec::new());
    };
    let records = source.counts(table, app)?;
    Ok(densify(range, &records))
}

/// Spread sparse records over `range`, zero-filling absent identifiers.
///
/// A repeated `ref_id` keeps its last value. Records outside the range are
/// ignored.
pub fn densify(range: AppRange, records: &[CountRecord]) -> DenseVector {
    if range.is_empty() {
        return Vec::new();
    }
    let counts: HashMap<i64, f64> = records.iter().map(|r| (r.ref_id, r.count)).collect();
    range
        .indices()
        .map(|i| counts.get(&i).copied().unwrap_or(0.0))
        .collect()
}
