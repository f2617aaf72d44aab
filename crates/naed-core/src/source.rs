use std::collections::HashMap;
use std::convert::Infallible;

use crate::record::{AppRange, CountRecord};

/// Read-only view of a profile database.
///
/// Implementations answer three queries: the identifier range of an
/// application, the sparse count records a table holds for an application,
/// and the list of known applications. Failures are the implementation's own
/// error type and are passed through untouched by the core.
pub trait CountSource {
    type Error;

    /// Range for `app`, or `None` when the application is unknown.
    fn range(&self, app: &str) -> Result<Option<AppRange>, Self::Error>;

    /// Every count record in `table` whose file belongs to `app`, in storage
    /// order.
    fn counts(&self, table: &str, app: &str) -> Result<Vec<CountRecord>, Self::Error>;

    /// Known application names, each once.
    fn app_names(&self) -> Result<Vec<String>, Self::Error>;
}

/// In-memory [`CountSource`], built up with the `with_*` methods.
///
/// Registering a range twice for the same application keeps the later one,
/// matching how the SQLite adapter resolves duplicate `files` rows.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    ranges: Vec<(String, AppRange)>,
    counts: HashMap<String, Vec<(String, CountRecord)>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_range(mut self, app: &str, begin: i64, end: i64) -> Self {
        self.ranges.push((app.to_string(), AppRange::new(begin, end)));
        self
    }

    pub fn with_count(mut self, table: &str, app: &str, ref_id: i64, count: f64) -> Self {
        self.counts
            .entry(table.to_string())
            .or_default()
            .push((app.to_string(), CountRecord::new(ref_id, count)));
        self
    }

    /// Register a whole sparse series at once.
    pub fn with_counts(self, table: &str, app: &str, pairs: &[(i64, f64)]) -> Self {
        pairs
            .iter()
            .fold(self, |src, &(ref_id, count)| src.with_count(table, app, ref_id, count))
    }
}

impl CountSource for MemorySource {
    type Error = Infallible;

    fn range(&self, app: &str) -> Result<Option<AppRange>, Self::Error> {
        Ok(self
            .ranges
            .iter()
            .rev()
            .find(|(name, _)| name == app)
            .map(|(_, r)| *r))
    }

    fn counts(&self, table: &str, app: &str) -> Result<Vec<CountRecord>, Self::Error> {
        Ok(self
            .counts
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|(name, _)| name == app)
                    .map(|(_, rec)| *rec)
                    .collect()
            })
            .unwrap_or_default())
    }

    fn app_names(&self) -> Result<Vec<String>, Self::Error> {
        let mut names: Vec<String> = Vec::new();
        for (name, _) in &self.ranges {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        Ok(names)
    }
}
