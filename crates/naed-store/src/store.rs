use std::cell::RefCell;
use std::collections::HashSet;
use std::path::Path;

use rusqlite::{Connection, OpenFlags, OptionalExtension};

use naed_core::{AppRange, CountRecord, CountSource};

use crate::error::{Result, StoreError};
use crate::schema;

/// Read-only handle on a profiler database.
pub struct Store {
    conn: Connection,
    /// Count tables whose columns have already been checked.
    checked_tables: RefCell<HashSet<String>>,
}

impl Store {
    /// Open an existing database without write access. A missing file is an
    /// error, never an empty database.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        tracing::info!("opened {} read-only", path.display());
        Self::from_connection(conn)
    }

    /// Wrap an already open connection after checking the `files` table.
    pub fn from_connection(conn: Connection) -> Result<Self> {
        schema::configure(&conn)?;
        schema::check_files_table(&conn)?;
        Ok(Self {
            conn,
            checked_tables: RefCell::new(HashSet::new()),
        })
    }

    // --- Ranges ---

    /// `[begin, end)` for `app`. With several `files` rows for the same app
    /// the most recently inserted one is used.
    pub fn get_range(&self, app: &str) -> Result<Option<AppRange>> {
        let row: Option<(Option<i64>, Option<i64>)> = self
            .conn
            .query_row(
                "SELECT \"begin\", \"end\" FROM files WHERE app = ?1 ORDER BY rowid DESC LIMIT 1",
                [app],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        match row {
            None => {
                tracing::debug!("no range for app '{app}'");
                Ok(None)
            }
            Some((Some(begin), Some(end))) => {
                let range = AppRange::new(begin, end);
                if range.len() > schema::MAX_RANGE_LEN {
                    return Err(StoreError::InvalidData(format!(
                        "range [{begin}, {end}) for app '{app}' spans {} ids, limit is {}",
                        range.len(),
                        schema::MAX_RANGE_LEN
                    )));
                }
                tracing::debug!("range for app '{app}': [{begin}, {end})");
                Ok(Some(range))
            }
            Some(_) => Err(StoreError::InvalidData(format!(
                "files row for app '{app}' has a NULL begin or end"
            ))),
        }
    }

    // --- Counts ---

    /// Count records in `table` for every file registered to `app`, in
    /// insertion order. Rows with a NULL count are skipped.
    pub fn get_counts(&self, table: &str, app: &str) -> Result<Vec<CountRecord>> {
        self.ensure_count_table(table)?;

        let sql = format!(
            "SELECT refid, count FROM {} \
             WHERE filename IN (SELECT name FROM files WHERE app = ?1) \
             ORDER BY rowid",
            schema::quote_ident(table)
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows: Vec<(i64, Option<f64>)> = stmt
            .query_map([app], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<_, _>>()?;

        let total = rows.len();
        let records: Vec<CountRecord> = rows
            .into_iter()
            .filter_map(|(ref_id, count)| count.map(|c| CountRecord::new(ref_id, c)))
            .collect();

        tracing::debug!(
            "{table}: {} count records for app '{app}' ({} NULL skipped)",
            records.len(),
            total - records.len()
        );
        Ok(records)
    }

    /// Check `table` once per store; failures are not remembered.
    fn ensure_count_table(&self, table: &str) -> Result<()> {
        if self.checked_tables.borrow().contains(table) {
            return Ok(());
        }
        schema::check_count_table(&self.conn, table)?;
        self.checked_tables.borrow_mut().insert(table.to_string());
        Ok(())
    }

    // --- Applications ---

    /// Distinct application names in the order they first appear in `files`.
    pub fn list_app_names(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT app FROM files WHERE app IS NOT NULL GROUP BY app ORDER BY MIN(rowid)",
        )?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(names)
    }
}

impl CountSource for Store {
    type Error = StoreError;

    fn range(&self, app: &str) -> Result<Option<AppRange>> {
        self.get_range(app)
    }

    fn counts(&self, table: &str, app: &str) -> Result<Vec<CountRecord>> {
        self.get_counts(table, app)
    }

    fn app_names(&self) -> Result<Vec<String>> {
        self.list_app_names()
    }
}
