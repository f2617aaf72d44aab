//! Read-side schema checks for a profiler database.
//!
//! The profiler owns the schema; this crate only verifies that the columns it
//! reads are present and that table names are safe to splice into SQL.

use std::sync::LazyLock;

use regex::Regex;
use rusqlite::Connection;

use crate::error::{Result, StoreError};

/// Table mapping each application to its files and reference-id range.
pub const FILES_TABLE: &str = "files";

pub const FILES_COLUMNS: [&str; 4] = ["app", "name", "begin", "end"];

pub const COUNT_COLUMNS: [&str; 3] = ["filename", "refid", "count"];

/// Widest `[begin, end)` span accepted from `files`. Dense vectors are
/// allocated in full, so a corrupt row must not reach reconstruction.
pub const MAX_RANGE_LEN: usize = u32::MAX as usize;

/// Milliseconds to wait on a database the profiler is still writing.
pub const BUSY_TIMEOUT_MS: i64 = 5000;

static TABLE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

pub fn configure(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "busy_timeout", BUSY_TIMEOUT_MS)?;
    Ok(())
}

/// Reject anything that is not a plain identifier.
pub fn validate_table_name(name: &str) -> Result<()> {
    if TABLE_NAME.is_match(name) {
        Ok(())
    } else {
        Err(StoreError::InvalidTable(name.to_string()))
    }
}

/// Double-quote a validated identifier.
pub fn quote_ident(name: &str) -> String {
    format!("\"{name}\"")
}

/// Column names of `table`, or `MissingTable` if it does not exist.
pub fn table_columns(conn: &Connection, table: &str) -> Result<Vec<String>> {
    validate_table_name(table)?;
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", quote_ident(table)))?;
    let columns: Vec<String> = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<std::result::Result<_, _>>()?;

    if columns.is_empty() {
        return Err(StoreError::MissingTable(table.to_string()));
    }
    Ok(columns)
}

fn require_columns(conn: &Connection, table: &str, required: &[&str]) -> Result<()> {
    let columns = table_columns(conn, table)?;
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|want| !columns.iter().any(|c| c.eq_ignore_ascii_case(want)))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(StoreError::InvalidData(format!(
            "table '{table}' lacks column(s): {}",
            missing.join(", ")
        )))
    }
}

pub fn check_files_table(conn: &Connection) -> Result<()> {
    require_columns(conn, FILES_TABLE, &FILES_COLUMNS)
}

pub fn check_count_table(conn: &Connection, table: &str) -> Result<()> {
    require_columns(conn, table, &COUNT_COLUMNS)
}
