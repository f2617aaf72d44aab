//! Fixture databases in the profiler's on-disk layout.

use rusqlite::{Connection, params};

pub fn create_tables(conn: &Connection) {
    conn.execute_batch(
        "
        CREATE TABLE files (
            app     TEXT,
            name    TEXT,
            fileid  INTEGER,
            \"begin\" INTEGER,
            \"end\"   INTEGER
        );
        CREATE TABLE feedback (
            filename TEXT, fileid INTEGER NOT NULL, refid INTEGER NOT NULL,
            count INTEGER, total INTEGER, totcnt INTEGER, extra INTEGER, population INTEGER
        );
        CREATE TABLE perf_feedback (
            filename TEXT, fileid INTEGER NOT NULL, refid INTEGER NOT NULL,
            count INTEGER, total INTEGER, totcnt INTEGER, extra INTEGER, population INTEGER
        );
        ",
    )
    .unwrap();
}

pub fn insert_file(conn: &Connection, app: &str, name: &str, begin: i64, end: i64) {
    conn.execute(
        "INSERT INTO files (app, name, fileid, \"begin\", \"end\") VALUES (?1, ?2, ?3, ?4, ?5)",
        params![app, name, begin, begin, end],
    )
    .unwrap();
}

pub fn insert_count(conn: &Connection, table: &str, filename: &str, refid: i64, count: i64) {
    conn.execute(
        &format!("INSERT INTO {table} (filename, fileid, refid, count) VALUES (?1, 0, ?2, ?3)"),
        params![filename, refid, count],
    )
    .unwrap();
}

/// `foo`: range (0,3), feedback {0:2, 2:5}, perf_feedback {1:1}.
/// `qux`: range (1000,1002), identical tables {1000:4, 1001:4}.
pub fn fixture_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    create_tables(&conn);

    insert_file(&conn, "foo", "foo.bc", 0, 3);
    insert_count(&conn, "feedback", "foo.bc", 0, 2);
    insert_count(&conn, "feedback", "foo.bc", 2, 5);
    insert_count(&conn, "perf_feedback", "foo.bc", 1, 1);

    insert_file(&conn, "qux", "qux.bc", 1000, 1002);
    for table in ["feedback", "perf_feedback"] {
        insert_count(&conn, table, "qux.bc", 1000, 4);
        insert_count(&conn, table, "qux.bc", 1001, 4);
    }

    conn
}
