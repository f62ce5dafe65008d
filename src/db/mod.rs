//! Database module
//!
//! Handles SQLite connection and migrations.

pub mod connection;
pub mod migrations;

pub use connection::{Database, DbError, DbResult};

/// Current UTC time in the format stored in every timestamp column
pub fn now_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Today's local date as `YYYY-MM-DD`
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// In-memory connection with the production pragmas and schema applied
#[cfg(test)]
pub(crate) fn test_connection() -> rusqlite::Connection {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
    migrations::run_migrations(&conn).unwrap();
    conn
}
