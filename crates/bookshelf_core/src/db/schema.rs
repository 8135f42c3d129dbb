//! Catalog schema bootstrap.
//!
//! # Responsibility
//! - Create the `books` table when it is absent.
//!
//! # Invariants
//! - Schema creation is create-if-absent and never drops or alters data.
//! - `id` uses `AUTOINCREMENT`, so deleted ids are never handed out again.

use super::DbResult;
use rusqlite::Connection;

/// Name of the single catalog table.
pub const BOOKS_TABLE: &str = "books";

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Ensures the catalog table exists on `conn`.
///
/// Safe to call any number of times.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Returns whether `table_name` exists in the connected database.
pub fn table_exists(conn: &Connection, table_name: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table_name],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
