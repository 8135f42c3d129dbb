//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection settings required by core behavior.
//! - Ensure the catalog schema before returning a bootstrapped connection.
//!
//! # Invariants
//! - Returned connections have a busy timeout, so lock contention surfaces
//!   as an error instead of blocking forever.
//! - Returned connections have the `fold_case` SQL function registered.
//! - `open_db*` connections have the schema in place.

use super::schema::ensure_schema;
use super::{DbError, DbResult};
use log::{debug, error, info};
use rusqlite::functions::FunctionFlags;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQL name of the Unicode lowercase function used by keyword search.
///
/// SQLite's built-in `lower()` and `LIKE` fold ASCII letters only.
pub const FOLD_CASE_FN: &str = "fold_case";

/// Opens (creating if needed) a SQLite database file and ensures the schema.
///
/// # Side effects
/// - Creates the backing file on first run.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    let started_at = Instant::now();
    let created = !path.exists();
    info!("event=db_open module=db status=start mode=file created={created}");

    let conn = match Connection::open(path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=file duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    finish_bootstrap(conn, "file", started_at)
}

/// Opens an in-memory SQLite database and ensures the schema.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");

    let conn = match Connection::open_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=memory duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    finish_bootstrap(conn, "memory", started_at)
}

/// Opens a read-write connection to an existing, already bootstrapped file.
///
/// Used for per-operation connections. The file is never created here.
pub fn connect_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    if !path.exists() {
        error!("event=db_connect module=db status=error error_code=db_file_missing");
        return Err(DbError::MissingBackingFile(path.to_path_buf()));
    }

    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .inspect_err(|err| {
        error!("event=db_connect module=db status=error error_code=db_open_failed error={err}");
    })?;
    configure_connection(&conn)?;
    debug!("event=db_connect module=db status=ok");
    Ok(conn)
}

fn finish_bootstrap(conn: Connection, mode: &str, started_at: Instant) -> DbResult<Connection> {
    match bootstrap_connection(&conn) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &Connection) -> DbResult<()> {
    configure_connection(conn)?;
    ensure_schema(conn)?;
    Ok(())
}

fn configure_connection(conn: &Connection) -> DbResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.create_scalar_function(
        FOLD_CASE_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| Ok(ctx.get::<String>(0)?.to_lowercase()),
    )?;
    Ok(())
}
