//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas required by repository behavior.
//! - Trigger schema migrations before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Returned connections have migrations fully applied.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use crate::config::{DatabaseTarget, DbConfig, DEFAULT_BUSY_TIMEOUT_MS};
use log::{error, info, warn};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens a SQLite database file and applies all pending migrations.
///
/// # Side effects
/// - Creates the file when it does not exist.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    open_with("file", default_busy_timeout(), || Connection::open(path))
}

/// Opens an in-memory SQLite database and applies all pending migrations.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", default_busy_timeout(), Connection::open_in_memory)
}

/// Opens the database described by `config`.
pub fn open_db_with_config(config: &DbConfig) -> DbResult<Connection> {
    let busy_timeout = Duration::from_millis(config.busy_timeout_ms);
    match &config.database {
        DatabaseTarget::Memory => open_with("memory", busy_timeout, Connection::open_in_memory),
        DatabaseTarget::File(path) => {
            open_with("file", busy_timeout, || Connection::open(path.as_path()))
        }
    }
}

/// Opens the database named by `SALESDB_CONFIG` / `SALESDB_PATH`.
///
/// # Errors
/// - `DbError::Config` when the environment does not describe a database.
pub fn open_db_from_env() -> DbResult<Connection> {
    open_db_with_lookup(|key| std::env::var(key).ok())
}

/// Same as [`open_db_from_env`] with an injectable variable source.
pub fn open_db_with_lookup<F>(lookup: F) -> DbResult<Connection>
where
    F: Fn(&str) -> Option<String>,
{
    let config = DbConfig::from_lookup(lookup)?;
    open_db_with_config(&config)
}

/// Closes a connection, surfacing errors that a plain drop would swallow.
///
/// # Errors
/// - `DbError::Sqlite` when SQLite refuses to close (e.g. unfinalized statements).
pub fn close_db(conn: Connection) -> DbResult<()> {
    match conn.close() {
        Ok(()) => {
            info!("event=db_close module=db status=ok");
            Ok(())
        }
        Err((_conn, err)) => {
            warn!(
                "event=db_close module=db status=error error_code=db_close_failed error={}",
                err
            );
            Err(DbError::Sqlite(err))
        }
    }
}

fn open_with<F>(mode: &'static str, busy_timeout: Duration, open: F) -> DbResult<Connection>
where
    F: FnOnce() -> rusqlite::Result<Connection>,
{
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let mut conn = match open() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&mut conn, busy_timeout) {
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

fn bootstrap_connection(conn: &mut Connection, busy_timeout: Duration) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(busy_timeout)?;
    apply_migrations(conn)?;
    Ok(())
}

fn default_busy_timeout() -> Duration {
    Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS)
}
