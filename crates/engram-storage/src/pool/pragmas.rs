//! PRAGMA configuration applied to every SQLite connection.
//!
//! WAL mode (configurable), NORMAL sync, 256MB mmap, configurable cache and
//! busy_timeout, foreign_keys ON.

use rusqlite::Connection;

use engram_core::config::StorageConfig;
use engram_core::errors::EngramResult;

use crate::to_storage_err;

/// Apply all performance and safety pragmas to the write connection.
pub fn apply_pragmas(conn: &Connection, config: &StorageConfig) -> EngramResult<()> {
    let journal_mode = if config.wal_mode { "WAL" } else { "DELETE" };
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = {journal_mode};
        PRAGMA synchronous = NORMAL;
        PRAGMA mmap_size = 268435456;
        PRAGMA cache_size = {cache};
        PRAGMA busy_timeout = {busy};
        PRAGMA foreign_keys = ON;
        ",
        cache = config.cache_size,
        busy = config.busy_timeout_ms,
    ))
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Apply read-only pragmas to a read connection.
/// Skips write-side settings (journal_mode, synchronous).
pub fn apply_read_pragmas(conn: &Connection, config: &StorageConfig) -> EngramResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA query_only = ON;
        PRAGMA mmap_size = 268435456;
        PRAGMA cache_size = {cache};
        PRAGMA busy_timeout = {busy};
        PRAGMA temp_store = MEMORY;
        ",
        cache = config.cache_size,
        busy = config.busy_timeout_ms,
    ))
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Verify that WAL mode is active on a connection.
pub fn verify_wal_mode(conn: &Connection) -> EngramResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
