//! v004: Collector sweep log, one row per sweep including dry runs.

use rusqlite::Connection;

use engram_core::errors::EngramResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> EngramResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS gc_sweep_log (
            id                   TEXT PRIMARY KEY,
            policy_name          TEXT NOT NULL,
            scanned              INTEGER NOT NULL DEFAULT 0,
            archived             INTEGER NOT NULL DEFAULT 0,
            deleted              INTEGER NOT NULL DEFAULT 0,
            skipped              INTEGER NOT NULL DEFAULT 0,
            min_trust_threshold  REAL NOT NULL,
            delete_threshold     REAL NOT NULL,
            max_age_hours        REAL NOT NULL,
            dry_run              INTEGER NOT NULL DEFAULT 0,
            error                TEXT,
            duration_ms          INTEGER NOT NULL DEFAULT 0,
            created_at           TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_sweep_log_created_at ON gc_sweep_log(created_at);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
