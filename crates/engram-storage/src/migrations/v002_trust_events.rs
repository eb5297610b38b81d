//! v002: Append-only trust event log.
//!
//! No foreign key to artifacts: events must survive a hard delete, and the
//! log is never updated or pruned.

use rusqlite::Connection;

use engram_core::errors::EngramResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> EngramResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS trust_events (
            id               TEXT PRIMARY KEY,
            artifact_id      TEXT NOT NULL,
            kind             TEXT NOT NULL,
            old_trust        REAL NOT NULL,
            new_trust        REAL NOT NULL,
            delta            REAL NOT NULL,
            provenance_delta REAL NOT NULL DEFAULT 0.0,
            consensus_delta  REAL NOT NULL DEFAULT 0.0,
            governance_delta REAL NOT NULL DEFAULT 0.0,
            usage_delta      REAL NOT NULL DEFAULT 0.0,
            actor            TEXT NOT NULL DEFAULT 'system',
            reason           TEXT NOT NULL DEFAULT '',
            created_at       TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_trust_events_artifact ON trust_events(artifact_id);
        CREATE INDEX IF NOT EXISTS idx_trust_events_created_at ON trust_events(created_at);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
