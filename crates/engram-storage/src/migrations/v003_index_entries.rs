//! v003: Secondary index entries for candidate gathering.

use rusqlite::Connection;

use engram_core::errors::EngramResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> EngramResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS index_entries (
            artifact_id  TEXT NOT NULL,
            kind         TEXT NOT NULL,
            value        TEXT NOT NULL,
            weight       REAL NOT NULL DEFAULT 1.0,
            created_at   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            PRIMARY KEY (artifact_id, kind, value),
            FOREIGN KEY (artifact_id) REFERENCES artifacts(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_index_entries_lookup ON index_entries(kind, value);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
