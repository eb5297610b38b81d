//! v001: The artifacts table. One row per stored output, any lifecycle state.

use rusqlite::Connection;

use engram_core::errors::EngramResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> EngramResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS artifacts (
            id                        TEXT PRIMARY KEY,
            loop_id                   TEXT NOT NULL,
            component                 TEXT NOT NULL,
            kind                      TEXT NOT NULL,
            result                    TEXT,
            domain                    TEXT,
            category                  TEXT,
            tags                      TEXT NOT NULL DEFAULT '[]',
            trust                     REAL NOT NULL,
            provenance                REAL NOT NULL DEFAULT 0.0,
            consensus                 REAL NOT NULL DEFAULT 0.0,
            governance                REAL NOT NULL DEFAULT 0.0,
            usage                     REAL NOT NULL DEFAULT 0.0,
            decay_curve               TEXT NOT NULL,
            half_life_hours           REAL NOT NULL,
            importance                REAL NOT NULL DEFAULT 0.5,
            access_count              INTEGER NOT NULL DEFAULT 0,
            success_count             INTEGER NOT NULL DEFAULT 0,
            failure_count             INTEGER NOT NULL DEFAULT 0,
            last_accessed_at          TEXT,
            constitutional_compliance INTEGER NOT NULL DEFAULT 1,
            requires_approval         INTEGER NOT NULL DEFAULT 0,
            state                     TEXT NOT NULL DEFAULT 'active',
            version                   INTEGER NOT NULL DEFAULT 0,
            created_at                TEXT NOT NULL,
            updated_at                TEXT NOT NULL,
            expires_at                TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_artifacts_state ON artifacts(state);
        CREATE INDEX IF NOT EXISTS idx_artifacts_component ON artifacts(component);
        CREATE INDEX IF NOT EXISTS idx_artifacts_kind ON artifacts(kind);
        CREATE INDEX IF NOT EXISTS idx_artifacts_created_at ON artifacts(created_at);
        CREATE INDEX IF NOT EXISTS idx_artifacts_expires_at ON artifacts(expires_at);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
