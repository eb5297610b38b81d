//! Ordered schema migrations, tracked in `schema_version`.
//!
//! Each migration is idempotent DDL; `run_migrations` applies everything
//! above the recorded version and stamps the table as it goes.

mod v001_artifacts;
mod v002_trust_events;
mod v003_index_entries;
mod v004_sweep_log;

use rusqlite::{params, Connection};

use engram_core::errors::{EngramResult, StorageError};

use crate::to_storage_err;

type Migration = fn(&Connection) -> EngramResult<()>;

const MIGRATIONS: &[(u32, Migration)] = &[
    (1, v001_artifacts::migrate),
    (2, v002_trust_events::migrate),
    (3, v003_index_entries::migrate),
    (4, v004_sweep_log::migrate),
];

/// Apply all pending migrations on the write connection.
pub fn run_migrations(conn: &Connection) -> EngramResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS schema_version (
            version     INTEGER PRIMARY KEY,
            applied_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let current = current_version(conn)?;
    for (version, migrate) in MIGRATIONS {
        if *version <= current {
            continue;
        }
        if let Err(e) = migrate(conn) {
            return Err(StorageError::MigrationFailed {
                version: *version,
                reason: e.to_string(),
            }
            .into());
        }
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            params![version],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        tracing::debug!(version, "applied schema migration");
    }
    Ok(())
}

/// Highest applied migration version, 0 on a fresh database.
pub fn current_version(conn: &Connection) -> EngramResult<u32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}
