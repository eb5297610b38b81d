//! Secondary index entry writes and lookups.

use rusqlite::{params, Connection};

use engram_core::errors::EngramResult;
use engram_core::models::{IndexEntry, IndexKind};

use crate::to_storage_err;

/// Insert index entries. Duplicate `(artifact_id, kind, value)` rows are
/// ignored so repeated tags never fail a store.
pub fn insert_entries(conn: &Connection, entries: &[IndexEntry]) -> EngramResult<()> {
    for entry in entries {
        conn.execute(
            "INSERT OR IGNORE INTO index_entries (artifact_id, kind, value, weight)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                entry.artifact_id,
                entry.kind.as_str(),
                entry.value,
                entry.weight
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    }
    Ok(())
}

/// Artifact ids carrying an entry `(kind, value)`, in insertion order.
pub fn lookup(conn: &Connection, kind: IndexKind, value: &str) -> EngramResult<Vec<String>> {
    let mut stmt = conn
        .prepare(
            "SELECT artifact_id FROM index_entries WHERE kind = ?1 AND value = ?2
             ORDER BY rowid ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let ids = stmt
        .query_map(params![kind.as_str(), value], |row| {
            row.get::<_, String>(0)
        })
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(ids)
}

/// Drop every index entry for an artifact (part of the Deleted purge).
pub fn delete_for_artifact(conn: &Connection, artifact_id: &str) -> EngramResult<()> {
    conn.execute(
        "DELETE FROM index_entries WHERE artifact_id = ?1",
        params![artifact_id],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
