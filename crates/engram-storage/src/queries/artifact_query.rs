//! State-filtered listings, oldest first.

use rusqlite::{params_from_iter, Connection};

use engram_core::artifact::{Artifact, ArtifactState};
use engram_core::errors::EngramResult;

use crate::queries::artifact_crud::{row_to_artifact, ARTIFACT_COLUMNS};
use crate::to_storage_err;

fn placeholders(n: usize) -> String {
    (1..=n)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Reference ids in any of `states`, oldest first.
pub fn ids_by_state(conn: &Connection, states: &[ArtifactState]) -> EngramResult<Vec<String>> {
    if states.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "SELECT id FROM artifacts WHERE state IN ({}) ORDER BY created_at ASC, rowid ASC",
        placeholders(states.len())
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let ids = stmt
        .query_map(params_from_iter(states.iter().map(|s| s.as_str())), |row| {
            row.get::<_, String>(0)
        })
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(ids)
}

/// Full artifacts in any of `states`, oldest first.
pub fn query_by_state(conn: &Connection, states: &[ArtifactState]) -> EngramResult<Vec<Artifact>> {
    if states.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "SELECT {ARTIFACT_COLUMNS} FROM artifacts WHERE state IN ({}) \
         ORDER BY created_at ASC, rowid ASC",
        placeholders(states.len())
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params_from_iter(states.iter().map(|s| s.as_str())), |row| {
            Ok(row_to_artifact(row))
        })
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.into_iter().collect()
}
