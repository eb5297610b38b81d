//! Aggregation counts for bank stats.

use rusqlite::Connection;

use engram_core::artifact::{ArtifactState, OutputKind};
use engram_core::errors::EngramResult;

use crate::to_storage_err;

/// Artifact counts grouped by lifecycle state. Deleted stubs count too.
pub fn count_by_state(conn: &Connection) -> EngramResult<Vec<(ArtifactState, u64)>> {
    let mut stmt = conn
        .prepare("SELECT state, COUNT(*) FROM artifacts GROUP BY state ORDER BY state")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;

    rows.into_iter()
        .map(|(state_str, count)| {
            let state = ArtifactState::parse(&state_str)
                .ok_or_else(|| to_storage_err(format!("unknown artifact state '{state_str}'")))?;
            Ok((state, count as u64))
        })
        .collect()
}

/// Artifact counts grouped by output kind, excluding deleted stubs.
pub fn count_by_kind(conn: &Connection) -> EngramResult<Vec<(OutputKind, u64)>> {
    let mut stmt = conn
        .prepare(
            "SELECT kind, COUNT(*) FROM artifacts WHERE state != 'deleted'
             GROUP BY kind ORDER BY kind",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;

    rows.into_iter()
        .map(|(kind_str, count)| {
            let kind = OutputKind::parse(&kind_str)
                .ok_or_else(|| to_storage_err(format!("unknown output kind '{kind_str}'")))?;
            Ok((kind, count as u64))
        })
        .collect()
}

/// Mean stored trust over non-deleted artifacts; 0.0 on an empty bank.
pub fn average_trust(conn: &Connection) -> EngramResult<f64> {
    conn.query_row(
        "SELECT COALESCE(AVG(trust), 0.0) FROM artifacts WHERE state != 'deleted'",
        [],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}
