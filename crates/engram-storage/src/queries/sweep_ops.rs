//! Collector sweep log rows.

use rusqlite::{params, Connection};

use engram_core::errors::EngramResult;
use engram_core::models::GcSweepLog;

use crate::to_storage_err;

pub fn insert_sweep(conn: &Connection, log: &GcSweepLog) -> EngramResult<()> {
    conn.execute(
        "INSERT INTO gc_sweep_log (
            id, policy_name, scanned, archived, deleted, skipped,
            min_trust_threshold, delete_threshold, max_age_hours,
            dry_run, error, duration_ms, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            log.id,
            log.policy_name,
            log.scanned,
            log.archived,
            log.deleted,
            log.skipped,
            log.min_trust_threshold,
            log.delete_threshold,
            log.max_age_hours,
            log.dry_run as i32,
            log.error,
            log.duration_ms,
            log.created_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Most recent sweeps first.
pub fn recent_sweeps(conn: &Connection, limit: usize) -> EngramResult<Vec<GcSweepLog>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, policy_name, scanned, archived, deleted, skipped,
                    min_trust_threshold, delete_threshold, max_age_hours,
                    dry_run, error, duration_ms, created_at
             FROM gc_sweep_log
             ORDER BY created_at DESC, rowid DESC
             LIMIT ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![limit as i64], |row| Ok(row_to_sweep(row)))
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.into_iter().collect()
}

fn row_to_sweep(row: &rusqlite::Row<'_>) -> EngramResult<GcSweepLog> {
    let created_at_str: String = row.get(12).map_err(|e| to_storage_err(e.to_string()))?;
    let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|e| to_storage_err(format!("parse datetime '{created_at_str}': {e}")))?;

    Ok(GcSweepLog {
        id: row.get(0).map_err(|e| to_storage_err(e.to_string()))?,
        policy_name: row.get(1).map_err(|e| to_storage_err(e.to_string()))?,
        scanned: row
            .get::<_, i64>(2)
            .map_err(|e| to_storage_err(e.to_string()))? as u64,
        archived: row
            .get::<_, i64>(3)
            .map_err(|e| to_storage_err(e.to_string()))? as u64,
        deleted: row
            .get::<_, i64>(4)
            .map_err(|e| to_storage_err(e.to_string()))? as u64,
        skipped: row
            .get::<_, i64>(5)
            .map_err(|e| to_storage_err(e.to_string()))? as u64,
        min_trust_threshold: row.get(6).map_err(|e| to_storage_err(e.to_string()))?,
        delete_threshold: row.get(7).map_err(|e| to_storage_err(e.to_string()))?,
        max_age_hours: row.get(8).map_err(|e| to_storage_err(e.to_string()))?,
        dry_run: row
            .get::<_, i32>(9)
            .map_err(|e| to_storage_err(e.to_string()))?
            != 0,
        error: row.get(10).map_err(|e| to_storage_err(e.to_string()))?,
        duration_ms: row
            .get::<_, i64>(11)
            .map_err(|e| to_storage_err(e.to_string()))? as u64,
        created_at,
    })
}
