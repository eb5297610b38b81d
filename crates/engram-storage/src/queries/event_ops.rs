//! Trust event log: append within the caller's transaction, list in order.

use rusqlite::{params, Connection};

use engram_core::errors::EngramResult;
use engram_core::models::{SignalDeltas, TrustEvent, TrustEventKind};

use crate::to_storage_err;

/// Append one event. Callers run this inside the transaction that carries
/// the matching artifact mutation.
pub fn append_event(conn: &Connection, event: &TrustEvent) -> EngramResult<()> {
    conn.execute(
        "INSERT INTO trust_events (
            id, artifact_id, kind, old_trust, new_trust, delta,
            provenance_delta, consensus_delta, governance_delta, usage_delta,
            actor, reason, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            event.id,
            event.artifact_id,
            event.kind.as_str(),
            event.old_trust,
            event.new_trust,
            event.delta,
            event.signal_deltas.provenance,
            event.signal_deltas.consensus,
            event.signal_deltas.governance,
            event.signal_deltas.usage,
            event.actor,
            event.reason,
            event.created_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Full event history for an artifact, oldest first.
pub fn events_for_artifact(conn: &Connection, artifact_id: &str) -> EngramResult<Vec<TrustEvent>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, artifact_id, kind, old_trust, new_trust, delta,
                    provenance_delta, consensus_delta, governance_delta, usage_delta,
                    actor, reason, created_at
             FROM trust_events WHERE artifact_id = ?1
             ORDER BY created_at ASC, rowid ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![artifact_id], |row| Ok(row_to_event(row)))
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.into_iter().collect()
}

fn row_to_event(row: &rusqlite::Row<'_>) -> EngramResult<TrustEvent> {
    let kind_str: String = row.get(2).map_err(|e| to_storage_err(e.to_string()))?;
    let kind = TrustEventKind::parse(&kind_str)
        .ok_or_else(|| to_storage_err(format!("unknown trust event kind '{kind_str}'")))?;
    let created_at_str: String = row.get(12).map_err(|e| to_storage_err(e.to_string()))?;
    let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|e| to_storage_err(format!("parse datetime '{created_at_str}': {e}")))?;

    Ok(TrustEvent {
        id: row.get(0).map_err(|e| to_storage_err(e.to_string()))?,
        artifact_id: row.get(1).map_err(|e| to_storage_err(e.to_string()))?,
        kind,
        old_trust: row.get(3).map_err(|e| to_storage_err(e.to_string()))?,
        new_trust: row.get(4).map_err(|e| to_storage_err(e.to_string()))?,
        delta: row.get(5).map_err(|e| to_storage_err(e.to_string()))?,
        signal_deltas: SignalDeltas {
            provenance: row.get(6).map_err(|e| to_storage_err(e.to_string()))?,
            consensus: row.get(7).map_err(|e| to_storage_err(e.to_string()))?,
            governance: row.get(8).map_err(|e| to_storage_err(e.to_string()))?,
            usage: row.get(9).map_err(|e| to_storage_err(e.to_string()))?,
        },
        actor: row.get(10).map_err(|e| to_storage_err(e.to_string()))?,
        reason: row.get(11).map_err(|e| to_storage_err(e.to_string()))?,
        created_at,
    })
}
