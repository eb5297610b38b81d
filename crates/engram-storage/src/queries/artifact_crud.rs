//! Insert, get, bulk get, and the versioned CAS update for artifacts.

use rusqlite::{params, Connection};

use engram_core::artifact::{Artifact, ArtifactState, DecayCurve, OutputKind, TrustScore, TrustSignals};
use engram_core::errors::{EngramError, EngramResult};
use engram_core::models::{IndexEntry, TrustEvent};

use crate::queries::{event_ops, index_ops};
use crate::to_storage_err;

/// Canonical column list shared by every artifact SELECT.
pub(crate) const ARTIFACT_COLUMNS: &str = "id, loop_id, component, kind, result, domain, category, tags, \
     trust, provenance, consensus, governance, usage, \
     decay_curve, half_life_hours, importance, \
     access_count, success_count, failure_count, last_accessed_at, \
     constitutional_compliance, requires_approval, state, version, \
     created_at, updated_at, expires_at";

/// Insert an artifact, its index entries and its initial trust event.
/// Wrapped in a transaction: all three land or none do.
pub fn insert_artifact(
    conn: &Connection,
    artifact: &Artifact,
    entries: &[IndexEntry],
    initial_event: &TrustEvent,
) -> EngramResult<()> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("insert_artifact begin: {e}")))?;

    match insert_artifact_inner(&tx, artifact, entries, initial_event) {
        Ok(()) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("insert_artifact commit: {e}")))?;
            Ok(())
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}

fn insert_artifact_inner(
    conn: &Connection,
    artifact: &Artifact,
    entries: &[IndexEntry],
    initial_event: &TrustEvent,
) -> EngramResult<()> {
    let result_json =
        serde_json::to_string(&artifact.result).map_err(|e| to_storage_err(e.to_string()))?;
    let tags_json =
        serde_json::to_string(&artifact.tags).map_err(|e| to_storage_err(e.to_string()))?;

    conn.execute(
        "INSERT INTO artifacts (
            id, loop_id, component, kind, result, domain, category, tags,
            trust, provenance, consensus, governance, usage,
            decay_curve, half_life_hours, importance,
            access_count, success_count, failure_count, last_accessed_at,
            constitutional_compliance, requires_approval, state, version,
            created_at, updated_at, expires_at
        ) VALUES (
            ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
            ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27
        )",
        params![
            artifact.id,
            artifact.loop_id,
            artifact.component,
            artifact.kind.as_str(),
            result_json,
            artifact.domain,
            artifact.category,
            tags_json,
            artifact.trust.value(),
            artifact.signals.provenance,
            artifact.signals.consensus,
            artifact.signals.governance,
            artifact.signals.usage,
            artifact.decay_curve.as_str(),
            artifact.half_life_hours,
            artifact.importance,
            artifact.access_count,
            artifact.success_count,
            artifact.failure_count,
            artifact.last_accessed_at.map(|t| t.to_rfc3339()),
            artifact.constitutional_compliance as i32,
            artifact.requires_approval as i32,
            artifact.state.as_str(),
            artifact.version,
            artifact.created_at.to_rfc3339(),
            artifact.updated_at.to_rfc3339(),
            artifact.expires_at.map(|t| t.to_rfc3339()),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    index_ops::insert_entries(conn, entries)?;
    event_ops::append_event(conn, initial_event)?;
    Ok(())
}

/// Get a single artifact by reference id, any state.
pub fn get_artifact(conn: &Connection, id: &str) -> EngramResult<Option<Artifact>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {ARTIFACT_COLUMNS} FROM artifacts WHERE id = ?1"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let result = stmt
        .query_row(params![id], |row| Ok(row_to_artifact(row)))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match result {
        Some(Ok(artifact)) => Ok(Some(artifact)),
        Some(Err(e)) => Err(e),
        None => Ok(None),
    }
}

/// Bulk get artifacts by ids, skipping missing ones.
pub fn bulk_get(conn: &Connection, ids: &[String]) -> EngramResult<Vec<Artifact>> {
    let mut results = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(artifact) = get_artifact(conn, id)? {
            results.push(artifact);
        }
    }
    Ok(results)
}

/// Whether a reference id was ever stored (deleted stubs count).
pub fn artifact_exists(conn: &Connection, id: &str) -> EngramResult<bool> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM artifacts WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count > 0)
}

/// The versioned compare-and-swap update. Wrapped in a transaction: row
/// update, optional trust event, and the Deleted-state purge are
/// all-or-nothing. Returns the new version (`expected_version + 1`).
pub fn update_artifact(
    conn: &Connection,
    artifact: &Artifact,
    expected_version: u64,
    event: Option<&TrustEvent>,
) -> EngramResult<u64> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("update_artifact begin: {e}")))?;

    match update_artifact_inner(&tx, artifact, expected_version, event) {
        Ok(version) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("update_artifact commit: {e}")))?;
            Ok(version)
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}

fn update_artifact_inner(
    conn: &Connection,
    artifact: &Artifact,
    expected_version: u64,
    event: Option<&TrustEvent>,
) -> EngramResult<u64> {
    // Probe current state first: a missing or already-deleted artifact is
    // NotFound, and the lifecycle only moves forward.
    let stored_state = match probe_state(conn, &artifact.id)? {
        None | Some(ArtifactState::Deleted) => {
            return Err(EngramError::NotFound {
                id: artifact.id.clone(),
            });
        }
        Some(state) => state,
    };
    if artifact.state != stored_state && !stored_state.can_transition_to(artifact.state) {
        return Err(EngramError::Validation(format!(
            "state transition {} -> {} not permitted for artifact {}",
            stored_state.as_str(),
            artifact.state.as_str(),
            artifact.id
        )));
    }

    let result_json =
        serde_json::to_string(&artifact.result).map_err(|e| to_storage_err(e.to_string()))?;
    let tags_json =
        serde_json::to_string(&artifact.tags).map_err(|e| to_storage_err(e.to_string()))?;
    let new_version = expected_version + 1;

    let rows = conn
        .execute(
            "UPDATE artifacts SET
                loop_id = ?2, component = ?3, kind = ?4, result = ?5,
                domain = ?6, category = ?7, tags = ?8,
                trust = ?9, provenance = ?10, consensus = ?11,
                governance = ?12, usage = ?13,
                decay_curve = ?14, half_life_hours = ?15, importance = ?16,
                access_count = ?17, success_count = ?18, failure_count = ?19,
                last_accessed_at = ?20, constitutional_compliance = ?21,
                requires_approval = ?22, state = ?23, version = ?24,
                updated_at = ?25, expires_at = ?26
             WHERE id = ?1 AND version = ?27",
            params![
                artifact.id,
                artifact.loop_id,
                artifact.component,
                artifact.kind.as_str(),
                result_json,
                artifact.domain,
                artifact.category,
                tags_json,
                artifact.trust.value(),
                artifact.signals.provenance,
                artifact.signals.consensus,
                artifact.signals.governance,
                artifact.signals.usage,
                artifact.decay_curve.as_str(),
                artifact.half_life_hours,
                artifact.importance,
                artifact.access_count,
                artifact.success_count,
                artifact.failure_count,
                artifact.last_accessed_at.map(|t| t.to_rfc3339()),
                artifact.constitutional_compliance as i32,
                artifact.requires_approval as i32,
                artifact.state.as_str(),
                new_version,
                artifact.updated_at.to_rfc3339(),
                artifact.expires_at.map(|t| t.to_rfc3339()),
                expected_version,
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    if rows == 0 {
        return Err(EngramError::Conflict {
            id: artifact.id.clone(),
            expected_version,
        });
    }

    if artifact.state == ArtifactState::Deleted {
        purge_deleted(conn, &artifact.id)?;
    }

    if let Some(event) = event {
        event_ops::append_event(conn, event)?;
    }

    Ok(new_version)
}

/// Reduce a deleted artifact to its audit stub: null the payload and labels,
/// drop the index entries. The row, counters and trust history remain.
fn purge_deleted(conn: &Connection, id: &str) -> EngramResult<()> {
    conn.execute(
        "UPDATE artifacts SET result = NULL, domain = NULL, category = NULL, tags = '[]'
         WHERE id = ?1",
        params![id],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    index_ops::delete_for_artifact(conn, id)?;
    Ok(())
}

fn probe_state(conn: &Connection, id: &str) -> EngramResult<Option<ArtifactState>> {
    let state_str = conn
        .query_row(
            "SELECT state FROM artifacts WHERE id = ?1",
            params![id],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    match state_str {
        Some(s) => ArtifactState::parse(&s)
            .map(Some)
            .ok_or_else(|| to_storage_err(format!("unknown artifact state '{s}'"))),
        None => Ok(None),
    }
}

/// Parse a row in [`ARTIFACT_COLUMNS`] order into an [`Artifact`].
pub(crate) fn row_to_artifact(row: &rusqlite::Row<'_>) -> EngramResult<Artifact> {
    let kind_str: String = row.get(3).map_err(|e| to_storage_err(e.to_string()))?;
    let result_json: Option<String> = row.get(4).map_err(|e| to_storage_err(e.to_string()))?;
    let tags_json: String = row.get(7).map_err(|e| to_storage_err(e.to_string()))?;
    let curve_str: String = row.get(13).map_err(|e| to_storage_err(e.to_string()))?;
    let state_str: String = row.get(22).map_err(|e| to_storage_err(e.to_string()))?;

    let kind = OutputKind::parse(&kind_str)
        .ok_or_else(|| to_storage_err(format!("unknown output kind '{kind_str}'")))?;
    let decay_curve = DecayCurve::parse(&curve_str)
        .ok_or_else(|| to_storage_err(format!("unknown decay curve '{curve_str}'")))?;
    let state = ArtifactState::parse(&state_str)
        .ok_or_else(|| to_storage_err(format!("unknown artifact state '{state_str}'")))?;

    // A purged payload reads back as JSON null.
    let result = match result_json {
        Some(raw) => serde_json::from_str(&raw)
            .map_err(|e| to_storage_err(format!("parse result payload: {e}")))?,
        None => serde_json::Value::Null,
    };
    let tags: Vec<String> = serde_json::from_str(&tags_json)
        .map_err(|e| to_storage_err(format!("parse tags: {e}")))?;

    let last_accessed_str: Option<String> =
        row.get(19).map_err(|e| to_storage_err(e.to_string()))?;
    let created_at_str: String = row.get(24).map_err(|e| to_storage_err(e.to_string()))?;
    let updated_at_str: String = row.get(25).map_err(|e| to_storage_err(e.to_string()))?;
    let expires_at_str: Option<String> = row.get(26).map_err(|e| to_storage_err(e.to_string()))?;

    let parse_dt = |s: &str| -> EngramResult<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .map_err(|e| to_storage_err(format!("parse datetime '{s}': {e}")))
    };

    Ok(Artifact {
        id: row.get(0).map_err(|e| to_storage_err(e.to_string()))?,
        loop_id: row.get(1).map_err(|e| to_storage_err(e.to_string()))?,
        component: row.get(2).map_err(|e| to_storage_err(e.to_string()))?,
        kind,
        result,
        domain: row.get(5).map_err(|e| to_storage_err(e.to_string()))?,
        category: row.get(6).map_err(|e| to_storage_err(e.to_string()))?,
        tags,
        trust: TrustScore::new(row.get(8).map_err(|e| to_storage_err(e.to_string()))?),
        signals: TrustSignals::new(
            row.get(9).map_err(|e| to_storage_err(e.to_string()))?,
            row.get(10).map_err(|e| to_storage_err(e.to_string()))?,
            row.get(11).map_err(|e| to_storage_err(e.to_string()))?,
            row.get(12).map_err(|e| to_storage_err(e.to_string()))?,
        ),
        decay_curve,
        half_life_hours: row.get(14).map_err(|e| to_storage_err(e.to_string()))?,
        importance: row.get(15).map_err(|e| to_storage_err(e.to_string()))?,
        access_count: row
            .get::<_, i64>(16)
            .map_err(|e| to_storage_err(e.to_string()))? as u64,
        success_count: row
            .get::<_, i64>(17)
            .map_err(|e| to_storage_err(e.to_string()))? as u64,
        failure_count: row
            .get::<_, i64>(18)
            .map_err(|e| to_storage_err(e.to_string()))? as u64,
        last_accessed_at: last_accessed_str.as_deref().map(parse_dt).transpose()?,
        constitutional_compliance: row
            .get::<_, i32>(20)
            .map_err(|e| to_storage_err(e.to_string()))?
            != 0,
        requires_approval: row
            .get::<_, i32>(21)
            .map_err(|e| to_storage_err(e.to_string()))?
            != 0,
        state,
        version: row
            .get::<_, i64>(23)
            .map_err(|e| to_storage_err(e.to_string()))? as u64,
        created_at: parse_dt(&created_at_str)?,
        updated_at: parse_dt(&updated_at_str)?,
        expires_at: expires_at_str.as_deref().map(parse_dt).transpose()?,
    })
}

/// Helper trait to make `query_row` return `Option` on not-found.
pub(crate) trait OptionalRow<T> {
    fn optional(self) -> Result<Option<T>, rusqlite::Error>;
}

impl<T> OptionalRow<T> for Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>, rusqlite::Error> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
