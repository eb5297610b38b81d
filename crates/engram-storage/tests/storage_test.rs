//! Storage engine integration tests: create/read roundtrips, the versioned
//! CAS update, the Deleted purge, event ordering, sweep logs, aggregation.

use chrono::{Duration, Utc};

use engram_core::artifact::{
    decay_profile, Artifact, ArtifactState, OutputKind, TrustScore, TrustSignals,
};
use engram_core::config::GcPolicy;
use engram_core::errors::EngramError;
use engram_core::models::{GcSweepLog, IndexEntry, IndexKind, SignalDeltas, TrustEvent, TrustEventKind};
use engram_core::traits::IArtifactStore;
use engram_storage::StorageEngine;

fn make_artifact(kind: OutputKind, trust: f64) -> Artifact {
    let profile = decay_profile(kind);
    let now = Utc::now();
    Artifact {
        id: uuid::Uuid::new_v4().to_string(),
        loop_id: "loop-7".to_string(),
        component: "reflection".to_string(),
        kind,
        result: serde_json::json!({"insight": "retry with backoff"}),
        domain: Some("auth".to_string()),
        category: Some("security".to_string()),
        tags: vec!["alpha".to_string(), "beta".to_string()],
        trust: TrustScore::new(trust),
        signals: TrustSignals::new(0.87, 0.85, 1.0, 0.0),
        decay_curve: profile.curve,
        half_life_hours: profile.half_life_hours,
        importance: 0.5,
        access_count: 0,
        success_count: 0,
        failure_count: 0,
        last_accessed_at: None,
        constitutional_compliance: true,
        requires_approval: false,
        state: ArtifactState::Active,
        version: 0,
        created_at: now - Duration::hours(1),
        updated_at: now - Duration::hours(1),
        expires_at: None,
    }
}

fn initial_event(artifact: &Artifact) -> TrustEvent {
    TrustEvent::new(
        &artifact.id,
        TrustEventKind::Initial,
        0.0,
        artifact.trust.value(),
        SignalDeltas {
            provenance: artifact.signals.provenance,
            consensus: artifact.signals.consensus,
            governance: artifact.signals.governance,
            usage: artifact.signals.usage,
        },
        "system",
        "initial scoring",
    )
}

fn store(engine: &StorageEngine, artifact: &Artifact) {
    engine
        .create(
            artifact,
            &IndexEntry::for_artifact(artifact),
            &initial_event(artifact),
        )
        .unwrap();
}

/// Apply a state transition through the CAS primitive, tracking the version.
fn transition(engine: &StorageEngine, artifact: &mut Artifact, state: ArtifactState) {
    artifact.state = state;
    let event = TrustEvent::new(
        &artifact.id,
        TrustEventKind::DecayInspection,
        artifact.trust.value(),
        artifact.trust.value(),
        SignalDeltas::default(),
        "collector",
        "state transition",
    );
    artifact.version = engine
        .update(artifact, artifact.version, Some(&event))
        .unwrap();
}

// ── create and read back ──

#[test]
fn create_roundtrips_every_field() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let mut artifact = make_artifact(OutputKind::Reasoning, 0.77);
    artifact.last_accessed_at = Some(Utc::now() - Duration::minutes(30));
    artifact.expires_at = Some(artifact.created_at + Duration::hours(48));
    artifact.requires_approval = true;
    store(&engine, &artifact);

    let got = engine.get(&artifact.id).unwrap().expect("artifact should exist");
    assert_eq!(got.loop_id, "loop-7");
    assert_eq!(got.component, "reflection");
    assert_eq!(got.kind, OutputKind::Reasoning);
    assert_eq!(got.result, artifact.result, "payload must roundtrip verbatim");
    assert_eq!(got.domain.as_deref(), Some("auth"));
    assert_eq!(got.category.as_deref(), Some("security"));
    assert_eq!(got.tags, vec!["alpha", "beta"]);
    assert!((got.trust.value() - 0.77).abs() < 1e-9);
    assert!((got.signals.provenance - 0.87).abs() < 1e-9);
    assert!((got.signals.consensus - 0.85).abs() < 1e-9);
    assert!((got.signals.governance - 1.0).abs() < 1e-9);
    assert_eq!(got.decay_curve, artifact.decay_curve);
    assert!((got.half_life_hours - 168.0).abs() < 1e-9);
    assert_eq!(got.access_count, 0);
    assert_eq!(got.last_accessed_at, artifact.last_accessed_at);
    assert!(got.constitutional_compliance);
    assert!(got.requires_approval);
    assert_eq!(got.state, ArtifactState::Active);
    assert_eq!(got.version, 0, "a fresh artifact starts at version 0");
    assert_eq!(got.created_at, artifact.created_at);
    assert_eq!(got.expires_at, artifact.expires_at);
}

#[test]
fn get_unknown_reference_returns_none() {
    let engine = StorageEngine::open_in_memory().unwrap();
    assert!(engine.get("no-such-id").unwrap().is_none());
}

#[test]
fn get_bulk_skips_missing_ids() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let a = make_artifact(OutputKind::Decision, 0.6);
    let b = make_artifact(OutputKind::Decision, 0.7);
    store(&engine, &a);
    store(&engine, &b);

    let got = engine
        .get_bulk(&[a.id.clone(), "missing".to_string(), b.id.clone()])
        .unwrap();
    assert_eq!(got.len(), 2, "missing ids are skipped, not errors");
    assert_eq!(got[0].id, a.id);
    assert_eq!(got[1].id, b.id);
}

#[test]
fn duplicate_id_create_rolls_back_entirely() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let artifact = make_artifact(OutputKind::Reflection, 0.8);
    store(&engine, &artifact);

    let mut dup = make_artifact(OutputKind::Reflection, 0.4);
    dup.id = artifact.id.clone();
    dup.tags = vec!["only-on-the-duplicate".to_string()];
    let err = engine
        .create(&dup, &IndexEntry::for_artifact(&dup), &initial_event(&dup))
        .unwrap_err();
    assert!(matches!(err, EngramError::Storage(_)), "got {err:?}");

    // Nothing from the failed create may remain.
    let ids = engine
        .lookup_index(IndexKind::Tag, "only-on-the-duplicate")
        .unwrap();
    assert!(ids.is_empty(), "failed create must not leave index entries");
    let events = engine.trust_events(&artifact.id).unwrap();
    assert_eq!(events.len(), 1, "failed create must not leave events");
    let got = engine.get(&artifact.id).unwrap().unwrap();
    assert!((got.trust.value() - 0.8).abs() < 1e-9, "original row untouched");
}

// ── versioned CAS update ──

#[test]
fn update_bumps_version_and_persists_fields() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let mut artifact = make_artifact(OutputKind::Action, 0.5);
    store(&engine, &artifact);

    artifact.trust = TrustScore::new(0.62);
    artifact.access_count = 3;
    artifact.success_count = 2;
    artifact.failure_count = 1;
    artifact.last_accessed_at = Some(Utc::now());
    let new_version = engine.update(&artifact, 0, None).unwrap();
    assert_eq!(new_version, 1);

    let got = engine.get(&artifact.id).unwrap().unwrap();
    assert_eq!(got.version, 1);
    assert!((got.trust.value() - 0.62).abs() < 1e-9);
    assert_eq!(got.access_count, 3);
    assert_eq!(got.success_count, 2);
    assert_eq!(got.failure_count, 1);
}

#[test]
fn stale_version_is_a_conflict() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let mut artifact = make_artifact(OutputKind::Prediction, 0.5);
    store(&engine, &artifact);

    artifact.trust = TrustScore::new(0.55);
    engine.update(&artifact, 0, None).unwrap();

    // Second writer still believes version 0.
    let err = engine.update(&artifact, 0, None).unwrap_err();
    assert!(
        matches!(err, EngramError::Conflict { expected_version: 0, .. }),
        "got {err:?}"
    );
}

#[test]
fn conflicting_update_inserts_no_event() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let mut artifact = make_artifact(OutputKind::Prediction, 0.5);
    store(&engine, &artifact);
    engine.update(&artifact, 0, None).unwrap();

    artifact.trust = TrustScore::new(0.9);
    let event = TrustEvent::new(
        &artifact.id,
        TrustEventKind::Success,
        0.5,
        0.9,
        SignalDeltas::default(),
        "system",
        "should never land",
    );
    let err = engine.update(&artifact, 0, Some(&event)).unwrap_err();
    assert!(matches!(err, EngramError::Conflict { .. }), "got {err:?}");

    let events = engine.trust_events(&artifact.id).unwrap();
    assert_eq!(events.len(), 1, "conflicted update must not append its event");
}

#[test]
fn update_unknown_reference_is_not_found() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let artifact = make_artifact(OutputKind::Observation, 0.5);
    let err = engine.update(&artifact, 0, None).unwrap_err();
    assert!(matches!(err, EngramError::NotFound { .. }), "got {err:?}");
}

#[test]
fn update_after_delete_is_not_found() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let mut artifact = make_artifact(OutputKind::Generation, 0.3);
    store(&engine, &artifact);
    transition(&engine, &mut artifact, ArtifactState::Archived);
    transition(&engine, &mut artifact, ArtifactState::Deleted);

    let err = engine.update(&artifact, artifact.version, None).unwrap_err();
    assert!(
        matches!(err, EngramError::NotFound { .. }),
        "deleted artifacts reject further mutation, got {err:?}"
    );
}

#[test]
fn backward_state_transition_is_rejected() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let mut artifact = make_artifact(OutputKind::Reasoning, 0.5);
    store(&engine, &artifact);
    transition(&engine, &mut artifact, ArtifactState::Archived);

    artifact.state = ArtifactState::Active;
    let err = engine.update(&artifact, artifact.version, None).unwrap_err();
    assert!(
        matches!(err, EngramError::Validation(_)),
        "there is no restore path, got {err:?}"
    );
}

#[test]
fn active_to_deleted_must_pass_through_archived() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let mut artifact = make_artifact(OutputKind::Reasoning, 0.5);
    store(&engine, &artifact);

    artifact.state = ArtifactState::Deleted;
    let err = engine.update(&artifact, 0, None).unwrap_err();
    assert!(
        matches!(err, EngramError::Validation(_)),
        "deletion always passes through Archived, got {err:?}"
    );
}

// ── the Deleted purge ──

#[test]
fn delete_purges_payload_and_index_but_keeps_the_stub() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let mut artifact = make_artifact(OutputKind::Reflection, 0.42);
    store(&engine, &artifact);
    transition(&engine, &mut artifact, ArtifactState::Archived);
    transition(&engine, &mut artifact, ArtifactState::Deleted);

    let stub = engine.get(&artifact.id).unwrap().expect("audit stub remains");
    assert_eq!(stub.state, ArtifactState::Deleted);
    assert_eq!(stub.result, serde_json::Value::Null, "payload purged");
    assert!(stub.tags.is_empty(), "tags purged");
    assert!(stub.domain.is_none() && stub.category.is_none(), "labels purged");
    assert!((stub.trust.value() - 0.42).abs() < 1e-9, "trust survives for audit");
    assert_eq!(stub.version, 2);

    for (kind, value) in [
        (IndexKind::Component, "reflection"),
        (IndexKind::Keyword, "reflection"),
        (IndexKind::Concept, "domain:auth"),
        (IndexKind::Tag, "alpha"),
    ] {
        let ids = engine.lookup_index(kind, value).unwrap();
        assert!(
            !ids.contains(&artifact.id),
            "{} index entry should be purged",
            kind.as_str()
        );
    }
}

#[test]
fn trust_events_survive_deletion() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let mut artifact = make_artifact(OutputKind::Reflection, 0.42);
    store(&engine, &artifact);
    transition(&engine, &mut artifact, ArtifactState::Archived);
    transition(&engine, &mut artifact, ArtifactState::Deleted);

    let events = engine.trust_events(&artifact.id).unwrap();
    assert_eq!(events.len(), 3, "initial + two inspection events");
    assert_eq!(events[0].kind, TrustEventKind::Initial);
    assert_eq!(events[1].kind, TrustEventKind::DecayInspection);
    assert_eq!(events[2].kind, TrustEventKind::DecayInspection);
}

// ── trust event log ──

#[test]
fn events_return_oldest_first_with_full_fields() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let mut artifact = make_artifact(OutputKind::Decision, 0.5);
    store(&engine, &artifact);

    artifact.trust = TrustScore::new(0.58);
    let success = TrustEvent::new(
        &artifact.id,
        TrustEventKind::Success,
        0.5,
        0.58,
        SignalDeltas { usage: 0.715, ..Default::default() },
        "consumer-42",
        "consumer reported success",
    );
    artifact.version = engine.update(&artifact, 0, Some(&success)).unwrap();

    artifact.trust = TrustScore::new(0.78);
    let manual = TrustEvent::new(
        &artifact.id,
        TrustEventKind::Manual,
        0.58,
        0.78,
        SignalDeltas::default(),
        "admin",
        "operator override",
    );
    engine.update(&artifact, 1, Some(&manual)).unwrap();

    let events = engine.trust_events(&artifact.id).unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].kind, TrustEventKind::Initial);
    assert_eq!(events[1].kind, TrustEventKind::Success);
    assert_eq!(events[2].kind, TrustEventKind::Manual);

    let got = &events[1];
    assert_eq!(got.artifact_id, artifact.id);
    assert!((got.old_trust - 0.5).abs() < 1e-9);
    assert!((got.new_trust - 0.58).abs() < 1e-9);
    assert!((got.delta - 0.08).abs() < 1e-9);
    assert!((got.signal_deltas.usage - 0.715).abs() < 1e-9);
    assert_eq!(got.signal_deltas.provenance, 0.0);
    assert_eq!(got.actor, "consumer-42");
    assert_eq!(got.reason, "consumer reported success");
}

#[test]
fn trust_events_for_never_stored_reference_is_not_found() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let err = engine.trust_events("never-stored").unwrap_err();
    assert!(matches!(err, EngramError::NotFound { .. }), "got {err:?}");
}

// ── state listings and index lookup ──

#[test]
fn ids_by_state_filters_and_orders_oldest_first() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let now = Utc::now();
    let mut oldest = make_artifact(OutputKind::Reasoning, 0.5);
    oldest.created_at = now - Duration::hours(3);
    let mut middle = make_artifact(OutputKind::Reasoning, 0.5);
    middle.created_at = now - Duration::hours(2);
    let mut newest = make_artifact(OutputKind::Reasoning, 0.5);
    newest.created_at = now - Duration::hours(1);

    // Insert out of creation order.
    store(&engine, &middle);
    store(&engine, &newest);
    store(&engine, &oldest);

    let ids = engine.ids_by_state(&[ArtifactState::Active]).unwrap();
    assert_eq!(ids, vec![oldest.id.clone(), middle.id.clone(), newest.id.clone()]);

    transition(&engine, &mut middle, ArtifactState::Archived);
    let active = engine.ids_by_state(&[ArtifactState::Active]).unwrap();
    assert_eq!(active, vec![oldest.id.clone(), newest.id.clone()]);
    let archived = engine.ids_by_state(&[ArtifactState::Archived]).unwrap();
    assert_eq!(archived, vec![middle.id.clone()]);
    let both = engine
        .ids_by_state(&[ArtifactState::Active, ArtifactState::Archived])
        .unwrap();
    assert_eq!(both.len(), 3);

    assert!(engine.ids_by_state(&[]).unwrap().is_empty());
}

#[test]
fn query_by_state_returns_full_artifacts() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let artifact = make_artifact(OutputKind::Observation, 0.66);
    store(&engine, &artifact);

    let got = engine.query_by_state(&[ArtifactState::Active]).unwrap();
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].id, artifact.id);
    assert_eq!(got[0].kind, OutputKind::Observation);
    assert!((got[0].trust.value() - 0.66).abs() < 1e-9);
}

#[test]
fn lookup_index_covers_every_entry_kind() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let artifact = make_artifact(OutputKind::Reflection, 0.7);
    store(&engine, &artifact);

    for (kind, value) in [
        (IndexKind::Component, "reflection"),
        (IndexKind::Keyword, "reflection"),
        (IndexKind::Concept, "domain:auth"),
        (IndexKind::Concept, "category:security"),
        (IndexKind::Tag, "alpha"),
        (IndexKind::Tag, "beta"),
    ] {
        let ids = engine.lookup_index(kind, value).unwrap();
        assert_eq!(
            ids,
            vec![artifact.id.clone()],
            "lookup ({}, {value}) should find the artifact",
            kind.as_str()
        );
    }

    assert!(engine.lookup_index(IndexKind::Tag, "gamma").unwrap().is_empty());
}

// ── sweep log ──

#[test]
fn sweep_log_roundtrips() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let policy = GcPolicy {
        name: "nightly".to_string(),
        min_trust_threshold: 0.3,
        delete_threshold: 0.1,
        max_age_hours: 720.0,
        dry_run: true,
    };
    let mut log = GcSweepLog::begin(&policy);
    log.scanned = 40;
    log.archived = 5;
    log.deleted = 2;
    log.skipped = 1;
    log.error = Some("disk full".to_string());
    log.duration_ms = 17;
    engine.record_sweep(&log).unwrap();

    let history = engine.sweep_history(10).unwrap();
    assert_eq!(history.len(), 1);
    let got = &history[0];
    assert_eq!(got.id, log.id);
    assert_eq!(got.policy_name, "nightly");
    assert_eq!(got.scanned, 40);
    assert_eq!(got.archived, 5);
    assert_eq!(got.deleted, 2);
    assert_eq!(got.skipped, 1);
    assert!((got.min_trust_threshold - 0.3).abs() < 1e-9);
    assert!((got.delete_threshold - 0.1).abs() < 1e-9);
    assert!((got.max_age_hours - 720.0).abs() < 1e-9);
    assert!(got.dry_run);
    assert_eq!(got.error.as_deref(), Some("disk full"));
    assert_eq!(got.duration_ms, 17);
}

#[test]
fn sweep_history_is_recent_first_and_limited() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let now = Utc::now();
    for hours_ago in [3, 2, 1] {
        let mut log = GcSweepLog::begin(&GcPolicy::default());
        log.created_at = now - Duration::hours(hours_ago);
        log.scanned = hours_ago as u64;
        engine.record_sweep(&log).unwrap();
    }

    let history = engine.sweep_history(2).unwrap();
    assert_eq!(history.len(), 2, "limit caps the history");
    assert_eq!(history[0].scanned, 1, "newest sweep first");
    assert_eq!(history[1].scanned, 2);
}

// ── aggregation ──

#[test]
fn average_trust_is_zero_on_an_empty_bank() {
    let engine = StorageEngine::open_in_memory().unwrap();
    assert_eq!(engine.average_trust().unwrap(), 0.0);
    assert!(engine.count_by_state().unwrap().is_empty());
    assert!(engine.count_by_kind().unwrap().is_empty());
}

#[test]
fn aggregation_counts_states_kinds_and_average() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let a = make_artifact(OutputKind::Reasoning, 0.9);
    let b = make_artifact(OutputKind::Reasoning, 0.5);
    let mut c = make_artifact(OutputKind::Observation, 0.1);
    store(&engine, &a);
    store(&engine, &b);
    store(&engine, &c);

    let avg = engine.average_trust().unwrap();
    assert!((avg - 0.5).abs() < 1e-9, "(0.9 + 0.5 + 0.1) / 3, got {avg}");

    transition(&engine, &mut c, ArtifactState::Archived);
    transition(&engine, &mut c, ArtifactState::Deleted);

    let by_state = engine.count_by_state().unwrap();
    let count_for = |state: ArtifactState| {
        by_state
            .iter()
            .find(|(s, _)| *s == state)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    };
    assert_eq!(count_for(ArtifactState::Active), 2);
    assert_eq!(count_for(ArtifactState::Deleted), 1);
    assert_eq!(count_for(ArtifactState::Archived), 0);

    let by_kind = engine.count_by_kind().unwrap();
    assert_eq!(by_kind.len(), 1, "deleted stubs drop out of kind counts");
    assert_eq!(by_kind[0], (OutputKind::Reasoning, 2));

    let avg = engine.average_trust().unwrap();
    assert!((avg - 0.7).abs() < 1e-9, "deleted stub excluded, got {avg}");
}
