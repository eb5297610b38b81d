//! Criterion benchmarks for engram-decay.
//!
//! The decay factor sits on the read path of every query, so it runs once
//! per candidate per read. These benches keep the per-call and batch costs
//! visible.

use chrono::{Duration, Utc};
use criterion::{criterion_group, criterion_main, Criterion};

use engram_core::artifact::{decay_profile, ArtifactState, DecayCurve, OutputKind};
use engram_core::{Artifact, TrustScore, TrustSignals};
use engram_decay::{decay_factor, DecayEngine};

fn make_bench_artifact(kind: OutputKind, hours_old: i64) -> Artifact {
    let now = Utc::now();
    let profile = decay_profile(kind);
    Artifact {
        id: uuid::Uuid::new_v4().to_string(),
        loop_id: "bench-loop".to_string(),
        component: "specialist".to_string(),
        kind,
        result: serde_json::json!({"finding": "bench"}),
        domain: Some("bench".to_string()),
        category: None,
        tags: vec!["bench".to_string()],
        trust: TrustScore::new(0.8),
        signals: TrustSignals::new(0.8, 0.8, 1.0, 0.0),
        decay_curve: profile.curve,
        half_life_hours: profile.half_life_hours,
        importance: 0.5,
        access_count: 5,
        success_count: 4,
        failure_count: 1,
        last_accessed_at: Some(now),
        constitutional_compliance: true,
        requires_approval: false,
        state: ArtifactState::Active,
        version: 1,
        created_at: now - Duration::hours(hours_old),
        updated_at: now,
        expires_at: None,
    }
}

fn bench_decay_factor_per_curve(c: &mut Criterion) {
    for curve in DecayCurve::ALL {
        c.bench_function(&format!("decay_factor_{}", curve.as_str()), |bench| {
            bench.iter(|| decay_factor(curve, 168.0, 420.0));
        });
    }
}

fn bench_breakdown(c: &mut Criterion) {
    let engine = DecayEngine::new();
    let artifact = make_bench_artifact(OutputKind::Reasoning, 300);
    let now = Utc::now();

    c.bench_function("decay_breakdown", |bench| {
        bench.iter(|| engine.breakdown(&artifact, now));
    });
}

fn bench_project_1000_candidates(c: &mut Criterion) {
    let engine = DecayEngine::new();
    let now = Utc::now();
    let artifacts: Vec<Artifact> = (0..1000)
        .map(|i| make_bench_artifact(OutputKind::ALL[i % OutputKind::COUNT], (i % 720) as i64))
        .collect();

    c.bench_function("decayed_trust_1000_candidates", |bench| {
        bench.iter(|| {
            artifacts
                .iter()
                .map(|a| engine.decayed_trust(a, now))
                .sum::<f64>()
        });
    });
}

criterion_group!(
    benches,
    bench_decay_factor_per_curve,
    bench_breakdown,
    bench_project_1000_candidates,
);
criterion_main!(benches);
