use chrono::{DateTime, Duration, Utc};
use engram_core::artifact::{decay_profile, ArtifactState, DecayCurve, OutputKind};
use engram_core::{Artifact, TrustScore, TrustSignals};
use engram_decay::{decay_factor, DecayEngine};

fn make_artifact(kind: OutputKind, trust: f64, created_at: DateTime<Utc>) -> Artifact {
    let profile = decay_profile(kind);
    Artifact {
        id: uuid::Uuid::new_v4().to_string(),
        loop_id: "loop-1".to_string(),
        component: "specialist".to_string(),
        kind,
        result: serde_json::json!({"finding": "test"}),
        domain: None,
        category: None,
        tags: vec![],
        trust: TrustScore::new(trust),
        signals: TrustSignals::default(),
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
        version: 1,
        created_at,
        updated_at: created_at,
        expires_at: None,
    }
}

// ── Fresh artifacts do not decay ─────────────────────────────────────────

#[test]
fn factor_is_one_at_zero_elapsed_for_every_curve() {
    for curve in DecayCurve::ALL {
        let factor = decay_factor(curve, 168.0, 0.0);
        assert_eq!(factor, 1.0, "{:?} should start at 1.0", curve);
    }
}

#[test]
fn negative_elapsed_is_treated_as_zero() {
    for curve in DecayCurve::ALL {
        let factor = decay_factor(curve, 72.0, -10.0);
        assert_eq!(
            factor, 1.0,
            "{:?} should not boost trust under clock skew",
            curve
        );
    }
}

// ── Half-life calibration ────────────────────────────────────────────────

#[test]
fn every_curve_halves_at_one_half_life() {
    for curve in DecayCurve::ALL {
        let factor = decay_factor(curve, 120.0, 120.0);
        assert!(
            (factor - 0.5).abs() < 1e-9,
            "{:?} should be 0.5 at one half-life, got {}",
            curve,
            factor
        );
    }
}

#[test]
fn hyperbolic_reasoning_artifact_halves_at_one_week() {
    let now = Utc::now();
    let engine = DecayEngine::new();
    let artifact = make_artifact(OutputKind::Reasoning, 0.8, now - Duration::hours(168));

    assert_eq!(engine.factor(&artifact, now), 0.5);
    let decayed = engine.decayed_trust(&artifact, now);
    assert!(
        (decayed - 0.4).abs() < 1e-12,
        "0.8 stored trust at one half-life should project to 0.4, got {}",
        decayed
    );
}

// ── Curve shapes ─────────────────────────────────────────────────────────

#[test]
fn hyperbolic_tail_never_reaches_zero() {
    // Ten years on a one-week half-life.
    let factor = decay_factor(DecayCurve::Hyperbolic, 168.0, 87_600.0);
    assert!(factor > 0.0, "hyperbolic decay has no zero, got {}", factor);
    assert!(factor < 0.01, "ten-year-old reasoning should be near zero");
}

#[test]
fn exponential_halves_again_each_half_life() {
    let one = decay_factor(DecayCurve::Exponential, 72.0, 72.0);
    let two = decay_factor(DecayCurve::Exponential, 72.0, 144.0);
    let three = decay_factor(DecayCurve::Exponential, 72.0, 216.0);
    assert!((one - 0.5).abs() < 1e-9);
    assert!((two - 0.25).abs() < 1e-9);
    assert!((three - 0.125).abs() < 1e-9);
}

#[test]
fn linear_reaches_zero_at_two_half_lives_and_stays_there() {
    let at_cutoff = decay_factor(DecayCurve::Linear, 48.0, 96.0);
    let beyond = decay_factor(DecayCurve::Linear, 48.0, 500.0);
    assert_eq!(at_cutoff, 0.0, "linear should hit zero at 2h");
    assert_eq!(beyond, 0.0, "linear should clamp at zero beyond 2h");
}

#[test]
fn hyperbolic_outlasts_exponential_past_the_half_life() {
    // Both are 0.5 at t=h; the hyperbolic tail is fatter after that.
    for t in [200.0, 400.0, 1000.0] {
        let hyper = decay_factor(DecayCurve::Hyperbolic, 168.0, t);
        let exp = decay_factor(DecayCurve::Exponential, 168.0, t);
        assert!(
            hyper > exp,
            "at t={} hyperbolic ({}) should retain more than exponential ({})",
            t,
            hyper,
            exp
        );
    }
}

// ── Monotonicity ─────────────────────────────────────────────────────────

#[test]
fn factor_is_non_increasing_over_time() {
    for curve in DecayCurve::ALL {
        let mut prev = 1.0;
        for hours in [0.0, 1.0, 24.0, 72.0, 168.0, 720.0, 2160.0, 8760.0] {
            let factor = decay_factor(curve, 168.0, hours);
            assert!(
                factor <= prev + f64::EPSILON,
                "{:?} not monotonic at {}h: {} > {}",
                curve,
                hours,
                factor,
                prev
            );
            prev = factor;
        }
    }
}

// ── Engine projection ────────────────────────────────────────────────────

#[test]
fn breakdown_is_consistent_with_its_parts() {
    let now = Utc::now();
    let engine = DecayEngine::new();
    let artifact = make_artifact(OutputKind::Action, 0.9, now - Duration::hours(36));

    let breakdown = engine.breakdown(&artifact, now);

    assert_eq!(breakdown.artifact_id, artifact.id);
    assert!((breakdown.stored_trust - 0.9).abs() < 1e-12);
    assert!((breakdown.elapsed_hours - 36.0).abs() < 1e-9);
    assert!((0.0..=1.0).contains(&breakdown.decay_factor));
    assert!(
        (breakdown.decayed_trust - breakdown.stored_trust * breakdown.decay_factor).abs() < 1e-12,
        "decayed trust should be stored trust times factor"
    );
}

#[test]
fn projection_never_mutates_the_artifact() {
    let now = Utc::now();
    let engine = DecayEngine::new();
    let artifact = make_artifact(OutputKind::Generation, 0.7, now - Duration::hours(100));
    let stored_before = artifact.trust;

    let _ = engine.factor(&artifact, now);
    let _ = engine.decayed_trust(&artifact, now);
    let _ = engine.breakdown(&artifact, now);

    assert_eq!(
        artifact.trust, stored_before,
        "decay is read-time only; stored trust must survive projection"
    );
}

#[test]
fn future_created_at_projects_full_trust() {
    let now = Utc::now();
    let engine = DecayEngine::new();
    let artifact = make_artifact(OutputKind::Decision, 0.6, now + Duration::hours(5));

    assert_eq!(engine.factor(&artifact, now), 1.0);
    assert!((engine.decayed_trust(&artifact, now) - 0.6).abs() < 1e-12);
}

// ── Profile wiring ───────────────────────────────────────────────────────

#[test]
fn every_kind_halves_at_its_own_half_life() {
    let now = Utc::now();
    let engine = DecayEngine::new();

    for kind in OutputKind::ALL {
        let profile = decay_profile(kind);
        let created = now - Duration::minutes((profile.half_life_hours * 60.0) as i64);
        let artifact = make_artifact(kind, 1.0, created);

        let factor = engine.factor(&artifact, now);
        assert!(
            (factor - 0.5).abs() < 1e-6,
            "{:?} (half-life {}h) should be at 0.5, got {}",
            kind,
            profile.half_life_hours,
            factor
        );
    }
}

#[test]
fn short_lived_generation_fades_before_long_lived_reflection() {
    let now = Utc::now();
    let engine = DecayEngine::new();
    let generation = make_artifact(OutputKind::Generation, 0.8, now - Duration::hours(48));
    let reflection = make_artifact(OutputKind::Reflection, 0.8, now - Duration::hours(48));

    let gen_trust = engine.decayed_trust(&generation, now);
    let refl_trust = engine.decayed_trust(&reflection, now);
    assert!(
        gen_trust < refl_trust,
        "generation (24h linear) should fade faster than reflection (240h hyperbolic): {} vs {}",
        gen_trust,
        refl_trust
    );
}
