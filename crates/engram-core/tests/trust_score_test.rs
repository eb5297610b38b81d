use engram_core::artifact::{TrustScore, TrustSignals};
use engram_core::config::SignalWeights;

// ── TrustScore newtype ───────────────────────────────────────────────────

#[test]
fn trust_score_clamps_on_construction() {
    assert_eq!(TrustScore::new(1.5).value(), 1.0);
    assert_eq!(TrustScore::new(-0.2).value(), 0.0);
    assert_eq!(TrustScore::new(0.73).value(), 0.73);
}

#[test]
fn trust_score_arithmetic_stays_clamped() {
    let a = TrustScore::new(0.9);
    let b = TrustScore::new(0.4);
    assert_eq!((a + b).value(), 1.0, "addition should clamp at 1.0");
    assert_eq!((b - a).value(), 0.0, "subtraction should clamp at 0.0");
    assert_eq!((a * 0.5).value(), 0.45);
}

#[test]
fn trust_score_thresholds() {
    assert!(TrustScore::new(0.85).is_high());
    assert!(!TrustScore::new(0.5).is_high());
    assert!(TrustScore::new(0.1).is_low());
    assert!(!TrustScore::new(0.3).is_low());
}

#[test]
fn trust_score_displays_three_decimals() {
    assert_eq!(TrustScore::new(0.774).to_string(), "0.774");
    assert_eq!(TrustScore::new(1.0).to_string(), "1.000");
}

#[test]
fn trust_score_f64_conversions_roundtrip() {
    let t: TrustScore = 0.42.into();
    let raw: f64 = t.into();
    assert_eq!(raw, 0.42);
}

// ── TrustSignals ─────────────────────────────────────────────────────────

#[test]
fn signals_clamp_each_component() {
    let s = TrustSignals::new(1.4, -0.1, 0.5, 2.0);
    assert_eq!(s.provenance, 1.0);
    assert_eq!(s.consensus, 0.0);
    assert_eq!(s.governance, 0.5);
    assert_eq!(s.usage, 1.0);
}

#[test]
fn weighted_total_with_default_weights() {
    // Worked example: reflection output, confidence 0.9, quality 0.85.
    let signals = TrustSignals::new(0.87, 0.85, 1.0, 0.0);
    let total = signals.weighted_total(&SignalWeights::default());
    assert!(
        (total.value() - 0.7735).abs() < 1e-12,
        "expected 0.7735, got {}",
        total.value()
    );
}

#[test]
fn weighted_total_is_clamped() {
    let signals = TrustSignals::new(1.0, 1.0, 1.0, 1.0);
    let heavy = SignalWeights {
        provenance: 0.5,
        consensus: 0.5,
        governance: 0.5,
        usage: 0.5,
    };
    assert_eq!(signals.weighted_total(&heavy).value(), 1.0);
}
