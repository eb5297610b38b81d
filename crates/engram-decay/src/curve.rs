//! Pure decay curve math. No state, no I/O.

use engram_core::artifact::DecayCurve;

/// Decay factor in [0.0, 1.0] for an artifact aged `elapsed_hours`.
///
/// ```text
/// hyperbolic:   1 / (1 + t/h)
/// exponential:  exp(-ln(2) * t/h)
/// linear:       max(0, 1 - t/(2h))
/// ```
///
/// Every curve starts at 1.0 for a fresh artifact and passes through 0.5
/// at one half-life. The hyperbolic curve has a long tail and never
/// reaches zero; the exponential curve halves again every further
/// half-life; the linear curve hits zero at exactly two half-lives.
pub fn decay_factor(curve: DecayCurve, half_life_hours: f64, elapsed_hours: f64) -> f64 {
    if half_life_hours <= 0.0 || half_life_hours.is_nan() {
        return 1.0; // degenerate half-life: no decay
    }
    let t = elapsed_hours.max(0.0);
    let h = half_life_hours;

    let factor = match curve {
        DecayCurve::Hyperbolic => 1.0 / (1.0 + t / h),
        DecayCurve::Exponential => (-std::f64::consts::LN_2 * t / h).exp(),
        DecayCurve::Linear => 1.0 - t / (2.0 * h),
    };

    factor.clamp(0.0, 1.0)
}
