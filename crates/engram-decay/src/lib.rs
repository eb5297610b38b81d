//! # engram-decay
//!
//! Read-time trust decay for the engram memory bank.
//!
//! Decay is a pure projection: the stored trust score is never rewritten.
//! Each artifact carries a curve and half-life fixed at creation, and every
//! read multiplies stored trust by the curve's factor at the artifact's
//! current age. All three curves pass through 0.5 at one half-life, so a
//! profile change is a shape change, never a calibration change.

pub mod curve;
pub mod engine;

pub use curve::decay_factor;
pub use engine::{DecayBreakdown, DecayEngine};
