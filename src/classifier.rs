//! Rule-based LOS / MP / NLOS labeling.
//!
//! Every observation starts as NLOS. The line-of-sight mask is applied
//! first and the multipath mask second, so a record matching both ends up
//! as MP. That only happens on the shared 30° / 45 dB boundary.

use crate::observation::{Label, LabeledObservation, Observation};

/// LOS needs strictly more than this C/N0 (dB).
pub const LOS_MIN_SIGNAL_STRENGTH: f64 = 45.0;
/// LOS minimum elevation (degrees, inclusive).
pub const LOS_MIN_ELEVATION: f64 = 30.0;
/// LOS pseudorange rate bound, `[-500, 500]` m/s.
pub const LOS_MAX_PSEUDORANGE_RATE: f64 = 500.0;
/// LOS range acceleration bound, `[-1.5, 1.5]` m/s².
pub const LOS_MAX_RANGE_ACCELERATION: f64 = 1.5;

/// MP C/N0 window, `[26, 45]` dB.
pub const MP_SIGNAL_STRENGTH: (f64, f64) = (26.0, 45.0);
/// MP elevation window, `[10, 30]` degrees.
pub const MP_ELEVATION: (f64, f64) = (10.0, 30.0);
/// MP needs `|pseudorange_rate|` strictly above this (m/s).
pub const MP_MIN_PSEUDORANGE_RATE: f64 = 500.0;
/// MP needs `|range_acceleration|` strictly above this (m/s²).
pub const MP_MIN_RANGE_ACCELERATION: f64 = 4.0;

fn between(value: f64, low: f64, high: f64) -> bool {
    low <= value && value <= high
}

/// Strong, high, steady signal.
pub fn is_line_of_sight(obs: &Observation) -> bool {
    obs.signal_strength > LOS_MIN_SIGNAL_STRENGTH
        && obs.elevation_angle >= LOS_MIN_ELEVATION
        && between(
            obs.pseudorange_rate,
            -LOS_MAX_PSEUDORANGE_RATE,
            LOS_MAX_PSEUDORANGE_RATE,
        )
        && between(
            obs.range_acceleration,
            -LOS_MAX_RANGE_ACCELERATION,
            LOS_MAX_RANGE_ACCELERATION,
        )
}

/// Moderate, low-elevation signal with large range dynamics.
pub fn is_multipath(obs: &Observation) -> bool {
    between(obs.signal_strength, MP_SIGNAL_STRENGTH.0, MP_SIGNAL_STRENGTH.1)
        && between(obs.elevation_angle, MP_ELEVATION.0, MP_ELEVATION.1)
        && obs.pseudorange_rate.abs() > MP_MIN_PSEUDORANGE_RATE
        && obs.range_acceleration.abs() > MP_MIN_RANGE_ACCELERATION
}

/// Assigns exactly one label to a single observation.
pub fn classify(obs: &Observation) -> Label {
    let mut label = Label::NonLineOfSight;

    if is_line_of_sight(obs) {
        label = Label::LineOfSight;
    }

    // Not an else-branch: the MP mask is applied after LOS and overwrites it.
    if is_multipath(obs) {
        label = Label::Multipath;
    }

    label
}

/// Labels every observation, preserving order.
pub fn classify_all(observations: &[Observation]) -> Vec<LabeledObservation> {
    observations
        .iter()
        .map(|obs| LabeledObservation {
            observation: *obs,
            label: classify(obs),
        })
        .collect()
}
