//! Observation records and the signal-quality labels assigned to them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One GNSS measurement epoch for a single satellite channel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Observation {
    /// Carrier-to-noise density ratio (dB).
    pub signal_strength: f64,
    /// Degrees above the horizon, 0-90.
    pub elevation_angle: f64,
    /// m/s, signed.
    pub pseudorange_rate: f64,
    /// m/s², signed.
    pub range_acceleration: f64,
}

impl Observation {
    pub fn new(
        signal_strength: f64,
        elevation_angle: f64,
        pseudorange_rate: f64,
        range_acceleration: f64,
    ) -> Self {
        Self {
            signal_strength,
            elevation_angle,
            pseudorange_rate,
            range_acceleration,
        }
    }
}

/// Signal-path class of an observation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Label {
    #[serde(rename = "LOS")]
    LineOfSight,
    #[serde(rename = "MP")]
    Multipath,
    #[default]
    #[serde(rename = "NLOS")]
    NonLineOfSight,
}

impl Label {
    /// Report and chart order.
    pub const ALL: [Label; 3] = [Label::LineOfSight, Label::Multipath, Label::NonLineOfSight];

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::LineOfSight => "LOS",
            Label::Multipath => "MP",
            Label::NonLineOfSight => "NLOS",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLabelError(pub String);

impl fmt::Display for ParseLabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown signal label {:?}", self.0)
    }
}

impl std::error::Error for ParseLabelError {}

impl FromStr for Label {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "LOS" => Ok(Label::LineOfSight),
            "MP" => Ok(Label::Multipath),
            "NLOS" => Ok(Label::NonLineOfSight),
            other => Err(ParseLabelError(other.to_string())),
        }
    }
}

/// An observation together with its assigned label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabeledObservation {
    #[serde(flatten)]
    pub observation: Observation,
    pub label: Label,
}
