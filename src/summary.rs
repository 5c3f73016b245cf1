use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::observation::Label;

/// Per-label occurrence counts. All three labels are always present.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LabelSummary {
    #[serde(rename = "LOS")]
    pub los: usize,
    #[serde(rename = "MP")]
    pub mp: usize,
    #[serde(rename = "NLOS")]
    pub nlos: usize,
}

impl LabelSummary {
    pub fn from_labels(labels: &[Label]) -> Self {
        let mut s = LabelSummary::default();

        for label in labels {
            match label {
                Label::LineOfSight => s.los += 1,
                Label::Multipath => s.mp += 1,
                Label::NonLineOfSight => s.nlos += 1,
            }
        }

        s
    }

    pub fn count(&self, label: Label) -> usize {
        match label {
            Label::LineOfSight => self.los,
            Label::Multipath => self.mp,
            Label::NonLineOfSight => self.nlos,
        }
    }

    pub fn total(&self) -> usize {
        self.los + self.mp + self.nlos
    }

    /// `(label, count)` pairs in LOS, MP, NLOS order.
    pub fn iter(&self) -> impl Iterator<Item = (Label, usize)> + '_ {
        Label::ALL.into_iter().map(|label| (label, self.count(label)))
    }

    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    pub fn share(&self, label: Label) -> f64 {
        Self::pct(self.count(label), self.total())
    }

    /// The textual count report, one `"<label>: <n> samples"` line per label.
    pub fn report(&self) -> String {
        let mut out = String::from("GNSS Signal Label Distribution:\n");
        for (label, count) in self.iter() {
            out.push_str(&format!("{label}: {count} samples\n"));
        }
        out
    }
}

/// Summary plus provenance, for JSON output.
#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub total: usize,
    pub counts: LabelSummary,
    pub percentages: LabelShares,
}

#[derive(Debug, Serialize)]
pub struct LabelShares {
    #[serde(rename = "LOS")]
    pub los: f64,
    #[serde(rename = "MP")]
    pub mp: f64,
    #[serde(rename = "NLOS")]
    pub nlos: f64,
}

impl SummaryReport {
    pub fn new(source: &str, counts: LabelSummary) -> Self {
        SummaryReport {
            generated_at: Utc::now(),
            source: source.to_string(),
            total: counts.total(),
            counts,
            percentages: LabelShares {
                los: counts.share(Label::LineOfSight),
                mp: counts.share(Label::Multipath),
                nlos: counts.share(Label::NonLineOfSight),
            },
        }
    }
}
