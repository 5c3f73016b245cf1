//! In-memory observation tables.
//!
//! The raw CSV rows are kept alongside the parsed numeric fields so that
//! columns the classifier does not look at survive the round trip unchanged.

use csv::StringRecord;

use crate::classifier::classify;
use crate::observation::{Label, LabeledObservation, Observation};
use crate::parser::LABEL_COLUMN;
use crate::summary::LabelSummary;

/// A validated input table: header, raw rows and their parsed observations.
#[derive(Debug, Clone)]
pub struct ObservationTable {
    pub(crate) headers: StringRecord,
    pub(crate) rows: Vec<StringRecord>,
    pub(crate) observations: Vec<Observation>,
    /// Position of a pre-existing `label` column, if any.
    pub(crate) label_column: Option<usize>,
}

impl ObservationTable {
    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Classifies every row. Any existing label values are ignored.
    pub fn label(self) -> LabeledTable {
        let labels = self.observations.iter().map(classify).collect();
        LabeledTable {
            table: self,
            labels,
        }
    }
}

/// An observation table plus one label per row, in input order.
#[derive(Debug, Clone)]
pub struct LabeledTable {
    table: ObservationTable,
    labels: Vec<Label>,
}

impl LabeledTable {
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = LabeledObservation> + '_ {
        self.table
            .observations
            .iter()
            .zip(&self.labels)
            .map(|(observation, label)| LabeledObservation {
                observation: *observation,
                label: *label,
            })
    }

    pub fn summary(&self) -> LabelSummary {
        LabelSummary::from_labels(&self.labels)
    }

    /// Input header with `label` appended, unless it was already present.
    pub fn output_headers(&self) -> StringRecord {
        let mut headers = self.table.headers.clone();
        if self.table.label_column.is_none() {
            headers.push_field(LABEL_COLUMN);
        }
        headers
    }

    /// Raw input row `index` with its label written in, or `None` past the
    /// last row.
    pub fn output_record(&self, index: usize) -> Option<StringRecord> {
        let row = self.table.rows.get(index)?;
        let label = self.labels.get(index)?.as_str();

        let record = match self.table.label_column {
            Some(column) => row
                .iter()
                .enumerate()
                .map(|(i, field)| if i == column { label } else { field })
                .collect(),
            None => {
                let mut record = row.clone();
                record.push_field(label);
                record
            }
        };
        Some(record)
    }

    /// All output rows in input order.
    pub fn output_records(&self) -> impl Iterator<Item = StringRecord> + '_ {
        (0..self.len()).filter_map(|index| self.output_record(index))
    }
}
