//! Rule-based GNSS signal-quality labeling.
//!
//! Observations are read from CSV ([`parser`]), labeled LOS / MP / NLOS by
//! fixed thresholds ([`classifier`]), written back out ([`output`]) and
//! summarized ([`summary`], [`chart`]).

pub mod chart;
pub mod classifier;
pub mod error;
pub mod observation;
pub mod output;
pub mod parser;
pub mod summary;
pub mod table;

pub use error::{LabelError, Result};
pub use observation::{Label, LabeledObservation, Observation};
pub use table::{LabeledTable, ObservationTable};
