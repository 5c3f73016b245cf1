//! Output formatting and persistence for labeled observation tables.
//!
//! Supports pretty-printing, JSON serialization, and CSV export.

use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{LabelError, Result};
use crate::summary::SummaryReport;
use crate::table::LabeledTable;

/// Logs a summary report using Rust's debug pretty-print format.
pub fn print_pretty(report: &SummaryReport) {
    debug!("{:#?}", report);
}

/// Logs a summary report as pretty-printed JSON.
pub fn print_json(report: &SummaryReport) -> anyhow::Result<()> {
    info!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Writes the labeled table to `path` as CSV, header included, input row
/// order preserved. An existing file is overwritten.
///
/// # Errors
///
/// [`LabelError::Output`] on any create or write failure. The table itself
/// is only borrowed and stays usable.
#[tracing::instrument(skip_all, fields(path = %path.display(), rows = table.len()))]
pub fn write_labeled(path: &Path, table: &LabeledTable) -> Result<()> {
    let file = File::create(path).map_err(|e| LabelError::output(path, e))?;
    write_labeled_to(file, table).map_err(|e| LabelError::output(path, e))?;

    info!("Labeled table written");
    Ok(())
}

/// Writes the labeled table as CSV to any sink.
pub fn write_labeled_to<W: Write>(sink: W, table: &LabeledTable) -> std::io::Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(sink);

    writer.write_record(&table.output_headers())?;
    for record in table.output_records() {
        writer.write_record(&record)?;
    }
    writer.flush()?;

    debug!(rows = table.len(), "CSV rows flushed");
    Ok(())
}
