//! CSV loader for GNSS observation tables.

use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{LabelError, Result};
use crate::observation::{Label, Observation};
use crate::table::ObservationTable;

pub const SIGNAL_STRENGTH: &str = "signal_strength";
pub const ELEVATION_ANGLE: &str = "elevation_angle";
pub const PSEUDORANGE_RATE: &str = "pseudorange_rate";
pub const RANGE_ACCELERATION: &str = "range_acceleration";
pub const LABEL_COLUMN: &str = "label";

/// Columns every input table must carry, in [`Observation`] field order.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    SIGNAL_STRENGTH,
    ELEVATION_ANGLE,
    PSEUDORANGE_RATE,
    RANGE_ACCELERATION,
];

/// Opens and parses an observation table from `path`.
///
/// # Errors
///
/// [`LabelError::InputUnreadable`] if the file cannot be opened, otherwise
/// whatever [`parse_observations`] rejects.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn read_observations(path: &Path) -> Result<ObservationTable> {
    let file = File::open(path).map_err(|source| LabelError::InputUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let table = parse_observations(file)?;
    info!(rows = table.len(), "Observations loaded");
    Ok(table)
}

/// Parses a header-led CSV table into validated observations.
///
/// Header names must match exactly.
///
/// Every row is checked before anything is returned, so a bad value
/// anywhere in the table means no labels are produced at all.
pub fn parse_observations<R: Read>(reader: R) -> Result<ObservationTable> {
    let mut rdr = ReaderBuilder::new().from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(LabelError::EmptyInput);
    }

    let columns = locate_columns(&headers)?;
    let label_column = headers.iter().position(|h| h == LABEL_COLUMN);
    debug!(?columns, ?label_column, "Header validated");

    let mut rows = Vec::new();
    let mut observations = Vec::new();

    for (idx, result) in rdr.records().enumerate() {
        let record = result?;
        let row = idx + 1;

        observations.push(Observation {
            signal_strength: parse_field(&record, row, columns[0], SIGNAL_STRENGTH)?,
            elevation_angle: parse_field(&record, row, columns[1], ELEVATION_ANGLE)?,
            pseudorange_rate: parse_field(&record, row, columns[2], PSEUDORANGE_RATE)?,
            range_acceleration: parse_field(&record, row, columns[3], RANGE_ACCELERATION)?,
        });
        rows.push(record);
    }

    if observations.is_empty() {
        return Err(LabelError::EmptyInput);
    }

    Ok(ObservationTable {
        headers,
        rows,
        observations,
        label_column,
    })
}

/// Reads the `label` column of an already-labeled CSV file.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn read_labels(path: &Path) -> Result<Vec<Label>> {
    let file = File::open(path).map_err(|source| LabelError::InputUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let labels = parse_labels(file)?;
    info!(rows = labels.len(), "Labels loaded");
    Ok(labels)
}

pub fn parse_labels<R: Read>(reader: R) -> Result<Vec<Label>> {
    let mut rdr = ReaderBuilder::new().from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(LabelError::EmptyInput);
    }

    let column = headers
        .iter()
        .position(|h| h == LABEL_COLUMN)
        .ok_or_else(|| LabelError::MissingColumn {
            column: LABEL_COLUMN.to_string(),
        })?;

    let mut labels = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result?;
        let value = record.get(column).unwrap_or_default();
        let label = value.parse().map_err(|_| LabelError::UnknownLabel {
            row: idx + 1,
            value: value.to_string(),
        })?;
        labels.push(label);
    }

    if labels.is_empty() {
        return Err(LabelError::EmptyInput);
    }

    Ok(labels)
}

fn locate_columns(headers: &StringRecord) -> Result<[usize; 4]> {
    let mut columns = [0; 4];
    for (slot, name) in columns.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LabelError::MissingColumn {
                column: name.to_string(),
            })?;
    }
    Ok(columns)
}

/// Surrounding whitespace is tolerated in numeric cells only; the raw
/// record is kept untouched for output.
fn parse_field(record: &StringRecord, row: usize, column: usize, name: &str) -> Result<f64> {
    let raw = record.get(column).unwrap_or_default();
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(LabelError::NonNumeric {
            row,
            column: name.to_string(),
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "signal_strength,elevation_angle,pseudorange_rate,range_acceleration";

    #[test]
    fn test_parse_valid_table() {
        let csv = format!("{HEADER}\n50,60,0,0\n30.5,20,-600,5.25\n");
        let table = parse_observations(csv.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.observations()[0], Observation::new(50.0, 60.0, 0.0, 0.0));
        assert_eq!(
            table.observations()[1],
            Observation::new(30.5, 20.0, -600.0, 5.25)
        );
        assert_eq!(table.label_column, None);
    }

    #[test]
    fn test_columns_in_any_order_with_extras() {
        let csv = "range_acceleration,prn,elevation_angle,signal_strength,pseudorange_rate\n\
                   1.0,G09,45,48,-12\n";
        let table = parse_observations(csv.as_bytes()).unwrap();

        assert_eq!(table.observations()[0], Observation::new(48.0, 45.0, -12.0, 1.0));
    }

    #[test]
    fn test_missing_column() {
        let csv = "signal_strength,elevation_angle,pseudorange_rate\n50,60,0\n";
        let err = parse_observations(csv.as_bytes()).unwrap_err();

        assert!(matches!(
            err,
            LabelError::MissingColumn { ref column } if column == "range_acceleration"
        ));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_non_numeric_value() {
        let csv = format!("{HEADER}\n50,60,0,0\n50,high,0,0\n");
        let err = parse_observations(csv.as_bytes()).unwrap_err();

        match err {
            LabelError::NonNumeric { row, column, value } => {
                assert_eq!(row, 2);
                assert_eq!(column, "elevation_angle");
                assert_eq!(value, "high");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_and_non_finite_cells_rejected() {
        let empty_cell = format!("{HEADER}\n50,,0,0\n");
        assert!(matches!(
            parse_observations(empty_cell.as_bytes()),
            Err(LabelError::NonNumeric { .. })
        ));

        let nan = format!("{HEADER}\nNaN,60,0,0\n");
        assert!(matches!(
            parse_observations(nan.as_bytes()),
            Err(LabelError::NonNumeric { .. })
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            parse_observations("".as_bytes()),
            Err(LabelError::EmptyInput)
        ));

        let header_only = format!("{HEADER}\n");
        assert!(matches!(
            parse_observations(header_only.as_bytes()),
            Err(LabelError::EmptyInput)
        ));
    }

    #[test]
    fn test_ragged_row_is_malformed() {
        let csv = format!("{HEADER}\n50,60,0\n");
        assert!(matches!(
            parse_observations(csv.as_bytes()),
            Err(LabelError::MalformedCsv(_))
        ));
    }

    #[test]
    fn test_existing_label_column_detected() {
        let csv = format!("{HEADER},label\n50,60,0,0,NLOS\n");
        let table = parse_observations(csv.as_bytes()).unwrap();
        assert_eq!(table.label_column, Some(4));
    }

    #[test]
    fn test_padded_header_is_not_a_match() {
        let csv = " signal_strength ,elevation_angle,pseudorange_rate,range_acceleration\n\
                   50,60,0,0\n";
        let err = parse_observations(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LabelError::MissingColumn { ref column } if column == "signal_strength"
        ));
    }

    #[test]
    fn test_padded_numeric_cells_accepted() {
        let csv = format!("{HEADER}\n 50 ,60,\t-12.5,0 \n");
        let table = parse_observations(csv.as_bytes()).unwrap();
        assert_eq!(table.observations()[0], Observation::new(50.0, 60.0, -12.5, 0.0));
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_observations(Path::new("/nonexistent/observations.csv")).unwrap_err();
        assert!(matches!(err, LabelError::InputUnreadable { .. }));
    }

    #[test]
    fn test_parse_labels() {
        let csv = "signal_strength,label\n50,LOS\n30,MP\n10,NLOS\n";
        let labels = parse_labels(csv.as_bytes()).unwrap();
        assert_eq!(
            labels,
            vec![Label::LineOfSight, Label::Multipath, Label::NonLineOfSight]
        );
    }

    #[test]
    fn test_parse_labels_unknown_value() {
        let csv = "label\nLOS\nGHOST\n";
        let err = parse_labels(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LabelError::UnknownLabel { row: 2, .. }));
    }

    #[test]
    fn test_parse_labels_missing_column() {
        let csv = "signal_strength\n50\n";
        assert!(matches!(
            parse_labels(csv.as_bytes()),
            Err(LabelError::MissingColumn { .. })
        ));
    }
}
