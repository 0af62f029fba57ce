use serde::Deserialize;

use sieve_core::errors::{Result, SieveError, Stage};

use crate::consts::PVALUE_COL;
use crate::tables::{csv_error, csv_reader, invalid_field, line_of};

#[derive(Debug, Deserialize)]
struct PValueRow {
    pvalue: String,
}

///
/// Read the precomputed p-values, one row per position in position order.
///
/// # Arguments
/// - text: CSV content with a single `pvalue` column
/// - width: number of positions in the reference; the row count must match it
///
pub fn read_p_values(text: &str, width: usize) -> Result<Vec<f64>> {
    let stage = Stage::LoadPValues;
    let mut reader = csv_reader(text, false);
    let headers = reader.headers().map_err(|e| csv_error(e, stage))?.clone();

    let mut p_values = Vec::with_capacity(width);
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(e, stage))?;
        let row: PValueRow = record
            .deserialize(Some(&headers))
            .map_err(|e| csv_error(e, stage))?;

        let value = row
            .pvalue
            .parse::<f64>()
            .map_err(|_| invalid_field(stage, line_of(&record), PVALUE_COL, &row.pvalue))?;
        p_values.push(value);
    }

    if p_values.len() != width {
        return Err(SieveError::dimension(stage, "p-values", width, p_values.len()));
    }

    Ok(p_values)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_read_p_values() {
        let p_values = read_p_values("pvalue\n0.5\n1\n0.0012\n", 3).unwrap();
        assert_eq!(p_values, vec![0.5, 1.0, 0.0012]);
    }

    #[rstest]
    fn test_read_p_values_wrong_count() {
        let err = read_p_values("pvalue\n0.5\n1\n", 3).unwrap_err();
        assert_eq!(
            err,
            SieveError::DimensionMismatch {
                stage: Stage::LoadPValues,
                subject: "p-values".to_string(),
                expected: 3,
                found: 2
            }
        );
    }

    #[rstest]
    fn test_read_p_values_not_numeric() {
        let err = read_p_values("pvalue\n0.5\nNA\n", 2).unwrap_err();
        assert!(matches!(err, SieveError::InvalidField { line: 3, .. }));
    }

    #[rstest]
    fn test_read_p_values_missing_column() {
        let err = read_p_values("p\n0.5\n", 1).unwrap_err();
        assert!(matches!(err, SieveError::MalformedRecord { .. }));
    }
}
