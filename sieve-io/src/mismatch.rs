use sieve_core::errors::{Result, SieveError, Stage};
use sieve_core::models::TreatmentDictionary;

use crate::consts::SAMPLE_ID_COL;
use crate::tables::{csv_error, csv_reader, invalid_field, line_of};

///
/// Merge the mismatch table into an existing treatment dictionary.
///
/// Every row holds one 0/1 indicator per position, in position order, followed by
/// the sample identifier in the last column. The sample must already be in the
/// dictionary.
///
/// # Arguments
/// - text: CSV content of the mismatch table
/// - dictionary: dictionary built from the treatment table
/// - width: number of positions in the reference
///
/// # Returns
/// The number of rows merged.
///
pub fn merge_mismatch_table(text: &str, dictionary: &mut TreatmentDictionary, width: usize) -> Result<usize> {
    let stage = Stage::MergeMismatch;
    let mut reader = csv_reader(text, true);
    let headers = reader.headers().map_err(|e| csv_error(e, stage))?.clone();

    match headers.iter().last() {
        Some(last) if last.eq_ignore_ascii_case(SAMPLE_ID_COL) => {}
        _ => {
            return Err(SieveError::MalformedRecord {
                stage,
                line: 1,
                reason: format!("the last column must be {}", SAMPLE_ID_COL),
            });
        }
    }

    let mut merged = 0;
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(e, stage))?;
        let line = line_of(&record);

        let fields: Vec<&str> = record.iter().collect();
        let Some((sample_id, indicators)) = fields.split_last() else {
            return Err(SieveError::MalformedRecord {
                stage,
                line,
                reason: "empty row".to_string(),
            });
        };

        // identity is checked before any indicator is parsed
        if !dictionary.contains(sample_id) {
            return Err(SieveError::UnknownIdentifier {
                stage,
                id: sample_id.to_string(),
            });
        }

        let mismatch = indicators
            .iter()
            .enumerate()
            .map(|(col, value)| match *value {
                "0" => Ok(0u8),
                "1" => Ok(1u8),
                other => Err(invalid_field(stage, line, headers.get(col).unwrap_or(""), other)),
            })
            .collect::<Result<Vec<u8>>>()?;

        dictionary.merge_mismatch(sample_id, mismatch, width)?;
        merged += 1;
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn dictionary() -> TreatmentDictionary {
        let mut dictionary = TreatmentDictionary::new();
        dictionary.insert_treatment("S1", "Vaccine").unwrap();
        dictionary.insert_treatment("S2", "Placebo").unwrap();
        dictionary
    }

    #[rstest]
    fn test_merge_mismatch_table(mut dictionary: TreatmentDictionary) {
        let text = "0,1,2,sampleID\n0,0,1,S1\n1,0,0,S2\n";
        let merged = merge_mismatch_table(text, &mut dictionary, 3).unwrap();

        assert_eq!(merged, 2);
        assert_eq!(dictionary.get("S1").unwrap().mismatch, Some(vec![0, 0, 1]));
        assert_eq!(dictionary.get("S2").unwrap().mismatch, Some(vec![1, 0, 0]));
    }

    #[rstest]
    #[case("0,1,2,sampleID\n0,0,1,S9\n")]
    #[case("0,1,2,sampleID\n0,x,1,S9\n")]
    #[case("0,1,2,sampleID\n0,1,S9\n")]
    fn test_unknown_sample(mut dictionary: TreatmentDictionary, #[case] text: &str) {
        let err = merge_mismatch_table(text, &mut dictionary, 3).unwrap_err();
        assert_eq!(
            err,
            SieveError::UnknownIdentifier {
                stage: Stage::MergeMismatch,
                id: "S9".to_string()
            }
        );
    }

    #[rstest]
    #[case("0,1,sampleID\n0,1,S1\n")]
    #[case("0,1,2,sampleID\n0,0,1,1,S1\n")]
    fn test_wrong_width(mut dictionary: TreatmentDictionary, #[case] text: &str) {
        let err = merge_mismatch_table(text, &mut dictionary, 3).unwrap_err();
        assert!(matches!(err, SieveError::DimensionMismatch { expected: 3, .. }));
    }

    #[rstest]
    fn test_non_binary_indicator(mut dictionary: TreatmentDictionary) {
        let text = "0,1,2,sampleID\n0,2,1,S1\n";
        let err = merge_mismatch_table(text, &mut dictionary, 3).unwrap_err();
        assert_eq!(
            err,
            SieveError::InvalidField {
                stage: Stage::MergeMismatch,
                line: 2,
                column: "1".to_string(),
                value: "2".to_string()
            }
        );
    }

    #[rstest]
    fn test_sample_id_must_be_last(mut dictionary: TreatmentDictionary) {
        let text = "sampleID,0,1,2\nS1,0,0,1\n";
        assert!(matches!(
            merge_mismatch_table(text, &mut dictionary, 3),
            Err(SieveError::MalformedRecord { line: 1, .. })
        ));
    }
}
