use serde::Deserialize;

use sieve_core::errors::{Result, Stage};
use sieve_core::models::TreatmentDictionary;

use crate::consts::SAMPLE_ID_COL;
use crate::tables::{csv_error, csv_reader, invalid_field, line_of};

#[derive(Debug, Deserialize)]
struct TreatmentRow {
    #[serde(rename = "sampleID")]
    sample_id: String,
    treatment: String,
}

///
/// Build the treatment dictionary from the treatment lookup table.
///
/// # Arguments
/// - text: CSV content with `sampleID` and `treatment` columns
///
pub fn build_treatment_dictionary(text: &str) -> Result<TreatmentDictionary> {
    let stage = Stage::BuildDictionary;
    let mut reader = csv_reader(text, false);
    let headers = reader.headers().map_err(|e| csv_error(e, stage))?.clone();

    let mut dictionary = TreatmentDictionary::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(e, stage))?;
        let row: TreatmentRow = record
            .deserialize(Some(&headers))
            .map_err(|e| csv_error(e, stage))?;

        if row.sample_id.is_empty() {
            return Err(invalid_field(stage, line_of(&record), SAMPLE_ID_COL, &row.sample_id));
        }

        dictionary.insert_treatment(&row.sample_id, &row.treatment)?;
    }

    Ok(dictionary)
}
