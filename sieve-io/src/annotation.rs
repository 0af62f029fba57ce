use serde::Deserialize;

use sieve_core::errors::{Result, Stage};
use sieve_core::models::{PositionAnnotation, PositionAnnotationMap};

use crate::consts::{CONSERVATION_COL, HXB2_AA_COL, POS_INDEX_COL};
use crate::tables::{csv_error, csv_reader, invalid_field, line_of};

#[derive(Debug, Deserialize)]
struct AnnotationRow {
    #[serde(rename = "posIndex")]
    pos_index: String,
    #[serde(rename = "hxb2Pos")]
    hxb2_pos: String,
    #[serde(rename = "hxb2aa")]
    hxb2_aa: String,
    conservation: String,
}

///
/// Build the position annotation map from the position map table.
///
/// # Arguments
/// - text: CSV content with `posIndex`, `hxb2Pos`, `hxb2aa` and `conservation` columns
/// - width: number of positions in the reference
///
pub fn build_annotation_map(text: &str, width: usize) -> Result<PositionAnnotationMap> {
    let stage = Stage::BuildAnnotationMap;
    let mut reader = csv_reader(text, false);
    let headers = reader.headers().map_err(|e| csv_error(e, stage))?.clone();

    let mut annotations = PositionAnnotationMap::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(e, stage))?;
        let line = line_of(&record);
        let row: AnnotationRow = record
            .deserialize(Some(&headers))
            .map_err(|e| csv_error(e, stage))?;

        let position = row
            .pos_index
            .parse::<usize>()
            .map_err(|_| invalid_field(stage, line, POS_INDEX_COL, &row.pos_index))?;

        let conservation = row
            .conservation
            .parse::<f64>()
            .ok()
            .filter(|c| (0.0..=1.0).contains(c))
            .ok_or_else(|| invalid_field(stage, line, CONSERVATION_COL, &row.conservation))?;

        let reference_aa = match row.hxb2_aa.as_bytes() {
            [aa] if aa.is_ascii_graphic() => *aa,
            _ => return Err(invalid_field(stage, line, HXB2_AA_COL, &row.hxb2_aa)),
        };

        annotations.insert(
            position,
            PositionAnnotation {
                reference_label: row.hxb2_pos,
                reference_aa,
                conservation,
            },
            width,
        )?;
    }

    Ok(annotations)
}
