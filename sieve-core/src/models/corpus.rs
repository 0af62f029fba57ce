use std::fmt::{self, Display};

use crate::errors::{Result, SieveError, Stage};
use crate::models::{PositionAnnotationMap, ReferenceSequence, SequenceRecord, SiteSummary};
use crate::transpose::Matrix;

///
/// Everything [SequenceCorpus::new] needs, produced by the pipeline stages.
///
#[derive(Debug, Clone)]
pub struct CorpusParts {
    pub reference: ReferenceSequence,
    pub vaccine_group: Vec<SequenceRecord>,
    pub placebo_group: Vec<SequenceRecord>,
    pub raw_by_record: Matrix<u8>,
    pub raw_by_position: Matrix<u8>,
    pub vaccine_by_position: Matrix<u8>,
    pub placebo_by_position: Matrix<u8>,
    pub annotations: PositionAnnotationMap,
    pub p_values: Vec<f64>,
}

///
/// The finished, validated data model. It has no mutating methods, so once
/// published it is read-only for every consumer.
///
#[derive(Debug, Clone)]
pub struct SequenceCorpus {
    parts: CorpusParts,
}

fn check(subject: &str, expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(SieveError::dimension(Stage::TransposeAll, subject, expected, found));
    }
    Ok(())
}

impl SequenceCorpus {
    ///
    /// Assemble a corpus, checking that
    /// - every record has as many residues as the reference
    /// - the raw matrix holds the reference plus one row per record
    /// - every position-major matrix has one row per position
    /// - there is one p-value per position
    ///
    pub fn new(parts: CorpusParts) -> Result<Self> {
        let width = parts.reference.len();
        let num_vaccine = parts.vaccine_group.len();
        let num_placebo = parts.placebo_group.len();

        for record in parts.vaccine_group.iter().chain(parts.placebo_group.iter()) {
            check(&format!("residues of {}", record.id), width, record.len())?;
            if let Some(mismatch) = &record.mismatch {
                check(&format!("mismatch vector for {}", record.id), width, mismatch.len())?;
            }
        }

        check("raw matrix records", 1 + num_vaccine + num_placebo, parts.raw_by_record.len())?;
        check("raw matrix positions", width, parts.raw_by_position.len())?;
        check("vaccine matrix positions", width, parts.vaccine_by_position.len())?;
        check("placebo matrix positions", width, parts.placebo_by_position.len())?;
        check("p-values", width, parts.p_values.len())?;

        for row in &parts.raw_by_position {
            check("raw matrix records", parts.raw_by_record.len(), row.len())?;
        }
        for row in &parts.vaccine_by_position {
            check("vaccine matrix records", num_vaccine, row.len())?;
        }
        for row in &parts.placebo_by_position {
            check("placebo matrix records", num_placebo, row.len())?;
        }

        Ok(SequenceCorpus { parts })
    }

    pub fn reference(&self) -> &ReferenceSequence {
        &self.parts.reference
    }

    /// Number of positions (`L`).
    pub fn width(&self) -> usize {
        self.parts.reference.len()
    }

    pub fn vaccine_group(&self) -> &[SequenceRecord] {
        &self.parts.vaccine_group
    }

    pub fn placebo_group(&self) -> &[SequenceRecord] {
        &self.parts.placebo_group
    }

    pub fn num_vaccine(&self) -> usize {
        self.parts.vaccine_group.len()
    }

    pub fn num_placebo(&self) -> usize {
        self.parts.placebo_group.len()
    }

    /// Reference residues (row 0) followed by every record, record-major.
    pub fn raw_by_record(&self) -> &Matrix<u8> {
        &self.parts.raw_by_record
    }

    /// `raw_by_position()[p][0]` is the reference residue, `[p][1 + i]` is record `i`.
    pub fn raw_by_position(&self) -> &Matrix<u8> {
        &self.parts.raw_by_position
    }

    pub fn vaccine_by_position(&self) -> &Matrix<u8> {
        &self.parts.vaccine_by_position
    }

    pub fn placebo_by_position(&self) -> &Matrix<u8> {
        &self.parts.placebo_by_position
    }

    pub fn annotations(&self) -> &PositionAnnotationMap {
        &self.parts.annotations
    }

    pub fn p_values(&self) -> &[f64] {
        &self.parts.p_values
    }

    pub fn record(&self, id: &str) -> Option<&SequenceRecord> {
        self.records().find(|record| record.id == id)
    }

    /// All records, vaccine group first.
    pub fn records(&self) -> impl Iterator<Item = &SequenceRecord> {
        self.parts.vaccine_group.iter().chain(self.parts.placebo_group.iter())
    }

    ///
    /// Mismatch tallies for one position.
    ///
    pub fn site(&self, position: usize) -> Result<SiteSummary> {
        SiteSummary::new(self, position)
    }

    ///
    /// Mismatch tallies for every position, in order.
    ///
    pub fn sites(&self) -> impl Iterator<Item = SiteSummary> + '_ {
        self.reference()
            .residues()
            .iter()
            .enumerate()
            .map(|(position, &residue)| SiteSummary::at(self, position, residue))
    }
}

impl Display for SequenceCorpus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SequenceCorpus against {} with {} vaccine and {} placebo records.",
            self.parts.reference,
            self.num_vaccine(),
            self.num_placebo()
        )
    }
}
