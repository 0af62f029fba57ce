use fxhash::FxHashSet;

use crate::errors::{Result, SieveError, Stage};
use crate::models::{FastaRecord, ReferenceSequence, SequenceRecord, TreatmentDictionary, TreatmentGroup};
use crate::transpose::Matrix;
use crate::utils::trim_control_bytes;

///
/// Breakthrough sequences resolved against the treatment dictionary.
///
/// `raw_by_record` holds the reference residues as row 0 followed by every
/// resolved record in input order.
///
#[derive(Debug, Clone)]
pub struct IndexedSequences {
    pub raw_by_record: Matrix<u8>,
    pub vaccine: Vec<SequenceRecord>,
    pub placebo: Vec<SequenceRecord>,
    pub num_vaccine: usize,
    pub num_placebo: usize,
}

impl IndexedSequences {
    /// Record-major residue matrix for one group.
    pub fn group_matrix(&self, group: TreatmentGroup) -> Matrix<u8> {
        let records = match group {
            TreatmentGroup::Vaccine => &self.vaccine,
            TreatmentGroup::Placebo => &self.placebo,
        };
        records.iter().map(|record| record.residues.clone()).collect()
    }
}

///
/// Places breakthrough sequences into their treatment groups one at a time,
/// keeping running group counts.
///
pub struct SequenceIndexer<'a> {
    dictionary: &'a TreatmentDictionary,
    width: usize,
    seen: FxHashSet<String>,
    indexed: IndexedSequences,
}

impl<'a> SequenceIndexer<'a> {
    pub fn new(reference: &ReferenceSequence, dictionary: &'a TreatmentDictionary) -> Self {
        SequenceIndexer {
            dictionary,
            width: reference.len(),
            seen: FxHashSet::default(),
            indexed: IndexedSequences {
                raw_by_record: vec![reference.residues().to_vec()],
                vaccine: Vec::new(),
                placebo: Vec::new(),
                num_vaccine: 0,
                num_placebo: 0,
            },
        }
    }

    ///
    /// Resolve one record and append it to the raw matrix and its group.
    ///
    /// Fails when the identifier is not in the dictionary, was already indexed,
    /// or when the residue count differs from the reference length.
    ///
    pub fn index(&mut self, record: FastaRecord) -> Result<TreatmentGroup> {
        let residues = trim_control_bytes(&record.residues).to_vec();

        let entry = self
            .dictionary
            .get(&record.id)
            .ok_or_else(|| SieveError::UnknownIdentifier {
                stage: Stage::IndexSequences,
                id: record.id.clone(),
            })?;

        if residues.len() != self.width {
            return Err(SieveError::dimension(
                Stage::IndexSequences,
                format!("residues of {}", record.id),
                self.width,
                residues.len(),
            ));
        }

        if !self.seen.insert(record.id.clone()) {
            return Err(SieveError::DuplicateIdentifier {
                stage: Stage::IndexSequences,
                id: record.id,
            });
        }

        self.indexed.raw_by_record.push(residues.clone());

        let sequence = SequenceRecord {
            id: record.id,
            residues,
            group: entry.group,
            mismatch: entry.mismatch.clone(),
        };

        match entry.group {
            TreatmentGroup::Vaccine => {
                self.indexed.vaccine.push(sequence);
                self.indexed.num_vaccine += 1;
            }
            TreatmentGroup::Placebo => {
                self.indexed.placebo.push(sequence);
                self.indexed.num_placebo += 1;
            }
        }

        Ok(entry.group)
    }

    ///
    /// Index every record from a parser, stopping at the first error.
    ///
    pub fn index_all<I>(mut self, records: I) -> Result<IndexedSequences>
    where
        I: IntoIterator<Item = Result<FastaRecord>>,
    {
        for record in records {
            self.index(record?)?;
        }
        Ok(self.finish())
    }

    pub fn finish(self) -> IndexedSequences {
        self.indexed
    }
}
