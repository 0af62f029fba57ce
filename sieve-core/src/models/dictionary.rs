use fxhash::FxHashMap;

use crate::errors::{Result, SieveError, Stage};
use crate::models::TreatmentGroup;

///
/// What the trial knows about one sample: its study arm and, once merged,
/// its per-position mismatch indicators against the reference.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreatmentEntry {
    pub group: TreatmentGroup,
    pub mismatch: Option<Vec<u8>>,
}

///
/// Sample identifier -> [TreatmentEntry]. This is the only place group
/// membership comes from.
///
/// Conflict policy:
/// - the same sample listed twice with the same arm is accepted once
/// - the same sample listed with two different arms is a duplicate identifier error
/// - a mismatch vector may be written once; rewriting it with identical values is a no-op
///
#[derive(Debug, Clone, Default)]
pub struct TreatmentDictionary {
    entries: FxHashMap<String, TreatmentEntry>,
}

impl TreatmentDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Register a sample with its free-text treatment label.
    ///
    /// # Arguments
    /// - sample_id: identifier shared with the FASTA and mismatch inputs
    /// - treatment: label classified by [TreatmentGroup::classify]
    ///
    pub fn insert_treatment(&mut self, sample_id: &str, treatment: &str) -> Result<TreatmentGroup> {
        let group = TreatmentGroup::classify(treatment);

        match self.entries.get(sample_id) {
            Some(existing) if existing.group != group => Err(SieveError::DuplicateIdentifier {
                stage: Stage::BuildDictionary,
                id: sample_id.to_string(),
            }),
            Some(_) => Ok(group),
            None => {
                self.entries.insert(
                    sample_id.to_string(),
                    TreatmentEntry {
                        group,
                        mismatch: None,
                    },
                );
                Ok(group)
            }
        }
    }

    ///
    /// Attach a mismatch vector to an already registered sample.
    ///
    /// # Arguments
    /// - sample_id: identifier that must already be in the dictionary
    /// - mismatch: 0/1 indicator per position
    /// - width: number of positions in the reference
    ///
    pub fn merge_mismatch(&mut self, sample_id: &str, mismatch: Vec<u8>, width: usize) -> Result<()> {
        let entry = self
            .entries
            .get_mut(sample_id)
            .ok_or_else(|| SieveError::UnknownIdentifier {
                stage: Stage::MergeMismatch,
                id: sample_id.to_string(),
            })?;

        if mismatch.len() != width {
            return Err(SieveError::dimension(
                Stage::MergeMismatch,
                format!("mismatch vector for {}", sample_id),
                width,
                mismatch.len(),
            ));
        }

        match &entry.mismatch {
            Some(existing) if *existing != mismatch => Err(SieveError::DuplicateIdentifier {
                stage: Stage::MergeMismatch,
                id: sample_id.to_string(),
            }),
            Some(_) => Ok(()),
            None => {
                entry.mismatch = Some(mismatch);
                Ok(())
            }
        }
    }

    pub fn get(&self, sample_id: &str) -> Option<&TreatmentEntry> {
        self.entries.get(sample_id)
    }

    pub fn contains(&self, sample_id: &str) -> bool {
        self.entries.contains_key(sample_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of samples in each arm, as `(vaccine, placebo)`.
    pub fn group_sizes(&self) -> (usize, usize) {
        let vaccine = self
            .entries
            .values()
            .filter(|entry| entry.group.is_vaccine())
            .count();
        (vaccine, self.entries.len() - vaccine)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TreatmentEntry)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }
}
