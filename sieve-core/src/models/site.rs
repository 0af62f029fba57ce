use std::collections::BTreeMap;
use std::fmt::{self, Display};

use crate::errors::{Result, SieveError, Stage};
use crate::models::{SequenceCorpus, TreatmentGroup};

///
/// Residues differing from the reference at one position, for one treatment group.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTally {
    /// Number of records in the group, mismatched or not.
    pub group_size: usize,
    /// Mismatched residue -> count, in ascending residue order.
    pub mismatches: BTreeMap<u8, usize>,
}

impl GroupTally {
    fn from_row(row: &[u8], reference: u8) -> Self {
        let mut mismatches = BTreeMap::new();
        for residue in row.iter().filter(|&&residue| residue != reference) {
            *mismatches.entry(*residue).or_insert(0) += 1;
        }
        GroupTally {
            group_size: row.len(),
            mismatches,
        }
    }

    pub fn total_mismatches(&self) -> usize {
        self.mismatches.values().sum()
    }

    /// Fraction of the group that mismatches the reference; 0 for an empty group.
    pub fn mismatch_fraction(&self) -> f64 {
        if self.group_size == 0 {
            return 0.0;
        }
        self.total_mismatches() as f64 / self.group_size as f64
    }
}

///
/// Everything known about one position: the reference residue, its external
/// coordinate, the precomputed p-value, and per-group mismatch tallies.
///
#[derive(Debug, Clone, PartialEq)]
pub struct SiteSummary {
    pub position: usize,
    pub reference_residue: u8,
    pub reference_label: Option<String>,
    pub conservation: Option<f64>,
    pub p_value: f64,
    pub vaccine: GroupTally,
    pub placebo: GroupTally,
}

impl SiteSummary {
    pub fn new(corpus: &SequenceCorpus, position: usize) -> Result<Self> {
        let width = corpus.width();
        let reference_residue = corpus.reference().residue_at(position).ok_or_else(|| {
            SieveError::dimension(
                Stage::TransposeAll,
                format!("site position {}", position),
                width,
                position + 1,
            )
        })?;

        Ok(Self::at(corpus, position, reference_residue))
    }

    ///
    /// Build the summary for a position already known to be in range. A corpus
    /// holds one p-value and one row per group matrix for every reference residue,
    /// so indexing by a reference position cannot fail.
    ///
    pub(crate) fn at(corpus: &SequenceCorpus, position: usize, reference_residue: u8) -> Self {
        let annotation = corpus.annotations().get(position);

        SiteSummary {
            position,
            reference_residue,
            reference_label: annotation.map(|a| a.reference_label.clone()),
            conservation: annotation.map(|a| a.conservation),
            p_value: corpus.p_values()[position],
            vaccine: GroupTally::from_row(&corpus.vaccine_by_position()[position], reference_residue),
            placebo: GroupTally::from_row(&corpus.placebo_by_position()[position], reference_residue),
        }
    }

    pub fn tally(&self, group: TreatmentGroup) -> &GroupTally {
        match group {
            TreatmentGroup::Vaccine => &self.vaccine,
            TreatmentGroup::Placebo => &self.placebo,
        }
    }

    /// Residues seen mismatching in either group, ascending.
    pub fn mismatched_residues(&self) -> Vec<u8> {
        let mut residues: Vec<u8> = self
            .vaccine
            .mismatches
            .keys()
            .chain(self.placebo.mismatches.keys())
            .copied()
            .collect();
        residues.sort_unstable();
        residues.dedup();
        residues
    }
}

impl Display for SiteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self
            .reference_label
            .clone()
            .unwrap_or_else(|| self.position.to_string());
        write!(
            f,
            "{} ({}) Mismatches",
            label, self.reference_residue as char
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::models::{CorpusParts, PositionAnnotation, PositionAnnotationMap, ReferenceSequence, SequenceRecord};

    fn record(id: &str, residues: &[u8], group: TreatmentGroup) -> SequenceRecord {
        SequenceRecord {
            id: id.to_string(),
            residues: residues.to_vec(),
            group,
            mismatch: None,
        }
    }

    #[fixture]
    fn corpus() -> SequenceCorpus {
        let mut annotations = PositionAnnotationMap::new();
        annotations
            .insert(
                1,
                PositionAnnotation {
                    reference_label: "169".to_string(),
                    reference_aa: b'K',
                    conservation: 0.75,
                },
                2,
            )
            .unwrap();

        SequenceCorpus::new(CorpusParts {
            reference: ReferenceSequence::new("vaccine", b"MK".to_vec()),
            vaccine_group: vec![
                record("V1", b"MR", TreatmentGroup::Vaccine),
                record("V2", b"MK", TreatmentGroup::Vaccine),
                record("V3", b"MQ", TreatmentGroup::Vaccine),
                record("V4", b"MR", TreatmentGroup::Vaccine),
            ],
            placebo_group: vec![record("P1", b"MK", TreatmentGroup::Placebo)],
            raw_by_record: vec![
                b"MK".to_vec(),
                b"MR".to_vec(),
                b"MK".to_vec(),
                b"MQ".to_vec(),
                b"MR".to_vec(),
                b"MK".to_vec(),
            ],
            raw_by_position: vec![b"MMMMMM".to_vec(), b"KRKQRK".to_vec()],
            vaccine_by_position: vec![b"MMMM".to_vec(), b"RKQR".to_vec()],
            placebo_by_position: vec![b"M".to_vec(), b"K".to_vec()],
            annotations,
            p_values: vec![1.0, 0.04],
        })
        .unwrap()
    }

    #[rstest]
    fn test_site_tallies(corpus: SequenceCorpus) {
        let site = corpus.site(1).unwrap();
        assert_eq!(site.reference_residue, b'K');
        assert_eq!(site.vaccine.group_size, 4);
        assert_eq!(site.vaccine.mismatches.get(&b'R'), Some(&2));
        assert_eq!(site.vaccine.mismatches.get(&b'Q'), Some(&1));
        assert_eq!(site.vaccine.total_mismatches(), 3);
        assert_eq!(site.vaccine.mismatch_fraction(), 0.75);
        assert_eq!(site.placebo.total_mismatches(), 0);
        assert_eq!(site.mismatched_residues(), vec![b'Q', b'R']);
        assert_eq!(site.p_value, 0.04);
        assert_eq!(site.conservation, Some(0.75));
        assert_eq!(site.to_string(), "169 (K) Mismatches");
    }

    #[rstest]
    fn test_site_without_annotation_uses_index(corpus: SequenceCorpus) {
        let site = corpus.site(0).unwrap();
        assert_eq!(site.to_string(), "0 (M) Mismatches");
        assert!(site.mismatched_residues().is_empty());
    }

    #[rstest]
    fn test_site_out_of_range(corpus: SequenceCorpus) {
        assert!(matches!(
            corpus.site(2),
            Err(SieveError::DimensionMismatch { .. })
        ));
        assert_eq!(corpus.sites().count(), 2);
    }

    #[rstest]
    fn test_sites_match_single_site_lookup(corpus: SequenceCorpus) {
        let sites: Vec<SiteSummary> = corpus.sites().collect();
        assert_eq!(sites.len(), corpus.width());
        for (position, site) in sites.iter().enumerate() {
            assert_eq!(site, &corpus.site(position).unwrap());
        }
    }

    #[rstest]
    fn test_empty_group_fraction() {
        let tally = GroupTally::from_row(&[], b'K');
        assert_eq!(tally.mismatch_fraction(), 0.0);
    }
}
