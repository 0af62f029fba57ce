use std::fmt::{self, Display};

use crate::models::TreatmentGroup;

///
/// One identifier/residue pair as it appears in a FASTA file.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub id: String,
    pub residues: Vec<u8>,
}

impl FastaRecord {
    pub fn new(id: impl Into<String>, residues: impl Into<Vec<u8>>) -> Self {
        FastaRecord {
            id: id.into(),
            residues: residues.into(),
        }
    }
}

///
/// The vaccine insert sequence every other sequence is compared against.
/// Its length is the canonical number of positions (`L`).
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSequence {
    id: String,
    residues: Vec<u8>,
}

impl ReferenceSequence {
    pub fn new(id: impl Into<String>, residues: impl Into<Vec<u8>>) -> Self {
        ReferenceSequence {
            id: id.into(),
            residues: residues.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn residues(&self) -> &[u8] {
        &self.residues
    }

    pub fn residue_at(&self, position: usize) -> Option<u8> {
        self.residues.get(position).copied()
    }

    ///
    /// Number of positions in the reference
    ///
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}

impl From<FastaRecord> for ReferenceSequence {
    fn from(record: FastaRecord) -> Self {
        ReferenceSequence {
            id: record.id,
            residues: record.residues,
        }
    }
}

impl Display for ReferenceSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} positions)", self.id, self.len())
    }
}

///
/// A breakthrough sequence placed in its treatment group.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub id: String,
    pub residues: Vec<u8>,
    pub group: TreatmentGroup,

    /// Per-position 0/1 indicators, present once the mismatch table has been merged.
    pub mismatch: Option<Vec<u8>>,
}

impl SequenceRecord {
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Residues as text. Residues are validated ASCII, so this is lossless.
    pub fn residues_str(&self) -> String {
        String::from_utf8_lossy(&self.residues).into_owned()
    }
}
