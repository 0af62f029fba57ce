use std::fmt::{self, Display};

use thiserror::Error;

///
/// Stages of one ingestion run, in the order they execute. `LoadPValues` is the only
/// stage allowed to overlap with others (`LoadTreatment` and `BuildDictionary`).
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    LoadReference,
    LoadPValues,
    LoadTreatment,
    BuildDictionary,
    LoadMismatch,
    MergeMismatch,
    LoadBreakthrough,
    IndexSequences,
    LoadAnnotations,
    BuildAnnotationMap,
    TransposeAll,
}

impl Stage {
    pub const ALL: [Stage; 11] = [
        Stage::LoadReference,
        Stage::LoadPValues,
        Stage::LoadTreatment,
        Stage::BuildDictionary,
        Stage::LoadMismatch,
        Stage::MergeMismatch,
        Stage::LoadBreakthrough,
        Stage::IndexSequences,
        Stage::LoadAnnotations,
        Stage::BuildAnnotationMap,
        Stage::TransposeAll,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::LoadReference => "LoadReference",
            Stage::LoadPValues => "LoadPValues",
            Stage::LoadTreatment => "LoadTreatment",
            Stage::BuildDictionary => "BuildDictionary",
            Stage::LoadMismatch => "LoadMismatch",
            Stage::MergeMismatch => "MergeMismatch",
            Stage::LoadBreakthrough => "LoadBreakthrough",
            Stage::IndexSequences => "IndexSequences",
            Stage::LoadAnnotations => "LoadAnnotations",
            Stage::BuildAnnotationMap => "BuildAnnotationMap",
            Stage::TransposeAll => "TransposeAll",
        }
    }

    /// Position of the stage in the run, starting at 0.
    pub fn ordinal(&self) -> usize {
        *self as usize
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

///
/// Every way an ingestion run can fail. Each variant records the stage that raised it.
///
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SieveError {
    #[error("[{stage}] can't read input {resource}: {message}")]
    Io {
        stage: Stage,
        resource: String,
        message: String,
    },

    #[error("[{stage}] malformed record at line {line}: {reason}")]
    MalformedRecord {
        stage: Stage,
        line: usize,
        reason: String,
    },

    #[error("[{stage}] unknown sample identifier: {id}")]
    UnknownIdentifier { stage: Stage, id: String },

    #[error("[{stage}] conflicting definitions for identifier: {id}")]
    DuplicateIdentifier { stage: Stage, id: String },

    #[error("[{stage}] conflicting annotations for position {position}")]
    DuplicatePosition { stage: Stage, position: usize },

    #[error("[{stage}] dimension mismatch in {subject}: expected {expected}, found {found}")]
    DimensionMismatch {
        stage: Stage,
        subject: String,
        expected: usize,
        found: usize,
    },

    #[error("[{stage}] invalid value {value:?} for column {column} at line {line}")]
    InvalidField {
        stage: Stage,
        line: usize,
        column: String,
        value: String,
    },

    #[error("[{stage}] pipeline cancelled")]
    Cancelled { stage: Stage },
}

impl SieveError {
    pub fn stage(&self) -> Stage {
        match self {
            SieveError::Io { stage, .. }
            | SieveError::MalformedRecord { stage, .. }
            | SieveError::UnknownIdentifier { stage, .. }
            | SieveError::DuplicateIdentifier { stage, .. }
            | SieveError::DuplicatePosition { stage, .. }
            | SieveError::DimensionMismatch { stage, .. }
            | SieveError::InvalidField { stage, .. }
            | SieveError::Cancelled { stage } => *stage,
        }
    }

    pub fn dimension(
        stage: Stage,
        subject: impl Into<String>,
        expected: usize,
        found: usize,
    ) -> Self {
        SieveError::DimensionMismatch {
            stage,
            subject: subject.into(),
            expected,
            found,
        }
    }
}

pub type Result<T> = std::result::Result<T, SieveError>;
